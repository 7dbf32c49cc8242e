/// Notifications the proxy pushes to its UI collaborator.
///
/// Events carry no payload; a consumer reacts by re-reading whichever
/// properties it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// Connection established and signals subscribed. Property reads are
    /// meaningful from here on.
    Ready,
    /// One of the icon properties changed. Bursts are coalesced, so this
    /// arrives at most once per quiet period.
    UpdateIcon,
    /// The `Status` property changed.
    UpdateStatus,
    /// The tooltip or label changed.
    UpdateTooltip,
    /// Reserved for `NewMenu`. Currently never emitted.
    UpdateMenu,
}

pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<ItemEvent>;

pub(crate) type EventSender = tokio::sync::mpsc::UnboundedSender<ItemEvent>;

pub(crate) fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}
