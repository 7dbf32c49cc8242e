use std::sync::Mutex;
use std::time::Duration;

use crate::event::{EventSender, ItemEvent};

/// Coalesces bursts of icon-change signals into a single
/// [`ItemEvent::UpdateIcon`].
///
/// Items tend to update several icon variants back to back; consumers only
/// need to redraw once after the burst settles.
pub(crate) struct IconDebouncer {
    delay: Duration,
    timer: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl IconDebouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        IconDebouncer { delay, timer: Mutex::new(None) }
    }

    /// (Re)start the quiet-period timer. A pending emission is dropped in
    /// favour of the new one, so any number of calls inside the window
    /// produce exactly one event.
    pub(crate) fn schedule(&self, events: EventSender) {
        let mut timer = self.timer.lock().unwrap();
        if let Some(pending) = timer.take() {
            pending.abort();
        }
        let delay = self.delay;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(ItemEvent::UpdateIcon);
        }));
    }

    /// Drop a pending emission, if any.
    pub(crate) fn cancel(&self) {
        if let Some(pending) = self.timer.lock().unwrap().take() {
            pending.abort();
        }
    }
}
