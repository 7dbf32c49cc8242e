/// What the proxy does with a received `org.kde.StatusNotifierItem` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalKind {
    /// One of the icon variants changed; goes through the debouncer.
    Icon,
    /// Status changed; the payload gets cached before re-emission.
    Status,
    /// Menu layout changed. Reserved, nothing consumes this yet.
    Menu,
    /// Label or tooltip changed; forwarded without debouncing.
    Tooltip,
    /// Not a signal we react to.
    Ignored,
}

pub(crate) fn classify(member: &str) -> SignalKind {
    match member {
        "NewIcon" | "NewAttentionIcon" | "NewOverlayIcon" => SignalKind::Icon,
        "NewStatus" => SignalKind::Status,
        "NewMenu" => SignalKind::Menu,
        "XAyatanaNewLabel" | "Tooltip" => SignalKind::Tooltip,
        _ => SignalKind::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_variant_is_debounced() {
        for member in ["NewIcon", "NewAttentionIcon", "NewOverlayIcon"] {
            assert_eq!(classify(member), SignalKind::Icon);
        }
    }

    #[test]
    fn unknown_members_are_ignored() {
        assert_eq!(classify("NewTitle"), SignalKind::Ignored);
        assert_eq!(classify(""), SignalKind::Ignored);
    }

    #[test]
    fn tooltip_comes_from_both_dialects() {
        assert_eq!(classify("XAyatanaNewLabel"), SignalKind::Tooltip);
        assert_eq!(classify("Tooltip"), SignalKind::Tooltip);
    }
}
