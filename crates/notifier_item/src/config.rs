use std::time::Duration;

use crate::error::{Error, Result};

/// Construction-time settings for one item proxy.
///
/// The `(bus_name, object_path)` pair identifies the remote item and is fixed
/// for the proxy's whole lifetime.
#[derive(Debug, Clone)]
pub struct ItemConfig {
    /// Bus name the item registered under, usually a unique name like
    /// `:1.50`. Signals from any other sender are discarded.
    pub bus_name: String,
    /// Object path of the item on that connection.
    pub object_path: String,
    /// Upper bound on each remote property read.
    pub property_timeout: Duration,
    /// Quiet period used to coalesce bursts of icon-change signals.
    pub icon_debounce: Duration,
}

impl ItemConfig {
    pub const DEFAULT_PATH: &'static str = "/StatusNotifierItem";

    pub fn new(bus_name: impl Into<String>, object_path: impl Into<String>) -> Self {
        ItemConfig {
            bus_name: bus_name.into(),
            object_path: object_path.into(),
            property_timeout: Duration::from_secs(5),
            icon_debounce: Duration::from_millis(25),
        }
    }

    /// Parse a StatusNotifierWatcher-style address of the form
    /// `{bus}{object_path}` (e.g. `:1.50/org/ayatana/NotificationItem/nm_applet`),
    /// which is the format used for the watcher's `RegisteredStatusNotifierItems`
    /// property. A bare bus name gets [`ItemConfig::DEFAULT_PATH`].
    pub fn from_address(service: &str) -> Result<Self> {
        if let Some((addr, path)) = service.split_once('/') {
            Ok(Self::new(addr, format!("/{}", path)))
        } else if service.starts_with(':') {
            Ok(Self::new(service, Self::DEFAULT_PATH))
        } else {
            Err(Error::Address(service.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_with_path_splits() {
        let config = ItemConfig::from_address(":1.50/org/ayatana/NotificationItem/nm_applet").unwrap();
        assert_eq!(config.bus_name, ":1.50");
        assert_eq!(config.object_path, "/org/ayatana/NotificationItem/nm_applet");
    }

    #[test]
    fn bare_unique_name_gets_default_path() {
        let config = ItemConfig::from_address(":1.50").unwrap();
        assert_eq!(config.bus_name, ":1.50");
        assert_eq!(config.object_path, ItemConfig::DEFAULT_PATH);
    }

    #[test]
    fn garbage_address_is_rejected() {
        assert!(matches!(ItemConfig::from_address("nonsense"), Err(Error::Address(_))));
    }
}
