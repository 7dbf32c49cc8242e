//! Client proxy for a single [`org.kde.StatusNotifierItem`].
//!
//! The protocol has no central registry of change notifications: items
//! broadcast signals, and everyone is expected to re-fetch properties on
//! demand. [`SnItem`] hides that dance behind a handful of events and typed
//! property getters.
//!
//! [`org.kde.StatusNotifierItem`]: https://www.freedesktop.org/wiki/Specifications/StatusNotifierItem/StatusNotifierItem/

mod config;
pub use config::*;

mod debounce;

mod error;
pub use error::*;

mod event;
pub use event::*;

mod interaction;
pub use interaction::*;

mod item;
pub use item::*;

mod properties;
pub use properties::{IconPixmap, APPINDICATOR_PATH_PREFIX};

mod signal;

mod transport;

#[cfg(test)]
pub(crate) mod test_util;
