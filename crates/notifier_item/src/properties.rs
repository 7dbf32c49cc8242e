use std::time::Duration;

use zbus::zvariant::OwnedValue;

use crate::transport::ItemTransport;

/// One entry of an icon pixmap property: `(width, height, ARGB32 data)`.
pub type IconPixmap = (i32, i32, Vec<u8>);

/// Only appindicator-compatible items expose anything tooltip-like, and they
/// all live under this object path prefix.
pub const APPINDICATOR_PATH_PREFIX: &str = "/org/ayatana/NotificationItem/";

/// Appindicator items drop their properties before unregistering, so
/// unknown-property and invalid-args replies are routine during teardown and
/// not worth logging.
pub(crate) fn benign_read_failure(err: &zbus::Error) -> bool {
    match err {
        zbus::Error::FDO(e) => {
            matches!(**e, zbus::fdo::Error::UnknownProperty(_) | zbus::fdo::Error::InvalidArgs(_))
        }
        _ => false,
    }
}

fn warn_unless_benign(name: &str, err: &zbus::Error) {
    if !benign_read_failure(err) {
        log::warn!("couldn't get {} property: {}", name, err);
    }
}

async fn read<T: ItemTransport>(transport: &T, timeout: Duration, name: &str) -> zbus::Result<OwnedValue> {
    match tokio::time::timeout(timeout, transport.get_property(name)).await {
        Ok(result) => result,
        Err(_) => Err(zbus::Error::Failure(format!("Get timed out after {:?}", timeout))),
    }
}

// Menu comes over the wire as an object path; everything else string-ish is
// a plain string.
fn string_from_value(value: &OwnedValue) -> Option<String> {
    match &**value {
        zbus::zvariant::Value::Str(s) => Some(s.as_str().to_owned()),
        zbus::zvariant::Value::ObjectPath(p) => Some(p.as_str().to_owned()),
        _ => None,
    }
}

/// Read a string property. An empty remote value counts as absent and maps
/// to `default`, same as any read failure.
pub(crate) async fn get_string<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    name: &str,
    default: &str,
) -> String {
    match read(transport, timeout, name).await {
        Ok(value) => match string_from_value(&value) {
            Some(s) if s.is_empty() => default.to_owned(),
            Some(s) => s,
            None => {
                log::warn!("{} property had an unexpected type", name);
                default.to_owned()
            }
        },
        Err(e) => {
            warn_unless_benign(name, &e);
            default.to_owned()
        }
    }
}

/// [`get_string`] for properties with no meaningful fallback value.
pub(crate) async fn get_opt_string<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    name: &str,
) -> Option<String> {
    let s = get_string(transport, timeout, name, "").await;
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

pub(crate) async fn get_bool<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    name: &str,
    default: bool,
) -> bool {
    match read(transport, timeout, name).await {
        Ok(value) => match bool::try_from(value) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("{} property had an unexpected type: {}", name, e);
                default
            }
        },
        Err(e) => {
            warn_unless_benign(name, &e);
            default
        }
    }
}

/// Read a pixmap array property. An empty array counts as absent.
pub(crate) async fn get_pixmaps<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    name: &str,
) -> Option<Vec<IconPixmap>> {
    match read(transport, timeout, name).await {
        Ok(value) => match Vec::<IconPixmap>::try_from(value) {
            Ok(pixmaps) if pixmaps.is_empty() => None,
            Ok(pixmaps) => Some(pixmaps),
            Err(e) => {
                log::warn!("{} property had an unexpected type: {}", name, e);
                None
            }
        },
        Err(e) => {
            warn_unless_benign(name, &e);
            None
        }
    }
}

/// Tooltip of the item at `object_path`. Only appindicator items have one,
/// via their `XAyatanaLabel` property; for every other path this answers
/// without touching the bus.
pub(crate) async fn tooltip<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    object_path: &str,
) -> String {
    if !object_path.starts_with(APPINDICATOR_PATH_PREFIX) {
        return String::new();
    }
    get_string(transport, timeout, "XAyatanaLabel", "").await
}
