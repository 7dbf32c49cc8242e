use std::time::Duration;

use crate::transport::{ItemTransport, MethodArgs};

/// Pointer buttons as the UI layer reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    /// Thumb buttons and friends. Interactions ignore these.
    Other(u8),
}

/// Primary activation.
///
/// Most implementations don't have a primary activate at all, and at least
/// one advertises `SecondaryActivate` while only listening for `Activate`.
/// So: try `Activate` and wait for the verdict, and on any failure fire
/// `SecondaryActivate` without waiting on anyone. Middle click skips
/// straight to the secondary path.
pub(crate) async fn activate<T: ItemTransport>(
    transport: &T,
    timeout: Duration,
    button: MouseButton,
    x: i32,
    y: i32,
) {
    match button {
        MouseButton::Primary => {
            let call = tokio::time::timeout(timeout, transport.call("Activate", MethodArgs::Coords(x, y))).await;
            if !matches!(call, Ok(Ok(()))) {
                transport.dispatch("SecondaryActivate", MethodArgs::Coords(x, y));
            }
        }
        MouseButton::Middle => transport.dispatch("SecondaryActivate", MethodArgs::Coords(x, y)),
        MouseButton::Secondary | MouseButton::Other(_) => {}
    }
}

pub(crate) fn show_context_menu<T: ItemTransport>(transport: &T, button: MouseButton, x: i32, y: i32) {
    if button == MouseButton::Secondary {
        transport.dispatch("ContextMenu", MethodArgs::Coords(x, y));
    }
}

pub(crate) fn scroll<T: ItemTransport>(transport: &T, delta: i32, orientation: &str) {
    transport.dispatch("Scroll", MethodArgs::Scroll(delta, orientation.to_owned()));
}
