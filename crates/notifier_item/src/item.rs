use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;

use crate::config::ItemConfig;
use crate::debounce::IconDebouncer;
use crate::error::Result;
use crate::event::{self, EventReceiver, EventSender, ItemEvent};
use crate::interaction::{self, MouseButton};
use crate::properties::{self, IconPixmap};
use crate::signal::{self, SignalKind};
use crate::transport::{BusTransport, SNI_INTERFACE};

/// Client proxy for one StatusNotifierItem on the session bus.
///
/// The remote side announces changes as broadcast signals and expects
/// everyone to fetch properties on demand; appindicator items don't even
/// keep theirs readable while shutting down. This type hides that: it owns
/// the connection and the signal subscription, pushes [`ItemEvent`]s to its
/// consumer, and serves property reads that degrade to defaults when the
/// remote end misbehaves.
///
/// Dropping the proxy tears it down; [`SnItem::destroy`] does the same
/// explicitly.
pub struct SnItem {
    inner: Arc<ItemInner>,
}

struct ItemInner {
    config: ItemConfig,
    ready: AtomicBool,
    destroyed: AtomicBool,
    cached_status: Mutex<String>,
    events: EventSender,
    icon_debounce: IconDebouncer,
    remote: Mutex<Option<Remote>>,
}

/// Everything that only exists while the connection is up. `None` before
/// the bus is acquired and again after teardown.
struct Remote {
    transport: BusTransport,
    router: tokio::task::JoinHandle<()>,
}

impl SnItem {
    /// Create a proxy for `config` and start acquiring the session bus.
    ///
    /// Returns immediately; [`ItemEvent::Ready`] arrives on the receiver
    /// once the connection is up and signals are subscribed. If the bus
    /// can't be acquired the failure is logged and the proxy stays
    /// non-ready, answering every read with its default.
    pub fn connect(config: ItemConfig) -> (SnItem, EventReceiver) {
        Self::spawn_setup(config, None)
    }

    /// Like [`SnItem::connect`], but reusing an established connection.
    pub fn connect_with(config: ItemConfig, connection: zbus::Connection) -> (SnItem, EventReceiver) {
        Self::spawn_setup(config, Some(connection))
    }

    fn spawn_setup(config: ItemConfig, connection: Option<zbus::Connection>) -> (SnItem, EventReceiver) {
        let (events, rx) = event::channel();
        let inner = Arc::new(ItemInner {
            icon_debounce: IconDebouncer::new(config.icon_debounce),
            config,
            ready: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            cached_status: Mutex::new("Active".to_owned()),
            events,
            remote: Mutex::new(None),
        });

        tokio::spawn({
            let inner = inner.clone();
            async move {
                let connection = match connection {
                    Some(connection) => connection,
                    None => match zbus::Connection::session().await {
                        Ok(connection) => connection,
                        Err(e) => {
                            log::error!("couldn't reach the session bus for {}: {}", inner.config.bus_name, e);
                            return;
                        }
                    },
                };
                if let Err(e) = inner.clone().attach(connection).await {
                    log::error!("couldn't subscribe to signals from {}: {}", inner.config.bus_name, e);
                }
            }
        });

        (SnItem { inner }, rx)
    }

    pub fn bus_name(&self) -> &str {
        &self.inner.config.bus_name
    }

    pub fn object_path(&self) -> &str {
        &self.inner.config.object_path
    }

    /// Whether the connection is up and signals are flowing.
    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }

    pub async fn category(&self) -> String {
        self.get_string("Category", "ApplicationStatus").await
    }

    pub async fn id(&self) -> String {
        self.get_string("Id", "").await
    }

    pub async fn title(&self) -> String {
        self.get_string("Title", "").await
    }

    /// Current status (`"Active"`, `"Passive"` or `"NeedsAttention"`).
    ///
    /// Falls back to the last value pushed via `NewStatus` when the remote
    /// read fails or comes back empty, which is exactly what happens while
    /// an appindicator item disposes itself.
    pub async fn status(&self) -> String {
        let cached = self.inner.cached_status.lock().unwrap().clone();
        self.get_string("Status", &cached).await
    }

    /// Object path of the item's dbusmenu, as a string.
    pub async fn menu(&self) -> String {
        self.get_string("Menu", "").await
    }

    pub async fn item_is_menu(&self) -> bool {
        match self.transport() {
            Some(t) => properties::get_bool(&t, self.timeout(), "ItemIsMenu", false).await,
            None => false,
        }
    }

    pub async fn icon_theme_path(&self) -> Option<String> {
        self.get_opt_string("IconThemePath").await
    }

    pub async fn icon_name(&self) -> Option<String> {
        self.get_opt_string("IconName").await
    }

    pub async fn icon_pixmap(&self) -> Option<Vec<IconPixmap>> {
        self.get_pixmaps("IconPixmap").await
    }

    pub async fn attention_icon_name(&self) -> Option<String> {
        self.get_opt_string("AttentionIconName").await
    }

    pub async fn attention_icon_pixmap(&self) -> Option<Vec<IconPixmap>> {
        self.get_pixmaps("AttentionIconPixmap").await
    }

    pub async fn overlay_icon_name(&self) -> Option<String> {
        self.get_opt_string("OverlayIconName").await
    }

    pub async fn overlay_icon_pixmap(&self) -> Option<Vec<IconPixmap>> {
        self.get_pixmaps("OverlayIconPixmap").await
    }

    /// Tooltip text. Only appindicator items have one (their `XAyatanaLabel`
    /// property); for any other object path this is `""` without a remote
    /// call.
    pub async fn tooltip(&self) -> String {
        match self.transport() {
            Some(t) => properties::tooltip(&t, self.timeout(), self.object_path()).await,
            None => String::new(),
        }
    }

    /// React to a pointer click: primary tries `Activate` and falls back to
    /// a fire-and-forget `SecondaryActivate` on any failure, middle goes
    /// straight to `SecondaryActivate`, everything else is ignored.
    pub async fn activate(&self, button: MouseButton, x: i32, y: i32) {
        if let Some(t) = self.transport() {
            interaction::activate(&t, self.timeout(), button, x, y).await;
        }
    }

    /// Ask the item to open its own context menu at `(x, y)`. Only the
    /// secondary button does anything.
    pub fn show_context_menu(&self, button: MouseButton, x: i32, y: i32) {
        if let Some(t) = self.transport() {
            interaction::show_context_menu(&t, button, x, y);
        }
    }

    pub fn scroll(&self, delta: i32, orientation: &str) {
        if let Some(t) = self.transport() {
            interaction::scroll(&t, delta, orientation);
        }
    }

    /// Tear down the signal subscription and release the connection.
    ///
    /// Safe on a proxy that never became ready and safe to call more than
    /// once; teardown problems are logged, never raised.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    fn transport(&self) -> Option<BusTransport> {
        self.inner.remote.lock().unwrap().as_ref().map(|r| r.transport.clone())
    }

    fn timeout(&self) -> Duration {
        self.inner.config.property_timeout
    }

    async fn get_string(&self, name: &str, default: &str) -> String {
        match self.transport() {
            Some(t) => properties::get_string(&t, self.timeout(), name, default).await,
            None => default.to_owned(),
        }
    }

    async fn get_opt_string(&self, name: &str) -> Option<String> {
        match self.transport() {
            Some(t) => properties::get_opt_string(&t, self.timeout(), name).await,
            None => None,
        }
    }

    async fn get_pixmaps(&self, name: &str) -> Option<Vec<IconPixmap>> {
        match self.transport() {
            Some(t) => properties::get_pixmaps(&t, self.timeout(), name).await,
            None => None,
        }
    }
}

impl Drop for SnItem {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}

impl ItemInner {
    async fn attach(self: Arc<Self>, connection: zbus::Connection) -> Result<()> {
        let transport = BusTransport::new(connection.clone(), &self.config).await?;

        // Client libraries emit these signals under inconsistent path
        // conventions, so the subscription can't filter on path or sender;
        // everything on the interface arrives here and the router sorts it
        // out per message.
        let rule = zbus::MatchRule::builder()
            .msg_type(zbus::message::Type::Signal)
            .interface(SNI_INTERFACE)?
            .build();
        let stream = zbus::MessageStream::for_match_rule(rule, &connection, Some(64)).await?;

        let router = tokio::spawn({
            let inner = self.clone();
            async move { inner.route_signals(stream).await }
        });

        let mut remote = self.remote.lock().unwrap();
        if self.destroyed.load(Ordering::SeqCst) {
            // Lost the race against destroy(); don't resurrect.
            router.abort();
            return Ok(());
        }
        *remote = Some(Remote { transport, router });
        drop(remote);

        self.ready.store(true, Ordering::SeqCst);
        let _ = self.events.send(ItemEvent::Ready);
        Ok(())
    }

    async fn route_signals(&self, mut stream: zbus::MessageStream) {
        while let Some(msg) = stream.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    log::debug!("signal stream error for {}: {}", self.config.bus_name, e);
                    continue;
                }
            };
            let header = msg.header();
            let Some(member) = header.member() else { continue };
            let Some(sender) = header.sender() else { continue };
            let member = member.as_str().to_owned();
            let sender = sender.as_str().to_owned();
            let status_arg =
                if member == "NewStatus" { msg.body().deserialize::<String>().ok() } else { None };
            self.handle_signal(&sender, &member, status_arg);
        }
    }

    fn handle_signal(&self, sender: &str, member: &str, status_arg: Option<String>) {
        if sender != self.config.bus_name {
            // The wildcard subscription sees every tray item on the bus.
            return;
        }
        match signal::classify(member) {
            SignalKind::Icon => self.icon_debounce.schedule(self.events.clone()),
            SignalKind::Status => {
                let Some(status) = status_arg else {
                    log::debug!("NewStatus from {} carried no status", sender);
                    return;
                };
                // Appindicator items fire NewStatus while disposing, after
                // their properties already stopped resolving; the cached
                // value keeps status() answering through that window.
                *self.cached_status.lock().unwrap() = status;
                let _ = self.events.send(ItemEvent::UpdateStatus);
            }
            SignalKind::Menu => {} // reserved for UpdateMenu
            SignalKind::Tooltip => {
                let _ = self.events.send(ItemEvent::UpdateTooltip);
            }
            SignalKind::Ignored => {}
        }
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        self.icon_debounce.cancel();
        let remote = self.remote.lock().unwrap().take();
        if let Some(remote) = remote {
            // Aborting the router drops the message stream, which detaches
            // the match rule from the bus.
            remote.router.abort();
            log::debug!("detached from {}", self.config.bus_name);
        }
        self.ready.store(false, Ordering::SeqCst);
    }
}
