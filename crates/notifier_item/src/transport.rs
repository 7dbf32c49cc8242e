use zbus::zvariant::OwnedValue;

use crate::config::ItemConfig;
use crate::error::Result;

pub(crate) const SNI_INTERFACE: &str = "org.kde.StatusNotifierItem";

/// Arguments of the remote methods we invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MethodArgs {
    /// `(x, y)` pointer coordinates.
    Coords(i32, i32),
    /// `(delta, orientation)`.
    Scroll(i32, String),
}

/// The bus-facing edge of the proxy.
///
/// Everything the item logic wants from the remote side goes through here:
/// property reads, method calls whose outcome matters, and method calls
/// nobody waits for.
pub(crate) trait ItemTransport {
    /// `org.freedesktop.DBus.Properties.Get` on the item's interface.
    async fn get_property(&self, name: &str) -> zbus::Result<OwnedValue>;

    /// Invoke a method on the item and wait for the reply.
    async fn call(&self, method: &str, args: MethodArgs) -> zbus::Result<()>;

    /// Invoke a method on the item without observing its completion or
    /// result.
    fn dispatch(&self, method: &'static str, args: MethodArgs);
}

/// [`ItemTransport`] over a live zbus connection.
#[derive(Clone)]
pub(crate) struct BusTransport {
    connection: zbus::Connection,
    properties: zbus::fdo::PropertiesProxy<'static>,
    bus_name: String,
    object_path: String,
}

impl BusTransport {
    pub(crate) async fn new(connection: zbus::Connection, config: &ItemConfig) -> Result<Self> {
        let properties = zbus::fdo::PropertiesProxy::builder(&connection)
            .destination(config.bus_name.clone())?
            .path(config.object_path.clone())?
            .cache_properties(zbus::proxy::CacheProperties::No)
            .build()
            .await?;

        Ok(BusTransport {
            connection,
            properties,
            bus_name: config.bus_name.clone(),
            object_path: config.object_path.clone(),
        })
    }
}

impl ItemTransport for BusTransport {
    async fn get_property(&self, name: &str) -> zbus::Result<OwnedValue> {
        let interface = zbus::names::InterfaceName::from_static_str_unchecked(SNI_INTERFACE);
        Ok(self.properties.get(interface, name).await?)
    }

    async fn call(&self, method: &str, args: MethodArgs) -> zbus::Result<()> {
        match args {
            MethodArgs::Coords(x, y) => {
                self.connection
                    .call_method(
                        Some(self.bus_name.as_str()),
                        self.object_path.as_str(),
                        Some(SNI_INTERFACE),
                        method,
                        &(x, y),
                    )
                    .await?;
            }
            MethodArgs::Scroll(delta, orientation) => {
                self.connection
                    .call_method(
                        Some(self.bus_name.as_str()),
                        self.object_path.as_str(),
                        Some(SNI_INTERFACE),
                        method,
                        &(delta, orientation.as_str()),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    fn dispatch(&self, method: &'static str, args: MethodArgs) {
        let transport = self.clone();
        tokio::spawn(async move {
            let _ = transport.call(method, args).await;
        });
    }
}
