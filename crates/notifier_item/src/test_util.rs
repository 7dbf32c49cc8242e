//! Shared test doubles. Everything protocol-shaped in this crate funnels
//! through [`ItemTransport`], so tests script a transport instead of a bus.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;

use zbus::zvariant::{Array, OwnedValue, StructureBuilder, Type, Value};

use crate::properties::IconPixmap;
use crate::transport::{ItemTransport, MethodArgs};

/// Scripted outcome of one property read.
pub(crate) enum Reply {
    Value(OwnedValue),
    UnknownProperty,
    InvalidArgs,
    Failure,
    /// Never resolves; exercises the read timeout.
    Hang,
}

impl Reply {
    pub(crate) fn string(s: &str) -> Reply {
        Reply::Value(OwnedValue::try_from(Value::from(s)).unwrap())
    }

    pub(crate) fn bool(b: bool) -> Reply {
        Reply::Value(OwnedValue::try_from(Value::from(b)).unwrap())
    }

    pub(crate) fn object_path(path: &str) -> Reply {
        let path = zbus::zvariant::ObjectPath::try_from(path.to_owned()).unwrap();
        Reply::Value(OwnedValue::try_from(Value::ObjectPath(path)).unwrap())
    }

    pub(crate) fn pixmaps(pixmaps: Vec<IconPixmap>) -> Reply {
        let mut array = Array::new(<IconPixmap as Type>::signature());
        for (width, height, data) in pixmaps {
            let entry = StructureBuilder::new()
                .add_field(width)
                .add_field(height)
                .add_field(Array::from(data))
                .build();
            array.append(Value::Structure(entry)).unwrap();
        }
        Reply::Value(OwnedValue::try_from(Value::Array(array)).unwrap())
    }
}

/// [`ItemTransport`] that records traffic and serves scripted replies.
///
/// Reads consume replies in FIFO order per property; a read with nothing
/// scripted reports unknown-property, which is what a vanished item does.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    pub(crate) reads: AtomicUsize,
    pub(crate) calls: Mutex<Vec<(String, MethodArgs)>>,
    pub(crate) dispatched: Mutex<Vec<(String, MethodArgs)>>,
    pub(crate) fail_calls: bool,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn reply(self, name: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().entry(name.to_owned()).or_default().push_back(reply);
        self
    }

    pub(crate) fn failing_calls(mut self) -> Self {
        self.fail_calls = true;
        self
    }
}

impl ItemTransport for MockTransport {
    async fn get_property(&self, name: &str) -> zbus::Result<OwnedValue> {
        self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(name)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Reply::UnknownProperty);
        match reply {
            Reply::Value(value) => Ok(value),
            Reply::UnknownProperty => Err(zbus::Error::FDO(Box::new(zbus::fdo::Error::UnknownProperty(
                format!("unknown property {}", name),
            )))),
            Reply::InvalidArgs => Err(zbus::Error::FDO(Box::new(zbus::fdo::Error::InvalidArgs(
                format!("no such property {}", name),
            )))),
            Reply::Failure => Err(zbus::Error::Failure("remote side fell over".into())),
            Reply::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn call(&self, method: &str, args: MethodArgs) -> zbus::Result<()> {
        self.calls.lock().unwrap().push((method.to_owned(), args));
        if self.fail_calls {
            Err(zbus::Error::Failure("call refused".into()))
        } else {
            Ok(())
        }
    }

    fn dispatch(&self, method: &'static str, args: MethodArgs) {
        self.dispatched.lock().unwrap().push((method.to_owned(), args));
    }
}
