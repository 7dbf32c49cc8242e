use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("dbus connection error")]
    Bus(#[from] zbus::Error),
    #[error("item address {0:?} was not understood")]
    Address(String),
}

pub type Result<T> = std::result::Result<T, Error>;
