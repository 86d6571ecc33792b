//! Error type shared by every driver

use embedded_hal::digital::ErrorKind;

/// Everything that can go wrong while driving the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A pin read or write failed
    #[error("line fault: {0}")]
    Line(ErrorKind),
    /// A credential string was not exactly 4 ASCII digits
    #[error("credential must be exactly 4 ASCII digits")]
    InvalidCredential,
}

/// Crate-wide result alias
pub type Result<T> = core::result::Result<T, Error>;

/// Turn any pin error into an [`Error::Line`], keeping only its [`ErrorKind`]
pub(crate) fn line<E: embedded_hal::digital::Error>(err: E) -> Error {
    Error::Line(err.kind())
}
