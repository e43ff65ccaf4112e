#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    /// An operation was issued through a handle whose engine resource has
    /// already been released.
    #[fail(display = "Handle has been destroyed or was never created.")]
    InvalidHandleUse,
    #[fail(display = "Invalid parameter: {}", _0)]
    InvalidParameter(String),
    #[fail(display = "Clipboard is unavailable: {}", _0)]
    ClipboardUnavailable(String),
    #[fail(display = "Audio device is unavailable: {}", _0)]
    DeviceUnavailable(String),
    #[fail(display = "{}", _0)]
    Malformed(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

#[macro_export]
macro_rules! invalid_parameter {
    ($fmt:expr) => {
        $crate::errors::Error::InvalidParameter($fmt.to_owned())
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::InvalidParameter(format!($fmt, $($arg)+))
    };
}
