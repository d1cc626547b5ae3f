//! Errors raised by lookups that require a key to be present.

use std::error;
use std::fmt;
use std::result;

/// Raised when an operation that requires a key finds it missing from the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyError;

impl error::Error for KeyError {}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "key not found")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A checked lookup was made for a key that is not in the tree.
    OutOfRange,
    Key(KeyError),
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Error {
        Error::Key(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::OutOfRange => None,
            Error::Key(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfRange => write!(f, "invalid key"),
            Error::Key(error) => write!(f, "{}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
