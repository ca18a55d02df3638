//! The error taxonomy shared by every entry point of the context.
//!
//! Errors are never raised as control flow to the client. An entry point that
//! fails records its `Error` in the context (see `Context::get_error`) and
//! returns without touching any state.

use crate::enums::*;

#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[fail(display = "[GL] An unacceptable value is specified for an enumerated argument.")]
    InvalidEnum,
    #[fail(display = "[GL] A numeric argument is out of range.")]
    InvalidValue,
    #[fail(display = "[GL] The specified operation is not allowed in the current state.")]
    InvalidOperation,
}

impl Error {
    /// Returns the numeric error code reported by `glGetError`.
    pub fn code(self) -> GLenum {
        match self {
            Error::InvalidEnum => GL_INVALID_ENUM,
            Error::InvalidValue => GL_INVALID_VALUE,
            Error::InvalidOperation => GL_INVALID_OPERATION,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Returns early with the given `Error` if the condition holds.
macro_rules! fail_if {
    ($cond:expr, $err:ident) => {
        if $cond {
            return Err($crate::errors::Error::$err);
        }
    };
}
