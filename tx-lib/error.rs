use std::{
  collections::TryReserveError,
  io,
};

use thiserror::Error;

use crate::telex::ParseError;

/// Represents all possible errors that can occur in `tx-lib`.
#[derive(Debug, Error)]
pub enum Error {
  /// A caller passed something the operation cannot work with.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("out of memory")]
  OutOfMemory,

  /// Malformed expression text; the offset points into the input.
  #[error("parse error: {0}")]
  Parse(#[from] ParseError),

  /// A position lies outside the buffer, or an expression matched nothing.
  #[error("position out of range")]
  Range,

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

impl From<tx_core::Error> for Error {
  fn from(err: tx_core::Error) -> Self {
    match err {
      tx_core::Error::OutOfRange { .. } => Self::Range,
      tx_core::Error::OutOfMemory => Self::OutOfMemory,
      tx_core::Error::Io(err) => Self::Io(err),
    }
  }
}

impl From<TryReserveError> for Error {
  fn from(_: TryReserveError) -> Self {
    Self::OutOfMemory
  }
}

pub type Result<T> = std::result::Result<T, Error>;
