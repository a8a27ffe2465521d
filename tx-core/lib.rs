//! Byte-level primitives shared by the rest of the workspace.
//!
//! - [`string::ByteString`]: a growable byte sequence with positional
//!   insert/remove/truncate/substring primitives.
//! - [`file::File`]: an open file with whole-file read and write, shared
//!   between buffers through an `Arc`.
//! - [`chars`]: line-ending scanning over raw bytes.

pub mod chars;
pub mod file;
pub mod string;

use std::{
  collections::TryReserveError,
  io,
};

use thiserror::Error;

pub use file::File;
pub use string::ByteString;

/// Permission bits applied to files created by [`File::open`].
pub const DEFAULT_FILE_MODE: u32 = 0o600;

#[derive(Debug, Error)]
pub enum Error {
  #[error("position {pos} is out of range (length {len})")]
  OutOfRange { pos: usize, len: usize },
  #[error("out of memory")]
  OutOfMemory,
  #[error(transparent)]
  Io(#[from] io::Error),
}

impl From<TryReserveError> for Error {
  fn from(_: TryReserveError) -> Self {
    Self::OutOfMemory
  }
}

pub type Result<T> = std::result::Result<T, Error>;
