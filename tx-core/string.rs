//! A growable byte string.
//!
//! File contents are not guaranteed to be UTF-8, so text moved around by the
//! editor (selections copied into variables, substrings of a buffer) is kept
//! as raw bytes. Positions are byte offsets; `None` in place of a position
//! means "at the end".

use std::{
  borrow::Cow,
  fmt,
  ops::{
    Deref,
    Range,
  },
};

use crate::{
  Error,
  Result,
};

#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString {
  data: Vec<u8>,
}

impl ByteString {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.data
  }

  pub fn to_string_lossy(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.data)
  }

  fn check_pos(&self, pos: usize) -> Result<()> {
    if pos > self.data.len() {
      return Err(Error::OutOfRange {
        pos,
        len: self.data.len(),
      });
    }
    Ok(())
  }

  /// Makes room for `additional` more bytes, so that inserting that many
  /// afterwards cannot fail on allocation.
  pub fn reserve(&mut self, additional: usize) -> Result<()> {
    self.data.try_reserve(additional)?;
    Ok(())
  }

  /// Inserts a single byte at `pos`, or appends it when `pos` is `None`.
  pub fn insert_char(&mut self, pos: Option<usize>, byte: u8) -> Result<()> {
    let pos = pos.unwrap_or(self.data.len());
    self.check_pos(pos)?;
    self.data.try_reserve(1)?;
    self.data.insert(pos, byte);
    Ok(())
  }

  /// Inserts `bytes` at `pos` (or appends them), keeping their order.
  pub fn insert_bytes(&mut self, pos: Option<usize>, bytes: &[u8]) -> Result<()> {
    let pos = pos.unwrap_or(self.data.len());
    self.check_pos(pos)?;
    self.data.try_reserve(bytes.len())?;
    self.data.splice(pos..pos, bytes.iter().copied());
    Ok(())
  }

  /// Removes the bytes in `range`.
  pub fn remove(&mut self, range: Range<usize>) -> Result<()> {
    self.check_pos(range.end)?;
    if range.start > range.end {
      return Err(Error::OutOfRange {
        pos: range.start,
        len: self.data.len(),
      });
    }
    self.data.drain(range);
    Ok(())
  }

  pub fn truncate(&mut self, pos: usize) -> Result<()> {
    self.check_pos(pos)?;
    self.data.truncate(pos);
    Ok(())
  }

  /// Copies `len` bytes starting at `start`, or everything from `start` when
  /// `len` is `None`.
  pub fn substring(&self, start: usize, len: Option<usize>) -> Result<ByteString> {
    self.check_pos(start)?;
    let end = match len {
      Some(len) => {
        let end = start.saturating_add(len);
        self.check_pos(end)?;
        end
      },
      None => self.data.len(),
    };
    Ok(ByteString::from(&self.data[start..end]))
  }
}

impl Deref for ByteString {
  type Target = [u8];

  fn deref(&self) -> &[u8] {
    &self.data
  }
}

impl AsRef<[u8]> for ByteString {
  fn as_ref(&self) -> &[u8] {
    &self.data
  }
}

impl From<Vec<u8>> for ByteString {
  fn from(data: Vec<u8>) -> Self {
    Self { data }
  }
}

impl From<&[u8]> for ByteString {
  fn from(data: &[u8]) -> Self {
    Self {
      data: data.to_vec(),
    }
  }
}

impl From<&str> for ByteString {
  fn from(s: &str) -> Self {
    Self::from(s.as_bytes())
  }
}

impl From<String> for ByteString {
  fn from(s: String) -> Self {
    Self::from(s.into_bytes())
  }
}

impl fmt::Debug for ByteString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self.to_string_lossy())
  }
}

impl fmt::Display for ByteString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_string_lossy())
  }
}
