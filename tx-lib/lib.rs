//! Text buffers addressed by location expressions.
//!
//! Positions inside a [`Buffer`] are never typed in as raw byte offsets.
//! Instead the user writes a [`Telex`] (text location expression) such as
//! `12#5` (line 12, column 5), `+3` (three lines down) or `"fn main"` (the
//! next match of a pattern), and the buffer resolves it against its content.
//!
//! - [`telex`]: the expression types, parser and evaluator.
//! - [`buffer`]: file-backed byte content and the operations that consume
//!   resolved positions.
//! - [`snippet`]: render-ready windows of lines with selection highlighting.
//! - [`variables`]: named storage for text moved between selections.
//! - [`editor`]: the editing session tying a source and a destination view
//!   of one file together.

pub mod buffer;
pub mod editor;
pub mod error;
pub mod snippet;
pub mod telex;
pub mod variables;

pub use buffer::Buffer;
pub use editor::{
  Bound,
  Editor,
  Selection,
  Side,
};
pub use error::{
  Error,
  Result,
};
pub use snippet::{
  Line,
  Snippet,
};
pub use telex::{
  Direction,
  ParseError,
  ParseErrorKind,
  Step,
  StepKind,
  Telex,
};
pub use tx_core::ByteString;
pub use variables::Variables;
