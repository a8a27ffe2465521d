//! Text location expressions.
//!
//! A [`Telex`] is a sequence of [`Step`]s. Each step takes the position
//! produced by the previous one and turns it into a new position, so the
//! expression `12#5` first moves to the start of line 12 and then to its
//! fifth column.
//!
//! # Syntax
//!
//! | Text      | Step |
//! |-----------|------|
//! | `12`      | start of line 12 (`0` is the last line) |
//! | `+3`/`-3` | start of the line 3 lines below/above |
//! | `#5`      | column 5 of the current line (`#0` is the end of the line) |
//! | `+#2`     | 2 bytes to the right, without leaving the line |
//! | `"pat"`   | start of the next match of the pattern (`\` escapes any character) |
//!
//! Atoms are written back to back without separators. A `+`/`-` applies to
//! the atom directly following it only.
//!
//! # Example
//!
//! ```
//! use tx_lib::telex::Telex;
//!
//! let text = b"line1\nline2\nline3\n";
//! let telex = Telex::parse("2#3").unwrap();
//! assert_eq!(telex.lookup(text, 0), Some(8));
//! assert_eq!(telex.to_string(), "2#3");
//! ```

mod lookup;
mod parse;

use std::fmt;

pub use lookup::lookup_multi;
pub use parse::{
  ParseError,
  ParseErrorKind,
};

use crate::{
  Error,
  Result,
};

/// Whether a step's magnitude is an absolute index or a relative movement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Backward,
  #[default]
  Absolute,
  Forward,
}

impl Direction {
  pub const fn sign(self) -> i8 {
    match self {
      Self::Backward => -1,
      Self::Absolute => 0,
      Self::Forward => 1,
    }
  }

  pub const fn is_relative(self) -> bool {
    !matches!(self, Self::Absolute)
  }

  const fn prefix(self) -> &'static str {
    match self {
      Self::Backward => "-",
      Self::Absolute => "",
      Self::Forward => "+",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKind {
  Line(u64),
  Column(u64),
  Regex(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
  pub direction: Direction,
  pub kind:      StepKind,
}

impl Step {
  pub fn line(direction: Direction, number: u64) -> Self {
    Self {
      direction,
      kind: StepKind::Line(number),
    }
  }

  pub fn column(direction: Direction, number: u64) -> Self {
    Self {
      direction,
      kind: StepKind::Column(number),
    }
  }

  pub fn regex(direction: Direction, pattern: impl Into<String>) -> Self {
    Self {
      direction,
      kind: StepKind::Regex(pattern.into()),
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.direction.prefix())?;
    match &self.kind {
      StepKind::Line(number) => write!(f, "{number}"),
      StepKind::Column(number) => write!(f, "#{number}"),
      StepKind::Regex(pattern) => {
        f.write_str("\"")?;
        for ch in pattern.chars() {
          if matches!(ch, '"' | '\\') {
            f.write_str("\\")?;
          }
          write!(f, "{ch}")?;
        }
        f.write_str("\"")
      },
    }
  }
}

/// A parsed location expression. Always holds at least one step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Telex {
  steps: Vec<Step>,
}

impl Telex {
  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn first(&self) -> &Step {
    &self.steps[0]
  }

  /// An absolute expression resolves the same way from any reference
  /// position; a relative one continues from wherever it is applied.
  pub fn is_absolute(&self) -> bool {
    !self.first().direction.is_relative()
  }

  /// Concatenates `tail` onto this expression if the combination still
  /// resolves against `data` from `reference`. Leaves `self` untouched
  /// otherwise.
  ///
  /// A tail starting with an absolute line cannot follow a step that ends
  /// in digits: the two numbers would print as one.
  pub fn try_append(&mut self, tail: &Telex, data: &[u8], reference: usize) -> Result<()> {
    let absolute_line = matches!(
      tail.first(),
      Step {
        direction: Direction::Absolute,
        kind:      StepKind::Line(_),
      }
    );
    if absolute_line && self.ends_in_digits() {
      return Err(Error::InvalidArgument(format!(
        "'{tail}' cannot follow '{self}' without a sign"
      )));
    }
    if lookup_multi(data, reference, &[&*self, tail]).is_none() {
      return Err(Error::Range);
    }
    self.steps.extend(tail.steps.iter().cloned());
    Ok(())
  }

  fn ends_in_digits(&self) -> bool {
    self
      .steps
      .last()
      .is_some_and(|step| !matches!(step.kind, StepKind::Regex(_)))
  }
}

impl From<Step> for Telex {
  fn from(step: Step) -> Self {
    Self { steps: vec![step] }
  }
}

impl fmt::Display for Telex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.steps.iter().try_for_each(|step| write!(f, "{step}"))
  }
}
