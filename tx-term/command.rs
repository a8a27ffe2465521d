//! Prompt commands.

use anyhow::{
  Result,
  bail,
};
use tx_lib::{
  Bound,
  Side,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Sets a selection bound, or prints it when `expr` is empty.
  Bound {
    side:  Side,
    bound: Bound,
    expr:  String,
  },
  Read(String),
  Write(String),
  Insert(Vec<u8>),
  Overwrite(Vec<u8>),
  Erase,
  Save,
  Show,
  Vars,
  Help,
  Quit,
}

pub const HELP: &str = "\
ss <expr>         set the source start
se <expr>         set the source end
ds <expr>         set the destination start
de <expr>         set the destination end
read <var>        copy the source selection into a variable
write <var>       insert a variable at the destination start
insert <text>     insert text at the destination start
overwrite <text>  replace the destination selection
erase             delete the destination selection
save              write the destination to the file
show              print both selections
vars              list variables
help              print this message
quit              leave

Expressions: 12 (line), #5 (column), +3/-3 (relative), \"re\" (pattern).
Text accepts \\n, \\t and \\\\.";

/// Splits a prompt line into the command and its argument.
fn split(line: &str) -> (&str, &str) {
  const SEPARATOR_PATTERN: [char; 2] = [' ', '\t'];

  let line = line.trim_start();
  match line.split_once(SEPARATOR_PATTERN) {
    Some((command, rest)) => (command, rest),
    None => (line, ""),
  }
}

/// Parses a prompt line. Blank lines give `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
  let line = line.trim_end_matches(['\r', '\n']);
  let (name, arg) = split(line);

  let set = |side, bound| Command::Bound {
    side,
    bound,
    expr: arg.trim().to_string(),
  };

  let command = match name {
    "" => return Ok(None),
    "ss" => set(Side::Source, Bound::Start),
    "se" => set(Side::Source, Bound::End),
    "ds" => set(Side::Destination, Bound::Start),
    "de" => set(Side::Destination, Bound::End),
    "read" => Command::Read(variable(name, arg)?),
    "write" => Command::Write(variable(name, arg)?),
    "insert" => Command::Insert(unescape(arg)),
    "overwrite" => Command::Overwrite(unescape(arg)),
    "erase" => Command::Erase,
    "save" => Command::Save,
    "show" => Command::Show,
    "vars" => Command::Vars,
    "help" | "?" => Command::Help,
    "quit" | "q" => Command::Quit,
    _ => bail!("unknown command '{name}', try 'help'"),
  };

  Ok(Some(command))
}

fn variable(command: &str, arg: &str) -> Result<String> {
  let name = arg.trim();
  if name.is_empty() {
    bail!("'{command}' needs a variable name");
  }
  if name.contains(char::is_whitespace) {
    bail!("variable names cannot contain spaces");
  }
  Ok(name.to_string())
}

/// Expands `\n`, `\t` and `\\`. Any other backslash is kept as is.
pub fn unescape(text: &str) -> Vec<u8> {
  let mut out = Vec::with_capacity(text.len());
  let mut bytes = text.bytes().peekable();

  while let Some(byte) = bytes.next() {
    if byte != b'\\' {
      out.push(byte);
      continue;
    }
    match bytes.peek() {
      Some(b'n') => out.push(b'\n'),
      Some(b't') => out.push(b'\t'),
      Some(b'\\') => out.push(b'\\'),
      _ => {
        out.push(b'\\');
        continue;
      },
    }
    bytes.next();
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bound_commands() {
    assert_eq!(parse("ss 12#5").unwrap(), Some(Command::Bound {
      side:  Side::Source,
      bound: Bound::Start,
      expr:  "12#5".to_string(),
    }));
    assert_eq!(parse("de\n").unwrap(), Some(Command::Bound {
      side:  Side::Destination,
      bound: Bound::End,
      expr:  String::new(),
    }));
  }

  #[test]
  fn text_commands_keep_spacing() {
    assert_eq!(
      parse("insert   two  spaces\\n").unwrap(),
      Some(Command::Insert(b"  two  spaces\n".to_vec()))
    );
    assert_eq!(parse("overwrite").unwrap(), Some(Command::Overwrite(Vec::new())));
  }

  #[test]
  fn variables_and_plain_commands() {
    assert_eq!(parse("read a").unwrap(), Some(Command::Read("a".to_string())));
    assert_eq!(parse("  write b ").unwrap(), Some(Command::Write("b".to_string())));
    assert_eq!(parse("q").unwrap(), Some(Command::Quit));
    assert_eq!(parse("   ").unwrap(), None);

    assert!(parse("read").is_err());
    assert!(parse("read a b").is_err());
    assert!(parse("frobnicate").is_err());
  }

  #[test]
  fn unescape_sequences() {
    assert_eq!(unescape(r"a\nb\tc\\d"), b"a\nb\tc\\d");
    assert_eq!(unescape(r"\x"), b"\\x");
    assert_eq!(unescape("end\\"), b"end\\");
  }
}
