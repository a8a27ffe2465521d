//! Application state for the interactive prompt.

use std::io::{
  BufRead,
  Write,
};

use anyhow::Result;
use tx_lib::{
  Bound,
  Editor,
  Error,
  Side,
};

use crate::{
  command::{
    self,
    Command,
    HELP,
  },
  render,
};

const PROMPT: &str = "tx> ";

pub struct Ctx {
  pub editor:      Editor,
  /// Lines shown per side by `show`.
  pub lines:       usize,
  pub tab_width:   usize,
  pub should_quit: bool,
}

impl Ctx {
  pub fn new(editor: Editor, lines: usize, tab_width: usize) -> Self {
    Self {
      editor,
      lines,
      tab_width,
      should_quit: false,
    }
  }

  /// Reads commands from `input` until `quit` or end of input. Command
  /// failures are reported on `out` and do not stop the loop.
  pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut line = String::new();

    while !self.should_quit {
      write!(out, "{PROMPT}")?;
      out.flush()?;

      line.clear();
      if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        break;
      }

      match command::parse(&line) {
        Ok(Some(command)) => self.execute(command, out)?,
        Ok(None) => {},
        Err(err) => writeln!(out, "{err}")?,
      }
    }

    Ok(())
  }

  /// Runs one command. Only errors writing to `out` are returned.
  pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
    log::debug!("command {command:?}");

    let result = match command {
      Command::Bound { side, bound, expr } if expr.is_empty() => {
        match self.editor.bound_text(side, bound) {
          Some(text) => writeln!(out, "{text}")?,
          None => writeln!(out, "(unset)")?,
        }
        Ok(())
      },
      Command::Bound { side, bound, expr } => {
        match self.editor.set_bound(side, bound, &expr) {
          Err(Error::Parse(err)) => {
            render::print_parse_error(out, &expr, &err)?;
            Ok(())
          },
          result => result,
        }
      },
      Command::Read(name) => self.editor.read(&name),
      Command::Write(name) => self.editor.write(&name),
      Command::Insert(text) => self.editor.insert(&text),
      Command::Overwrite(text) => self.editor.overwrite(&text),
      Command::Erase => self.editor.erase(),
      Command::Save => self.editor.save(),
      Command::Show => {
        self.show(out)?;
        Ok(())
      },
      Command::Vars => {
        for (name, value) in self.editor.variables().iter() {
          writeln!(out, "{name} = {value:?}")?;
        }
        Ok(())
      },
      Command::Help => {
        writeln!(out, "{HELP}")?;
        Ok(())
      },
      Command::Quit => {
        self.should_quit = true;
        Ok(())
      },
    };

    if let Err(err) = result {
      log::debug!("command failed: {err}");
      writeln!(out, "error: {err}")?;
    }
    Ok(())
  }

  fn show(&self, out: &mut impl Write) -> Result<()> {
    for (side, title) in [(Side::Source, "source"), (Side::Destination, "destination")] {
      let start = self.editor.bound_text(side, Bound::Start);
      let end = self.editor.bound_text(side, Bound::End);
      writeln!(
        out,
        "-- {title} [{} .. {}]",
        start.as_deref().unwrap_or("-"),
        end.as_deref().unwrap_or("-")
      )?;

      match self.editor.snippet(side, self.lines) {
        Ok(snippet) => render::print_snippet(out, &snippet, self.tab_width)?,
        Err(err) => writeln!(out, "error: {err}")?,
      }
    }
    Ok(())
  }
}
