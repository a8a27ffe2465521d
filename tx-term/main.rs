//! Command-line front end for tx.
//!
//! Without a subcommand, opens an interactive prompt on a file in which
//! selections are set with location expressions and text is moved between
//! them. The `lookup` and `snippet` subcommands resolve expressions once
//! and print the result.

mod command;
mod ctx;
mod logging;
mod render;

use std::{
  io::{
    self,
    Write,
  },
  path::{
    Path,
    PathBuf,
  },
};

use anyhow::{
  Context,
  Result,
  bail,
};
use clap::{
  ArgAction,
  Parser,
  Subcommand,
};
use tx_core::chars::line_end;
use tx_lib::{
  Buffer,
  Editor,
  Telex,
};
use tx_loader::Config;

use crate::ctx::Ctx;

#[derive(Debug, Parser)]
#[command(name = "tx", about = "Edit files through text location expressions", version)]
struct Cli {
  #[command(subcommand)]
  command: Option<Command>,

  /// File to edit
  #[arg(value_name = "FILE")]
  file: Option<PathBuf>,

  /// Open the file read-only
  #[arg(short = 'r', long, global = true)]
  readonly: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  config_file: Option<PathBuf>,

  /// Number of lines to show around a selection
  #[arg(short = 'n', long = "lines", value_name = "N", global = true)]
  lines: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the text from the position EXPR resolves to up to the end of its
  /// line
  Lookup {
    #[arg(value_name = "FILE")]
    file: PathBuf,
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    expr: String,
  },
  /// Print the lines between two positions
  Snippet {
    #[arg(value_name = "FILE")]
    file: PathBuf,
    #[arg(value_name = "START", allow_hyphen_values = true)]
    start: String,
    #[arg(value_name = "END", allow_hyphen_values = true)]
    end: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  tx_loader::initialize_config_file(cli.config_file.clone());
  tx_loader::initialize_log_file(cli.log_file.clone());
  logging::setup_logging(cli.verbosity, &tx_loader::log_file())
    .context("failed to initialize logging")?;

  let config = Config::load()?;
  let lines = cli.lines.unwrap_or(config.snippet_lines);
  let mut stdout = io::stdout().lock();

  match cli.command {
    Some(Command::Lookup { file, expr }) => lookup(&mut stdout, &file, &expr),
    Some(Command::Snippet { file, start, end }) => {
      snippet(&mut stdout, &file, &start, &end, lines, config.tab_width)
    },
    None => {
      let Some(file) = cli.file else {
        bail!("no file given, see 'tx --help'");
      };
      let editor = Editor::open(&file, cli.readonly, config.file_default_mode)
        .with_context(|| format!("failed to open {}", file.display()))?;
      log::info!("editing {}", file.display());

      let mut ctx = Ctx::new(editor, lines, config.tab_width);
      ctx.run(&mut io::stdin().lock(), &mut stdout)
    },
  }
}

fn open_readonly(file: &Path) -> Result<Buffer> {
  Buffer::open(file, true).with_context(|| format!("failed to open {}", file.display()))
}

fn parse(expr: &str) -> Result<Telex> {
  Telex::parse(expr).with_context(|| format!("invalid expression '{expr}'"))
}

fn lookup(out: &mut impl Write, file: &Path, expr: &str) -> Result<()> {
  let buffer = open_readonly(file)?;
  let telex = parse(expr)?;

  match telex.lookup(buffer.as_bytes(), 0) {
    Some(pos) => {
      let data = buffer.as_bytes();
      let text = String::from_utf8_lossy(&data[pos..line_end(data, pos)]);
      writeln!(out, "{text}")?;
    },
    None => writeln!(out, "No match")?,
  }
  Ok(())
}

fn snippet(
  out: &mut impl Write,
  file: &Path,
  start: &str,
  end: &str,
  lines: usize,
  tab_width: usize,
) -> Result<()> {
  let buffer = open_readonly(file)?;
  let snippet = buffer.get_snippet_telex(&parse(start)?, &parse(end)?, lines)?;
  render::print_snippet(out, &snippet, tab_width)
}
