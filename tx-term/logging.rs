use std::path::Path;

use log::LevelFilter;

/// Sends log records to `log_file`. The level starts at `Warn` and each `-v`
/// lowers it one step.
pub fn setup_logging(verbosity: u8, log_file: &Path) -> Result<(), fern::InitError> {
  let level = match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level)
    .chain(fern::log_file(log_file)?)
    .apply()?;

  Ok(())
}
