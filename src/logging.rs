use fern::{Dispatch, InitError};
use log::{Level, LevelFilter, Record};
use std::io;
use yansi::Paint;

pub fn setup_logging(filter: LevelFilter) -> Result<(), InitError> {
    let format_level = |record: &Record| match record.level() {
        level @ Level::Trace => Paint::green(level).bold(),
        level @ Level::Warn => Paint::yellow(level).bold(),
        level @ Level::Error => Paint::red(level).bold(),
        level => Paint::new(level).bold(),
    };

    Dispatch::new()
        // Exclude logs for crates that we use
        .level(LevelFilter::Off)
        // Include only the logs for this binary
        .level_for("fedora_media_check", filter)
        .format(move |out, message, record| {
            out.finish(format_args!("[{:5}] {}", format_level(record), message))
        })
        .chain(io::stderr())
        .apply()?;

    Ok(())
}
