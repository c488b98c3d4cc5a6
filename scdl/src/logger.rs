use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata, Record};

pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Installs the logger. Calling it twice keeps the first logger and only updates the level.
    pub fn init(level: LevelFilter) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match log::max_level() {
            LevelFilter::Off => (),
            LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => match record.level() {
                Level::Info => eprintln!("{}", record.args()),
                _ => eprintln!("{} {}", label(record.level()), record.args()),
            },
            LevelFilter::Debug | LevelFilter::Trace => {
                let location = match (record.file(), record.line()) {
                    (Some(file), Some(line)) => format!("[{}:{}]", file, line).dimmed(),
                    _ => "[unk]".dimmed(),
                };

                eprintln!(
                    "{} {} {} {}",
                    label(record.level()),
                    record.target().dimmed(),
                    location,
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Debug => "[DEBUG]".bold().blue(),
        Level::Error => "[ERROR]".bold().red(),
        Level::Info => "[INFO]".bold().green(),
        Level::Trace => "[TRACE]".bold().purple(),
        Level::Warn => "[WARN]".bold().yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_their_level() {
        colored::control::set_override(false);
        assert_eq!(label(Level::Warn).to_string(), "[WARN]");
        assert_eq!(label(Level::Error).to_string(), "[ERROR]");
    }
}
