use color_eyre::{eyre::Context, Result};
use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

pub struct SimpleLogger {
    pub quiet: bool,
    pub verbose: bool,
}

impl SimpleLogger {
    pub fn init(
        quiet: bool,
        verbose: bool,
    ) -> Result<()> {
        let logger = Self { quiet, verbose };
        let level = logger.max_level();
        log::set_boxed_logger(Box::new(logger)).context("unable to set the logger")?;
        log::set_max_level(level);

        Ok(())
    }

    fn max_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

impl log::Log for SimpleLogger {
    fn enabled(
        &self,
        metadata: &Metadata,
    ) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(
        &self,
        record: &Record,
    ) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => eprintln!("{}: {}", "ERROR".red().bold(), record.args()),
                Level::Warn => eprintln!("{}: {}", "WARNING".yellow().bold(), record.args()),
                Level::Info => println!("{}", record.args()),
                Level::Debug => println!("{} {}", ">>>".bright_black(), record.args()),
                Level::Trace => {}
            }
        }
    }

    fn flush(&self) {}
}
