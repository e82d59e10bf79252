mod opts_impl;
mod privilege;
mod receipts;
mod simple_logger;
mod targets;
mod targets_config_impl;
mod uninstall;
mod utils;

use clap::Parser;
use color_eyre::eyre::Result;

use opts_impl::Opts;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    color_eyre::install()?;
    let opts = Opts::parse();
    SimpleLogger::init(opts.quiet, opts.verbose)?;

    opts.run()
}
