use clap::Parser;
use color_eyre::{eyre::Context, Result};
use log::{debug, info};

use crate::{
    privilege::Privilege, receipts::Pkgutil, targets::Targets,
    targets_config_impl::TargetsConfig, uninstall::Uninstaller,
};

include!("opts.rs");

impl Opts {
    pub fn run(self) -> Result<()> {
        let config = TargetsConfig::load(self.config.as_deref(), self.targets)?;
        let mut targets = Targets::new(config).context("invalid packages to uninstall")?;
        if self.no_dependencies {
            targets.dependencies.clear();
        }

        // A dry run needs no password, it only reads
        let privilege = if self.dry_run {
            Privilege::current()
        } else {
            Privilege::acquire()?
        };

        let pkgutil = Pkgutil::new(&targets.volume, privilege);
        let mut uninstaller = Uninstaller::new(pkgutil, &targets.volume, privilege, self.dry_run);
        let reports = uninstaller.remove_all(targets.names())?;
        for report in &reports {
            debug!(
                "{} ({}): {} files and {} directories",
                report.name,
                report.identifier,
                report.removed_files.len(),
                report.removed_dirs.len()
            );
        }

        info!("Done.");

        Ok(())
    }
}
