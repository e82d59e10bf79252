use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::Context, Result};
use colored::Colorize;
use log::{debug, info, warn};

use crate::{privilege::Privilege, receipts::ReceiptDatabase, utils::volume_path};

// What has been (or would have been, on a dry run) removed for a package
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub name: String,
    pub identifier: String,
    pub removed_files: Vec<Utf8PathBuf>,
    pub removed_dirs: Vec<Utf8PathBuf>,
}

pub struct Uninstaller<D: ReceiptDatabase> {
    db: D,
    volume: Utf8PathBuf,
    privilege: Privilege,
    dry_run: bool,
}

impl<D: ReceiptDatabase> Uninstaller<D> {
    pub fn new(
        db: D,
        volume: &Utf8Path,
        privilege: Privilege,
        dry_run: bool,
    ) -> Self {
        Self {
            db,
            volume: volume.to_owned(),
            privilege,
            dry_run,
        }
    }

    #[cfg(test)]
    pub fn database(&self) -> &D {
        &self.db
    }

    // Packages that are not installed are skipped
    pub fn remove_all<'n>(
        &mut self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Result<Vec<RemovalReport>> {
        let mut reports = Vec::new();
        for name in names {
            if let Some(report) = self.remove_package(name)? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    pub fn remove_package(
        &mut self,
        name: &str,
    ) -> Result<Option<RemovalReport>> {
        let Some(identifier) = self
            .db
            .find_identifier(name)
            .with_context(|| format!("unable to look up the package {name}"))?
        else {
            debug!("No package matching {name} is installed, skipping");
            return Ok(None);
        };

        info!("Uninstalling: {}", name.italic().blue());
        debug!("Found package identifier {identifier}");

        let mut report = RemovalReport {
            name: name.to_string(),
            identifier: identifier.clone(),
            ..Default::default()
        };

        let files = self
            .db
            .files(&identifier)
            .with_context(|| format!("unable to list the files of {identifier}"))?;
        for file in files {
            let path = volume_path(&self.volume, &file);
            if !path.is_file() {
                continue;
            }
            if self.dry_run {
                info!("Would remove {}", path.as_str().yellow().bold());
            } else if let Err(err) = self.privilege.remove_file(&path) {
                warn!("{err:#}");
                continue;
            } else {
                debug!("Removed {}", path.as_str().yellow().bold());
            }
            report.removed_files.push(path);
        }

        let mut dirs = self
            .db
            .directories(&identifier)
            .with_context(|| format!("unable to list the directories of {identifier}"))?;
        // Reverse order puts every child before its parent
        dirs.sort_unstable_by(|a, b| b.cmp(a));
        for dir in dirs {
            let path = volume_path(&self.volume, &dir);
            if !path.is_dir() {
                continue;
            }
            if self.dry_run {
                if is_empty_dir(&path) {
                    info!("Would remove {}", path.as_str().yellow().bold());
                    report.removed_dirs.push(path);
                }
                continue;
            }
            // Non empty directories are shared with other packages, keep them
            if self.privilege.remove_dir(&path).is_ok() {
                debug!("Removed {}", path.as_str().yellow().bold());
                report.removed_dirs.push(path);
            }
        }

        if self.dry_run {
            info!("Would forget {}", identifier.bold());
        } else {
            self.db
                .forget(&identifier)
                .with_context(|| format!("unable to forget the package {identifier}"))?;
        }

        Ok(Some(report))
    }
}

// Dry runs never empty a directory, so a parent whose only content is
// directories that would be removed is not reported
fn is_empty_dir(path: &Utf8Path) -> bool {
    path.read_dir_utf8()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
