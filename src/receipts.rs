use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::{ensure, Context, Result};
use log::debug;

use crate::{privilege::Privilege, utils::output_lines};

// The package receipt database of a volume
pub trait ReceiptDatabase {
    fn packages(&self) -> Result<Vec<String>>;
    fn files(
        &self,
        identifier: &str,
    ) -> Result<Vec<Utf8PathBuf>>;
    fn directories(
        &self,
        identifier: &str,
    ) -> Result<Vec<Utf8PathBuf>>;
    fn forget(
        &mut self,
        identifier: &str,
    ) -> Result<()>;

    // An identifier ending with the name wins over the first one containing
    // it, so that libevt does not pick up the libevtx receipt
    fn find_identifier(
        &self,
        name: &str,
    ) -> Result<Option<String>> {
        let packages = self.packages()?;
        let exact = packages
            .iter()
            .position(|identifier| identifier.rsplit('.').next() == Some(name));

        Ok(match exact {
            Some(index) => packages.into_iter().nth(index),
            None => packages
                .into_iter()
                .find(|identifier| identifier.contains(name)),
        })
    }
}

pub struct Pkgutil {
    volume: Option<Utf8PathBuf>,
    privilege: Privilege,
}

impl Pkgutil {
    pub fn new(
        volume: &Utf8Path,
        privilege: Privilege,
    ) -> Self {
        Self {
            // pkgutil already defaults to the boot volume
            volume: (volume != Utf8Path::new("/")).then(|| volume.to_owned()),
            privilege,
        }
    }

    fn command(
        &self,
        privilege: Option<Privilege>,
    ) -> Command {
        let mut cmd = match privilege {
            Some(privilege) => privilege.command("pkgutil"),
            None => Command::new("pkgutil"),
        };
        if let Some(volume) = &self.volume {
            cmd.arg("--volume").arg(volume);
        }
        cmd
    }

    fn run(
        mut cmd: Command,
        description: &str,
    ) -> Result<String> {
        debug!("Running {cmd:?}");
        let output = cmd
            .output()
            .with_context(|| format!("unable to run `pkgutil {description}`"))?;
        ensure!(
            output.status.success(),
            "`pkgutil {}` failed: {}",
            description,
            String::from_utf8_lossy(&output.stderr).trim()
        );

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn list_files(
        &self,
        identifier: &str,
        filter: &str,
    ) -> Result<Vec<Utf8PathBuf>> {
        let mut cmd = self.command(None);
        cmd.args(["--files", identifier, filter]);
        let output = Self::run(cmd, &format!("--files {identifier} {filter}"))?;

        Ok(output_lines(&output)
            .into_iter()
            .map(Utf8PathBuf::from)
            .collect())
    }
}

impl ReceiptDatabase for Pkgutil {
    fn packages(&self) -> Result<Vec<String>> {
        let mut cmd = self.command(None);
        cmd.arg("--packages");
        Ok(output_lines(&Self::run(cmd, "--packages")?))
    }

    fn files(
        &self,
        identifier: &str,
    ) -> Result<Vec<Utf8PathBuf>> {
        self.list_files(identifier, "--only-files")
    }

    fn directories(
        &self,
        identifier: &str,
    ) -> Result<Vec<Utf8PathBuf>> {
        self.list_files(identifier, "--only-dirs")
    }

    fn forget(
        &mut self,
        identifier: &str,
    ) -> Result<()> {
        let mut cmd = self.command(Some(self.privilege));
        cmd.args(["--forget", identifier]);
        Self::run(cmd, &format!("--forget {identifier}"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn boot_volume_is_not_passed_to_pkgutil() {
        let pkgutil = Pkgutil::new(Utf8Path::new("/"), Privilege::Root);
        assert!(args(&pkgutil.command(None)).is_empty());
    }

    #[test]
    fn other_volumes_are_passed_to_pkgutil() {
        let pkgutil = Pkgutil::new(Utf8Path::new("/Volumes/Evidence"), Privilege::Root);
        assert_eq!(
            args(&pkgutil.command(None)),
            vec!["--volume", "/Volumes/Evidence"]
        );
    }

    #[test]
    fn forget_goes_through_sudo() {
        let pkgutil = Pkgutil::new(Utf8Path::new("/"), Privilege::Sudo);
        let cmd = pkgutil.command(Some(Privilege::Sudo));
        assert_eq!(cmd.get_program(), "sudo");
        assert_eq!(args(&cmd), vec!["pkgutil"]);
    }

    struct Listing(Vec<&'static str>);

    impl ReceiptDatabase for Listing {
        fn packages(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }

        fn files(
            &self,
            _identifier: &str,
        ) -> Result<Vec<Utf8PathBuf>> {
            Ok(Vec::new())
        }

        fn directories(
            &self,
            _identifier: &str,
        ) -> Result<Vec<Utf8PathBuf>> {
            Ok(Vec::new())
        }

        fn forget(
            &mut self,
            _identifier: &str,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn identifier_is_found_by_substring() {
        let db = Listing(vec![
            "com.apple.pkg.Core",
            "com.github.log2timeline.plaso",
            "com.github.log2timeline.plaso.data",
        ]);
        assert_eq!(
            db.find_identifier("plaso").unwrap().as_deref(),
            Some("com.github.log2timeline.plaso")
        );
        assert_eq!(db.find_identifier("libewf").unwrap(), None);
    }

    #[test]
    fn identifier_ending_with_the_name_is_preferred() {
        let db = Listing(vec![
            "com.github.libyal.libevtx",
            "com.github.libyal.libevt",
            "org.python.pytz-data",
        ]);
        assert_eq!(
            db.find_identifier("libevt").unwrap().as_deref(),
            Some("com.github.libyal.libevt")
        );
        assert_eq!(
            db.find_identifier("libevtx").unwrap().as_deref(),
            Some("com.github.libyal.libevtx")
        );
        assert_eq!(
            db.find_identifier("pytz").unwrap().as_deref(),
            Some("org.python.pytz-data")
        );
    }
}
