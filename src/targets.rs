use camino::Utf8PathBuf;
use color_eyre::eyre::{ensure, ContextCompat, Result};

use crate::targets_config_impl::TargetsConfig;

// The resolved set of packages to uninstall
pub struct Targets {
    pub package: String,
    pub dependencies: Vec<String>,
    pub volume: Utf8PathBuf,
}

impl Targets {
    pub fn new(config: TargetsConfig) -> Result<Targets> {
        let targets = Self {
            package: config.package.context("no package to uninstall")?,
            dependencies: config.dependencies.unwrap_or_default(),
            volume: Utf8PathBuf::from(config.volume.context("no volume set")?),
        };

        targets.check()?;

        Ok(targets)
    }

    fn check(&self) -> Result<()> {
        ensure!(
            !self.package.trim().is_empty(),
            "the package name cannot be empty"
        );
        // An empty name would match every package identifier
        ensure!(
            self.dependencies.iter().all(|d| !d.trim().is_empty()),
            "dependency names cannot be empty"
        );
        ensure!(
            self.volume.is_absolute(),
            "volume {} is not an absolute path",
            self.volume
        );

        Ok(())
    }

    // The main package always comes first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.package.as_str()).chain(self.dependencies.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_start_with_the_main_package() {
        let targets = Targets::new(TargetsConfig::default_config()).unwrap();
        let names: Vec<&str> = targets.names().collect();
        assert_eq!(names[0], "plaso");
        assert_eq!(names[1], "PyYAML");
        assert_eq!(names.last(), Some(&"yara-python"));
    }

    #[test]
    fn relative_volume_is_rejected() {
        let mut config = TargetsConfig::default_config();
        config.volume = Some("Volumes/Data".to_string());
        assert!(Targets::new(config).is_err());
    }

    #[test]
    fn empty_dependency_name_is_rejected() {
        let mut config = TargetsConfig::default_config();
        config.dependencies = Some(vec!["six".to_string(), " ".to_string()]);
        assert!(Targets::new(config).is_err());
    }

    #[test]
    fn missing_dependencies_mean_none() {
        let mut config = TargetsConfig::default_config();
        config.dependencies = None;
        let targets = Targets::new(config).unwrap();
        assert_eq!(targets.names().count(), 1);
    }
}
