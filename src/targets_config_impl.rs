use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use color_eyre::{
    eyre::{ensure, Context},
    Result,
};
use log::debug;
use serde::Deserialize;
use xdg::BaseDirectories;

include!("targets_config.rs");

pub const DEFAULT_PACKAGE: &str = "plaso";
pub const DEFAULT_VOLUME: &str = "/";
pub const DEFAULT_DEPENDENCIES: &[&str] = &[
    "PyYAML",
    "XlsxWriter",
    "artifacts",
    "bencode",
    "binplist",
    "construct",
    "dateutil",
    "dfdatetime",
    "dfvfs",
    "dfwinreg",
    "dpkt",
    "efilter",
    "future",
    "hachoir-core",
    "hachoir-metadata",
    "hachoir-parser",
    "libbde",
    "libesedb",
    "libevt",
    "libevtx",
    "libewf",
    "libfsntfs",
    "libfvde",
    "libfwnt",
    "libfwsi",
    "liblnk",
    "libmsiecf",
    "libolecf",
    "libqcow",
    "libregf",
    "libscca",
    "libsigscan",
    "libsmdev",
    "libsmraw",
    "libvhdi",
    "libvmdk",
    "libvshadow",
    "libvslvm",
    "lzma",
    "pefile",
    "psutil",
    "pycrypto",
    "pyparsing",
    "pysqlite",
    "pytsk3",
    "pytz",
    "pyzmq",
    "requests",
    "six",
    "yara-python",
];

const CONFIG_FILENAME: &str = "pkgforget.yml";
const SYSTEM_CONFIG_FILE: &str = "/etc/pkgforget.yml";

macro_rules! update_fields {
    ($update:expr, $other:expr, $($field:tt),*) => {
        $(
            if let Some($field) = $other.$field {
                $update.$field = Some($field);
            }
        )*
    };
}

impl TargetsConfig {
    pub fn default_config() -> Self {
        Self {
            package: Some(DEFAULT_PACKAGE.to_string()),
            dependencies: Some(DEFAULT_DEPENDENCIES.iter().map(|d| d.to_string()).collect()),
            volume: Some(DEFAULT_VOLUME.to_string()),
        }
    }

    pub fn merge(
        &mut self,
        config: Self,
    ) {
        update_fields!(self, config, package, dependencies, volume);
    }

    // Defaults, then the configuration file (if any), then the command line
    pub fn load(
        config_file: Option<&str>,
        opts: Self,
    ) -> Result<Self> {
        let mut config = Self::default_config();

        let config_file = match config_file {
            Some(config_file) => {
                let config_file = Utf8PathBuf::from(config_file);
                ensure!(config_file.exists(), "config file {config_file} does not exist");
                Some(config_file)
            }
            None => Self::find_config_file()?,
        };
        if let Some(config_file) = config_file {
            debug!("Reading configuration from {config_file}");
            config.merge(Self::read_from_file(&config_file)?);
        }

        config.merge(opts);

        Ok(config)
    }

    pub fn read_from_file(path: &Utf8Path) -> Result<Self> {
        // An empty file is a valid configuration that changes nothing
        let contents =
            fs::read_to_string(path).with_context(|| format!("unable to read file {path:?}"))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents)
            .with_context(|| format!("unable to parse configuration file {path:?}"))
    }

    fn find_config_file() -> Result<Option<Utf8PathBuf>> {
        let user_config = BaseDirectories::new()
            .ok()
            .and_then(|xdg| xdg.find_config_file(CONFIG_FILENAME));
        if let Some(user_config) = user_config {
            return Utf8PathBuf::try_from(user_config)
                .map(Some)
                .context("configuration path contains invalid UTF-8 characters");
        }

        let system_config = Utf8PathBuf::from(SYSTEM_CONFIG_FILE);
        Ok(system_config.exists().then_some(system_config))
    }
}
