use std::{
    env, fs,
    process::{Command, Stdio},
};

use camino::Utf8Path;
use color_eyre::eyre::{bail, ensure, Context, Result};
use log::debug;

const ROOT_PRIVILEGES_QUESTION: &str = "Do you have root privileges?";

// How the mutating operations reach the filesystem and the receipt database
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Privilege {
    // Already root, operate directly
    Root,
    // Authenticated through sudo, wrap every mutating command with it
    Sudo,
}

impl Privilege {
    // Only the uid tells whether the filesystem can be touched directly
    fn from_uid(uid: u32) -> Self {
        if uid == 0 {
            Self::Root
        } else {
            Self::Sudo
        }
    }

    fn current_user() -> (Option<String>, u32) {
        let uid = unsafe { libc::getuid() };
        (env::var("USER").ok(), uid)
    }

    // The privilege mode without asking for a password
    pub fn current() -> Self {
        Self::from_uid(Self::current_user().1)
    }

    // Make sure we can act as root, prompting for the password unless $USER is root
    pub fn acquire() -> Result<Self> {
        let (user, uid) = Self::current_user();
        Self::acquire_with(user.as_deref(), uid, || {
            Command::new("sudo")
                .arg("true")
                .status()
                .map(|status| status.success())
                .unwrap_or(false)
        })
    }

    fn acquire_with<F>(
        user: Option<&str>,
        uid: u32,
        authenticate: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> bool,
    {
        if user != Some("root") {
            debug!("Not running as root, asking sudo for authentication");
            if !authenticate() {
                println!("{ROOT_PRIVILEGES_QUESTION}");
                bail!("unable to authenticate through sudo");
            }
        }

        Ok(Self::from_uid(uid))
    }

    pub fn command(
        self,
        program: &str,
    ) -> Command {
        match self {
            Self::Root => Command::new(program),
            Self::Sudo => {
                let mut cmd = Command::new("sudo");
                cmd.arg(program);
                cmd
            }
        }
    }

    pub fn remove_file(
        self,
        path: &Utf8Path,
    ) -> Result<()> {
        match self {
            Self::Root => {
                fs::remove_file(path).with_context(|| format!("unable to remove file {path:?}"))
            }
            Self::Sudo => {
                let status = self
                    .command("rm")
                    .arg("-f")
                    .arg(path)
                    .status()
                    .context("unable to run `sudo rm`")?;
                ensure!(status.success(), "unable to remove file {path:?}");
                Ok(())
            }
        }
    }

    // Only empty directories are removed
    pub fn remove_dir(
        self,
        path: &Utf8Path,
    ) -> Result<()> {
        match self {
            Self::Root => {
                fs::remove_dir(path).with_context(|| format!("unable to remove directory {path:?}"))
            }
            Self::Sudo => {
                let status = self
                    .command("rmdir")
                    .arg(path)
                    .stderr(Stdio::null())
                    .status()
                    .context("unable to run `sudo rmdir`")?;
                ensure!(status.success(), "unable to remove directory {path:?}");
                Ok(())
            }
        }
    }
}
