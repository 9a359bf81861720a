use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR_ENV: &str = "FINVIS_DATA_DIR";
const DATA_DIR_FLAG: &str = "--data-dir";
const DB_FILE: &str = "finvis.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory from `--data-dir`, then `FINVIS_DATA_DIR`,
    /// then the platform data dir. Returns the args with the flag removed.
    pub(crate) fn from_args(args: Vec<String>) -> Result<(Self, Vec<String>)> {
        Self::resolve(args, std::env::var(DATA_DIR_ENV).ok())
    }

    fn resolve(args: Vec<String>, env_dir: Option<String>) -> Result<(Self, Vec<String>)> {
        let (flag_dir, rest) = take_data_dir_flag(args)?;
        let data_dir = match flag_dir.or(env_dir.filter(|dir| !dir.trim().is_empty())) {
            Some(dir) => PathBuf::from(dir),
            None => platform_data_dir()?,
        };
        Ok((Self { data_dir }, rest))
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        Ok(&self.data_dir)
    }
}

fn platform_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "finvis", "finvis")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn take_data_dir_flag(args: Vec<String>) -> Result<(Option<String>, Vec<String>)> {
    let mut dir = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == DATA_DIR_FLAG {
            match iter.next() {
                Some(value) => dir = Some(value),
                None => bail!("{DATA_DIR_FLAG} requires a path"),
            }
        } else if let Some(value) = arg.strip_prefix("--data-dir=") {
            dir = Some(value.to_string());
        } else {
            rest.push(arg);
        }
    }
    Ok((dir, rest))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
