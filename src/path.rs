use std::env;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::{Error, Result};

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::NoHomeDir)
}

/// Expands a leading `~` to the home directory of the current user.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Joins `path` onto `cwd` unless it's already absolute, then drops `.`
/// and folds `..` without touching the filesystem.
pub fn absolutize<P: AsRef<Path>, C: AsRef<Path>>(path: P, cwd: C) -> PathBuf {
    let joined = cwd.as_ref().join(path);
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}

/// Resolves a user-supplied project path to an existing absolute path.
///
/// Nothing touches the network before this succeeds.
pub fn resolve_project_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_tilde(raw);
    let path = absolutize(expanded, env::current_dir()?);
    debug!("Resolved project path: {} -> {}", raw, path.display());
    if !path.exists() {
        return Err(Error::PathNotFound(path));
    }
    Ok(path)
}
