use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::kernel::state::PersistedSession;

const SESSION_DIR: &str = ".codeshell";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot determine cache directory")]
    NoCacheDir,
    #[error("session io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed session file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn session_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

/// Loads the session from the default location. A missing file yields the
/// default session.
pub fn load() -> Result<PersistedSession, SessionError> {
    let path = session_path().ok_or(SessionError::NoCacheDir)?;
    load_from(&path)
}

pub fn save(session: &PersistedSession) -> Result<PathBuf, SessionError> {
    let path = session_path().ok_or(SessionError::NoCacheDir)?;
    save_to(&path, session)?;
    Ok(path)
}

pub fn load_from(path: &Path) -> Result<PersistedSession, SessionError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no session file, using defaults");
            return Ok(PersistedSession::default());
        }
        Err(source) => {
            return Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_to(path: &Path, session: &PersistedSession) -> Result<(), SessionError> {
    let io_err = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let content = serde_json::to_string_pretty(session).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(io_err)?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/session.rs"]
mod tests;
