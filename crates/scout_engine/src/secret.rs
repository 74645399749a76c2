use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use thiserror::Error;

const TOKEN_FILENAME: &str = "session.token";

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret directory missing or not writable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Where the session credential lives between processes.
pub trait SecretStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, SecretStoreError>;
    fn save(&self, token: &str) -> Result<(), SecretStoreError>;
    fn delete(&self) -> Result<(), SecretStoreError>;
}

/// Keeps the token in a single file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILENAME)
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self) -> Result<Option<String>, SecretStoreError> {
        match fs::read_to_string(self.path()) {
            Ok(text) => {
                let token = text.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), SecretStoreError> {
        ensure_dir(&self.dir)?;
        // NamedTempFile is created owner-only, and the rename keeps those permissions.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(token.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(self.path()).map_err(|e| SecretStoreError::Io(e.error))?;
        Ok(())
    }

    fn delete(&self) -> Result<(), SecretStoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), SecretStoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SecretStoreError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SecretStoreError::Directory("path is not a directory".into()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| SecretStoreError::Directory(e.to_string()))
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    token: Mutex<Option<String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn load(&self) -> Result<Option<String>, SecretStoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), SecretStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), SecretStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
