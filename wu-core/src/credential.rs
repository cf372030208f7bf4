use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read API key file: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("API key is empty")]
    Empty,
}

/// Weather Underground API key. Never printed in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from a raw string, trimming surrounding whitespace.
    pub fn new(raw: &str) -> Result<Self, CredentialError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(Self(key.to_owned()))
    }

    /// Read the key from a plain-text file holding a single token.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CredentialError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::new(&contents)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
