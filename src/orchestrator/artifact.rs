use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::ArtifactError;

pub type ContractName = String;

/// Deployed contract addresses for one chain, persisted as
/// `<artifacts_dir>/<chain_id>.json`.
///
/// Keys this crate does not know about are carried through untouched, in
/// the order they were read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact {
    map: Map<ContractName, Value>,
}

impl Artifact {
    pub fn path(dir: impl AsRef<Path>, chain_id: &str) -> PathBuf {
        dir.as_ref().join(format!("{chain_id}.json"))
    }

    /// Reads the artifact for `chain_id`. A missing file is an empty artifact.
    pub fn read(dir: impl AsRef<Path>, chain_id: &str) -> Result<Self, ArtifactError> {
        let path = Self::path(dir, chain_id);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ArtifactError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Writes the whole artifact back, creating `dir` if needed.
    pub fn write(&self, dir: impl AsRef<Path>, chain_id: &str) -> Result<(), ArtifactError> {
        let path = Self::path(&dir, chain_id);
        let write_err = |e| ArtifactError::Write {
            path: path.display().to_string(),
            source: e,
        };

        fs::create_dir_all(dir.as_ref()).map_err(write_err)?;

        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| ArtifactError::Serialize { source: e })?;
        fs::write(&path, json).map_err(write_err)?;

        Ok(())
    }

    /// Returns the recorded address for `name`, if any.
    pub fn address(&self, name: &str) -> Option<&str> {
        self.map
            .get(name)
            .and_then(Value::as_str)
            .filter(|addr| !addr.is_empty())
    }

    pub fn set_address<S: Into<String>>(&mut self, name: &str, address: S) {
        self.map
            .insert(name.to_string(), Value::String(address.into()));
    }
}
