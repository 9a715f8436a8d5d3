use thiserror::Error;

use crate::client::error::{ClientError, DeserializeError};
use crate::config::error::ConfigError;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error("serde json deserialization error")]
    JsonDeserialize { source: serde_json::Error },
}

impl EncodeError {
    pub fn json(e: serde_json::Error) -> EncodeError {
        EncodeError::JsonSerialize { source: e }
    }

    pub fn json_de(e: serde_json::Error) -> EncodeError {
        EncodeError::JsonDeserialize { source: e }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProposalError {
    #[error("{field} address must not be empty")]
    EmptyAddress { field: &'static str },

    #[error("proposal message order must start at 1")]
    ZeroOrder,

    #[error("proposal message orders must be unique and contiguous from 1, got {orders:?}")]
    MessageOrder { orders: Vec<String> },
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Proposal(#[from] ProposalError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deserialize(#[from] DeserializeError),

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("error reading artifact {path:?}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("error writing artifact {path:?}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("artifact {path:?} is not a json object")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },

    #[error("artifact serialization error")]
    Serialize { source: serde_json::Error },
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("error reading wasm file {path:?}")]
    WasmFileRead {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

impl DeployError {
    pub fn wasmfile(path: &str, e: std::io::Error) -> DeployError {
        DeployError::WasmFileRead {
            path: path.to_string(),
            source: e,
        }
    }
}
