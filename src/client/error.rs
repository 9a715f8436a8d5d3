use cosmrs::ErrorReport;
use prost::{DecodeError, EncodeError};
use thiserror::Error;

use super::chain_res::ChainResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid account ID: {id:?}")]
    AccountId { id: String },

    #[error("invalid contract address: {addr:?}")]
    ContractAddress { addr: String },

    #[error("invalid admin address: {addr:?}")]
    AdminAddress { addr: String },

    #[error("cryptographic error")]
    Crypto { source: ErrorReport },

    #[error("invalid denomination: {name:?}")]
    Denom { name: String },

    #[error("invalid chainId: {chain_id:?}")]
    ChainId { chain_id: String },

    #[error("invalid abci query path: {path:?}")]
    QueryPath { path: String },

    #[error("invalid mnemonic")]
    Mnemonic,

    #[error("invalid derivation path")]
    DerviationPath,

    #[error("proto encoding error")]
    ProtoEncoding { source: ErrorReport },

    #[error("proto decoding error")]
    ProtoDecoding { source: ErrorReport },

    #[error("tx response is missing the {event:?} event attribute {attribute:?}")]
    MissingEvent { event: String, attribute: String },

    #[error("simulation response is missing gas info")]
    MissingGasInfo,

    #[error("CosmosSDK error (code {:?}): {}", .res.code, .res.log)]
    CosmosSdk { res: ChainResponse },

    #[error(transparent)]
    RPC(#[from] tendermint_rpc::Error),
}

impl ClientError {
    pub fn crypto(e: ErrorReport) -> ClientError {
        ClientError::Crypto { source: e }
    }

    pub fn proto_encoding(e: ErrorReport) -> ClientError {
        ClientError::ProtoEncoding { source: e }
    }

    pub fn prost_proto_en(e: EncodeError) -> ClientError {
        ClientError::ProtoEncoding { source: e.into() }
    }

    pub fn prost_proto_de(e: DecodeError) -> ClientError {
        ClientError::ProtoDecoding { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum DeserializeError {
    #[error("Raw chain response is empty")]
    EmptyResponse,

    #[error("Serde JSON error")]
    Serde(#[from] serde_json::Error),
}
