use config::ConfigError as _ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("owner multisig is not set in `general_info.multisig`")]
    MissingMultisig,

    #[error("no admin configured for {contract:?} and no multisig to fall back to")]
    MissingAdmin { contract: String },

    #[error("invalid token amount: {amount:?}")]
    InvalidAmount { amount: String },

    #[error(transparent)]
    Config(#[from] _ConfigError),
}
