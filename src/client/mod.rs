pub mod chain_res;
pub mod cosmos;
pub mod cosmwasm;
pub mod error;

pub use cosmrs::tendermint::abci::Code;
