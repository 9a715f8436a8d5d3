pub mod artifact;
pub mod context;
pub mod deploy;
pub mod encode;
pub mod error;
pub mod proposal;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::client::chain_res::{
    ExecResponse, InstantiateResponse, QueryResponse, StoreCodeResponse,
};
pub use crate::config::key::{Key, SigningKey};
pub use cosmwasm_std::{Binary, Coin, Uint128};
