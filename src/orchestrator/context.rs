use std::fmt::{self, Debug};

use crate::client::cosmwasm::{CosmWasmClient, WasmClient};
use crate::client::error::ClientError;
use crate::config::cfg::Config;
use crate::config::key::SigningKey;

/// Everything a script run needs, passed explicitly to each step.
pub struct RunContext<C: WasmClient> {
    pub client: C,
    pub key: SigningKey,
    pub cfg: Config,
}

impl<C: WasmClient> Debug for RunContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RunContext({}, {})", self.cfg.chain_cfg.chain_id, self.key.name)
    }
}

impl RunContext<CosmWasmClient> {
    /// Connects to the configured chain rpc endpoint.
    pub fn connect(cfg: Config, key: SigningKey) -> Result<Self, ClientError> {
        Ok(Self {
            client: CosmWasmClient::new(cfg.chain_cfg.clone())?,
            key,
            cfg,
        })
    }
}

impl<C: WasmClient> RunContext<C> {
    pub fn new(client: C, key: SigningKey, cfg: Config) -> Self {
        Self { client, key, cfg }
    }

    pub fn chain_id(&self) -> &str {
        &self.cfg.chain_cfg.chain_id
    }

    /// Bech32 address of the signing key on the configured chain.
    pub fn signer_address(&self) -> Result<String, ClientError> {
        Ok(self
            .key
            .to_account(&self.cfg.chain_cfg.prefix)?
            .to_string())
    }
}
