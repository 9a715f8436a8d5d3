use config::Config as _Config;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub chain_cfg: ChainCfg,
    pub general_info: GeneralInfo,
    pub proxy_sayve: ProxySayve,
    pub proposal: ProposalCfg,
    // directory holding the `<chain_id>.json` deploy artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainCfg {
    pub denom: String,
    pub prefix: String,
    pub chain_id: String,
    pub rpc_endpoint: String,
    pub gas_prices: f64,
    pub gas_adjustment: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GeneralInfo {
    /// Owner multisig of the deployed contracts.
    #[serde(default)]
    pub multisig: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProxySayve {
    /// Contract admin. Falls back to `general_info.multisig` when unset.
    #[serde(default)]
    pub admin: Option<String>,
    pub init_msg: ProxyInstantiateMsg,
    pub label: String,
    pub wasm_path: String,
}

/// Instantiate message of the generator proxy to Sayve contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProxyInstantiateMsg {
    pub generator_contract_addr: String,
    pub pair_addr: String,
    pub lp_token_addr: String,
    pub reward_contract_addr: String,
    pub reward_token_addr: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProposalCfg {
    pub assembly_addr: String,
    /// Governance token that carries the proposal as a send hook.
    pub xastro_addr: String,
    pub generator_addr: String,
    pub lp_token_addr: String,
    pub proxy_addr: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Proposal deposit as a base-10 integer string.
    pub deposit_amount: String,
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

impl Config {
    pub fn from_yaml(file: &str) -> Result<Config, ConfigError> {
        let settings = _Config::builder()
            .add_source(config::File::with_name(file))
            .build()?;

        Ok(settings.try_deserialize::<Config>()?)
    }
}

impl GeneralInfo {
    /// Returns the configured multisig, failing when it is unset or blank.
    pub fn require_multisig(&self) -> Result<&str, ConfigError> {
        non_blank(self.multisig.as_deref()).ok_or(ConfigError::MissingMultisig)
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
