use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::artifact::Artifact;
use super::context::RunContext;
use super::error::{DeployError, EncodeError};
use crate::client::cosmwasm::WasmClient;
use crate::config::cfg::non_blank;
use crate::config::error::ConfigError;

/// Artifact key of the generator proxy to Sayve contract.
pub const GENERATOR_PROXY_TO_SAYVE: &str = "generatorProxyToSayveAddress";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeployState {
    Unrecorded,
    Recorded(String),
}

impl DeployState {
    pub fn of(artifact: &Artifact, name: &str) -> Self {
        match artifact.address(name) {
            Some(addr) => DeployState::Recorded(addr.to_string()),
            None => DeployState::Unrecorded,
        }
    }
}

/// What to deploy and under which artifact key.
#[derive(Clone, Debug)]
pub struct ContractDeploy<'a, T: Serialize> {
    pub name: &'a str,
    pub wasm_path: &'a str,
    pub init_msg: &'a T,
    pub label: &'a str,
    pub admin: Option<&'a str>,
}

/// Picks the contract admin: the explicit admin first, then the multisig.
/// Blank values count as unset.
pub fn resolve_admin(
    contract: &str,
    admin: Option<&str>,
    multisig: Option<&str>,
) -> Result<String, ConfigError> {
    non_blank(admin)
        .or_else(|| non_blank(multisig))
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingAdmin {
            contract: contract.to_string(),
        })
}

/// Makes sure `contract` is deployed on the context's chain, returning its address.
///
/// An address already recorded in the artifact is returned without touching the chain.
/// Otherwise the code is uploaded and instantiated, and the artifact is written
/// right after instantiation succeeds.
pub async fn ensure_deployed<C, T>(
    ctx: &RunContext<C>,
    artifacts_dir: impl AsRef<Path>,
    contract: &ContractDeploy<'_, T>,
) -> Result<String, DeployError>
where
    C: WasmClient,
    T: Serialize,
{
    let chain_id = ctx.chain_id();
    let mut artifact = Artifact::read(&artifacts_dir, chain_id)?;

    if let DeployState::Recorded(addr) = DeployState::of(&artifact, contract.name) {
        info!("{} already deployed at {}", contract.name, addr);
        return Ok(addr);
    }

    let admin = resolve_admin(
        contract.name,
        contract.admin,
        ctx.cfg.general_info.multisig.as_deref(),
    )?;
    let init_msg = serde_json::to_vec(contract.init_msg).map_err(EncodeError::json)?;

    info!("Storing {:?}", contract.wasm_path);
    let wasm =
        fs::read(contract.wasm_path).map_err(|e| DeployError::wasmfile(contract.wasm_path, e))?;

    let stored = ctx.client.store(wasm, &ctx.key).await?;
    debug!("stored code id {} in tx {}", stored.code_id, stored.tx_hash);

    info!(
        "Instantiating {} from code id {} with admin {}",
        contract.name, stored.code_id, admin
    );
    let res = ctx
        .client
        .instantiate(
            stored.code_id,
            init_msg,
            &ctx.key,
            Some(admin),
            contract.label.to_string(),
        )
        .await?;
    debug!("instantiated in tx {}", res.tx_hash);

    artifact.set_address(contract.name, res.address.clone());
    artifact.write(&artifacts_dir, chain_id)?;

    Ok(res.address)
}

/// Deploys the configured generator proxy to Sayve.
///
/// Requires the owner multisig to be configured before anything else happens.
pub async fn deploy_generator_proxy<C: WasmClient>(
    ctx: &RunContext<C>,
) -> Result<String, DeployError> {
    ctx.cfg.general_info.require_multisig()?;

    let proxy = &ctx.cfg.proxy_sayve;
    let addr = ensure_deployed(
        ctx,
        &ctx.cfg.artifacts_dir,
        &ContractDeploy {
            name: GENERATOR_PROXY_TO_SAYVE,
            wasm_path: &proxy.wasm_path,
            init_msg: &proxy.init_msg,
            label: &proxy.label,
            admin: proxy.admin.as_deref(),
        },
    )
    .await?;

    info!("Address Generator proxy to SAYVE contract: {}", addr);

    Ok(addr)
}
