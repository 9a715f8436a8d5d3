use anyhow::{Context, Result};
use log::{error, info};
use sayve_orc::client::cosmos::tokio_block;
use sayve_orc::config::cfg::Config;
use sayve_orc::orchestrator::context::RunContext;
use sayve_orc::orchestrator::deploy::deploy_generator_proxy;
use sayve_orc::orchestrator::{Key, SigningKey};
use std::env;
use std::process::ExitCode;

fn run() -> Result<()> {
    let config = env::var("CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let cfg = Config::from_yaml(&config)?;

    let key = SigningKey {
        name: "deployer".to_string(),
        key: Key::Mnemonic(env::var("MNEMONIC").context("missing MNEMONIC env var")?),
    };

    let ctx = RunContext::connect(cfg, key)?;
    info!(
        "chainID: {} wallet: {}",
        ctx.chain_id(),
        ctx.signer_address()?
    );

    let addr = tokio_block(deploy_generator_proxy(&ctx))??;
    println!("{addr}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
