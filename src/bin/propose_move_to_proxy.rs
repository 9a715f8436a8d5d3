use anyhow::{Context, Result};
use log::{error, info, warn};
use sayve_orc::client::cosmos::tokio_block;
use sayve_orc::config::cfg::Config;
use sayve_orc::orchestrator::context::RunContext;
use sayve_orc::orchestrator::proposal::{propose_move_to_proxy, query_generator_config};
use sayve_orc::orchestrator::{Key, SigningKey};
use std::env;
use std::process::ExitCode;

fn run() -> Result<()> {
    let config = env::var("CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let cfg = Config::from_yaml(&config)?;

    let key = SigningKey {
        name: "proposer".to_string(),
        key: Key::Mnemonic(env::var("MNEMONIC").context("missing MNEMONIC env var")?),
    };

    let ctx = RunContext::connect(cfg, key)?;
    info!(
        "chainID: {} wallet: {}",
        ctx.chain_id(),
        ctx.signer_address()?
    );

    let tx_hash = tokio_block(async {
        let proposal = &ctx.cfg.proposal;
        match query_generator_config(&ctx, &proposal.generator_addr).await {
            Ok(generator) if !generator.proxy_is_allowed(&proposal.proxy_addr) => warn!(
                "proxy {} is not in the generator's allowed_reward_proxies yet",
                proposal.proxy_addr
            ),
            Ok(_) => {}
            Err(e) => warn!("could not query generator config: {e}"),
        }

        propose_move_to_proxy(&ctx).await
    })??;

    println!("{tx_hash}");

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
