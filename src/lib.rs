//! Governance and deployment scripts for the Sayve generator proxy on Terra.
//!
//! Two independent flows run against a configured [Cosmos] based chain:
//! * Submitting an Astroport assembly proposal that moves an LP token's
//!   generator rewards to a proxy contract, carried as the hook payload of a
//!   governance token `send`.
//! * Uploading and instantiating the generator proxy to Sayve exactly once per
//!   chain, recording its address in a json artifact.
//!
//! [Cosmos]: https://github.com/cosmos/cosmos-sdk
//!
//! # Quick Start
//!
//! ```no_run
//! use sayve_orc::client::cosmos::tokio_block;
//! use sayve_orc::config::cfg::Config;
//! use sayve_orc::orchestrator::context::RunContext;
//! use sayve_orc::orchestrator::deploy::deploy_generator_proxy;
//! use sayve_orc::orchestrator::{Key, SigningKey};
//!
//! # fn main() -> anyhow::Result<()> {
//! let key = SigningKey {
//!     name: "deployer".to_string(),
//!     key: Key::Mnemonic(std::env::var("MNEMONIC")?),
//! };
//! let ctx = RunContext::connect(Config::from_yaml("config.yaml")?, key)?;
//!
//! // no-op when the artifact already records the address
//! let addr = tokio_block(deploy_generator_proxy(&ctx))??;
//! println!("{addr}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod orchestrator;
