use super::context::RunContext;
use crate::client::chain_res::ChainResponse;
use crate::client::cosmwasm::MockWasmClient;
use crate::client::error::ClientError;
use crate::client::Code;
use crate::config::cfg::{
    ChainCfg, Config, GeneralInfo, ProposalCfg, ProxyInstantiateMsg, ProxySayve,
};
use crate::config::key::{Key, SigningKey};

/// Error the chain would return when it rejects a tx with `log`.
pub fn remote_err(log: &str) -> ClientError {
    ClientError::CosmosSdk {
        res: ChainResponse {
            code: Code::Err(5),
            log: log.to_string(),
            ..Default::default()
        },
    }
}

pub fn mock_cfg() -> Config {
    Config {
        chain_cfg: ChainCfg {
            denom: "uluna".to_string(),
            prefix: "terra".to_string(),
            chain_id: "pisco-1".to_string(),
            rpc_endpoint: "http://localhost:26657".to_string(),
            gas_prices: 0.15,
            gas_adjustment: 1.5,
        },
        general_info: GeneralInfo {
            multisig: Some("terra1multisig".to_string()),
        },
        proxy_sayve: ProxySayve {
            admin: None,
            init_msg: ProxyInstantiateMsg {
                generator_contract_addr: "terra1generator".to_string(),
                pair_addr: "terra1pair".to_string(),
                lp_token_addr: "terra1lp".to_string(),
                reward_contract_addr: "terra1reward".to_string(),
                reward_token_addr: "terra1sayve".to_string(),
            },
            label: "Generator proxy to Sayve".to_string(),
            wasm_path: "artifacts/generator_proxy_to_sayve.wasm".to_string(),
        },
        proposal: ProposalCfg {
            assembly_addr: "terra1assembly".to_string(),
            xastro_addr: "terra1xastro".to_string(),
            generator_addr: "terra1generator".to_string(),
            lp_token_addr: "terra1lp".to_string(),
            proxy_addr: "terra1proxy".to_string(),
            title: "Add Generator Proxy to Sayve".to_string(),
            description: "Move the Sayve LP rewards to the proxy".to_string(),
            link: None,
            deposit_amount: "15000000000".to_string(),
        },
        artifacts_dir: "artifacts".to_string(),
    }
}

pub fn mock_ctx(client: MockWasmClient) -> RunContext<MockWasmClient> {
    RunContext::new(
        client,
        SigningKey {
            name: "deployer".to_string(),
            key: Key::Mnemonic("test".to_string()),
        },
        mock_cfg(),
    )
}
