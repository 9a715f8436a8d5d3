use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    QuerySmartContractStateRequest, QuerySmartContractStateResponse,
};
use cosmrs::cosmwasm::{MsgExecuteContract, MsgInstantiateContract};
use cosmrs::crypto::secp256k1;
use cosmrs::tx::Msg;
use cosmrs::AccountId;
use cosmrs::{cosmwasm::MsgStoreCode, rpc::HttpClient};
use prost::Message;

use super::chain_res::{ExecResponse, InstantiateResponse, QueryResponse, StoreCodeResponse};
use super::cosmos::{abci_query, find_event_attr, send_tx};
use super::error::ClientError;
use crate::config::cfg::ChainCfg;
use crate::config::key::SigningKey;

#[cfg(test)]
use mockall::automock;

/// Chain operations the scripts depend on.
///
/// Every call is awaited to completion before the next one is issued, and any
/// remote failure is returned as-is.
#[cfg_attr(test, automock)]
#[allow(async_fn_in_trait)]
pub trait WasmClient {
    /// Uploads wasm bytecode, returning the new code id.
    async fn store(&self, payload: Vec<u8>, key: &SigningKey)
        -> Result<StoreCodeResponse, ClientError>;

    /// Instantiates `code_id` with the json `payload` as its instantiate msg.
    async fn instantiate(
        &self,
        code_id: u64,
        payload: Vec<u8>,
        key: &SigningKey,
        admin: Option<String>,
        label: String,
    ) -> Result<InstantiateResponse, ClientError>;

    /// Executes the json `payload` against the contract at `address`.
    async fn execute(
        &self,
        address: String,
        payload: Vec<u8>,
        key: &SigningKey,
    ) -> Result<ExecResponse, ClientError>;

    /// Runs a smart query against the contract at `address`.
    async fn query(&self, address: String, payload: Vec<u8>)
        -> Result<QueryResponse, ClientError>;
}

#[derive(Clone, Debug)]
pub struct CosmWasmClient {
    // http tendermint RPC client
    rpc_client: HttpClient,
    cfg: ChainCfg,
}

impl CosmWasmClient {
    pub fn new(cfg: ChainCfg) -> Result<Self, ClientError> {
        Ok(Self {
            rpc_client: HttpClient::new(cfg.rpc_endpoint.as_str())?,
            cfg,
        })
    }
}

impl WasmClient for CosmWasmClient {
    async fn store(
        &self,
        payload: Vec<u8>,
        key: &SigningKey,
    ) -> Result<StoreCodeResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = key.try_into()?;
        let account_id = key.to_account(&self.cfg.prefix)?;

        let msg = MsgStoreCode {
            sender: account_id.clone(),
            wasm_byte_code: payload,
            instantiate_permission: None,
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let tx_res = send_tx(&self.rpc_client, msg, &signing_key, account_id, &self.cfg).await?;

        let code_id = find_event_attr(&tx_res, "store_code", "code_id")?;
        let code_id = code_id
            .parse::<u64>()
            .map_err(|_| ClientError::MissingEvent {
                event: "store_code".to_string(),
                attribute: "code_id".to_string(),
            })?;

        Ok(StoreCodeResponse {
            code_id,
            tx_hash: tx_res.hash.to_string(),
            res: tx_res.deliver_tx.into(),
        })
    }

    async fn instantiate(
        &self,
        code_id: u64,
        payload: Vec<u8>,
        key: &SigningKey,
        admin: Option<String>,
        label: String,
    ) -> Result<InstantiateResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = key.try_into()?;
        let account_id = key.to_account(&self.cfg.prefix)?;

        let admin = admin
            .map(|addr| {
                addr.parse::<AccountId>()
                    .map_err(|_| ClientError::AdminAddress { addr })
            })
            .transpose()?;

        let msg = MsgInstantiateContract {
            sender: account_id.clone(),
            admin,
            code_id,
            label: Some(label),
            msg: payload,
            funds: vec![],
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let tx_res = send_tx(&self.rpc_client, msg, &signing_key, account_id, &self.cfg).await?;

        let address = find_event_attr(&tx_res, "instantiate", "_contract_address")?;

        Ok(InstantiateResponse {
            address,
            tx_hash: tx_res.hash.to_string(),
            res: tx_res.deliver_tx.into(),
        })
    }

    async fn execute(
        &self,
        address: String,
        payload: Vec<u8>,
        key: &SigningKey,
    ) -> Result<ExecResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = key.try_into()?;
        let account_id = key.to_account(&self.cfg.prefix)?;

        let contract = parse_contract(&address)?;

        let msg = MsgExecuteContract {
            sender: account_id.clone(),
            contract,
            msg: payload,
            funds: vec![],
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let tx_res = send_tx(&self.rpc_client, msg, &signing_key, account_id, &self.cfg).await?;

        Ok(ExecResponse {
            tx_hash: tx_res.hash.to_string(),
            res: tx_res.deliver_tx.into(),
        })
    }

    async fn query(
        &self,
        address: String,
        payload: Vec<u8>,
    ) -> Result<QueryResponse, ClientError> {
        let res = abci_query(
            &self.rpc_client,
            QuerySmartContractStateRequest {
                address,
                query_data: payload,
            },
            "/cosmwasm.wasm.v1.Query/SmartContractState",
        )
        .await?;

        let res = QuerySmartContractStateResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?;

        Ok(QueryResponse { res: res.into() })
    }
}

fn parse_contract(address: &str) -> Result<AccountId, ClientError> {
    address.parse().map_err(|_| ClientError::ContractAddress {
        addr: address.to_string(),
    })
}
