use super::error::ClientError;
use crate::config::cfg::ChainCfg;
use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{SimulateRequest, SimulateResponse};
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::endpoint::broadcast::tx_commit::Response;
use cosmrs::rpc::Client;
use cosmrs::tendermint::abci::{Code, Path};
use cosmrs::tendermint::chain::Id;
use cosmrs::tx::{Fee, SignDoc, SignerInfo};
use cosmrs::{
    rpc::HttpClient,
    tx::{self},
};
use cosmrs::{AccountId, Any, Coin, Denom};
use log::debug;
use prost::Message;
use std::future::Future;
use tendermint_rpc::endpoint::abci_query::AbciQuery;

/// Signs `msg` with `key`, simulates its gas usage and broadcasts it,
/// waiting for the tx to be committed in a block.
pub async fn send_tx(
    client: &HttpClient,
    msg: Any,
    key: &secp256k1::SigningKey,
    account_id: AccountId,
    cfg: &ChainCfg,
) -> Result<Response, ClientError> {
    let timeout_height = 0u16;
    let account = account(client, account_id).await?;

    let tx_body = tx::Body::new(vec![msg], "", timeout_height);

    let fee = simulate_gas_fee(client, &tx_body, &account, key, cfg).await?;

    let auth_info =
        SignerInfo::single_direct(Some(key.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(
        &tx_body,
        &auth_info,
        &chain_id(cfg)?,
        account.account_number,
    )
    .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    let tx_commit_response = tx_raw
        .broadcast_commit(client)
        .await
        .map_err(ClientError::proto_encoding)?;

    if tx_commit_response.check_tx.code.is_err() {
        return Err(ClientError::CosmosSdk {
            res: tx_commit_response.check_tx.into(),
        });
    }
    if tx_commit_response.deliver_tx.code.is_err() {
        return Err(ClientError::CosmosSdk {
            res: tx_commit_response.deliver_tx.into(),
        });
    }

    debug!("tx {} committed", tx_commit_response.hash);

    Ok(tx_commit_response)
}

pub async fn abci_query<T: Message>(
    client: &HttpClient,
    req: T,
    path: &str,
) -> Result<AbciQuery, ClientError> {
    let mut buf = Vec::with_capacity(req.encoded_len());
    req.encode(&mut buf).map_err(ClientError::prost_proto_en)?;

    let query_path: Path = path.parse().map_err(|_| ClientError::QueryPath {
        path: path.to_string(),
    })?;

    let res = client
        .abci_query(Some(query_path), buf, None, false)
        .await?;

    if res.code != Code::Ok {
        return Err(ClientError::CosmosSdk { res: res.into() });
    }

    Ok(res)
}

async fn account(client: &HttpClient, account_id: AccountId) -> Result<BaseAccount, ClientError> {
    let res = abci_query(
        client,
        QueryAccountRequest {
            address: account_id.as_ref().into(),
        },
        "/cosmos.auth.v1beta1.Query/Account",
    )
    .await?;

    let res = QueryAccountResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .account
        .ok_or(ClientError::AccountId {
            id: account_id.to_string(),
        })?;

    let base_account =
        BaseAccount::decode(res.value.as_slice()).map_err(ClientError::prost_proto_de)?;

    Ok(base_account)
}

#[allow(deprecated)]
async fn simulate_gas_fee(
    client: &HttpClient,
    tx: &tx::Body,
    account: &BaseAccount,
    key: &secp256k1::SigningKey,
    cfg: &ChainCfg,
) -> Result<Fee, ClientError> {
    let denom: Denom = cfg.denom.parse().map_err(|_| ClientError::Denom {
        name: cfg.denom.clone(),
    })?;

    let signer_info = SignerInfo::single_direct(Some(key.public_key()), account.sequence);
    let auth_info = signer_info.auth_info(Fee::from_amount_and_gas(
        Coin {
            denom: denom.clone(),
            amount: 0u64.into(),
        },
        0u64,
    ));

    let sign_doc = SignDoc::new(tx, &auth_info, &chain_id(cfg)?, account.account_number)
        .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    let res = abci_query(
        client,
        SimulateRequest {
            tx: None,
            tx_bytes: tx_raw.to_bytes().map_err(ClientError::proto_encoding)?,
        },
        "/cosmos.tx.v1beta1.Service/Simulate",
    )
    .await?;

    let gas_info = SimulateResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .gas_info
        .ok_or(ClientError::MissingGasInfo)?;

    let gas_limit = (gas_info.gas_used as f64 * cfg.gas_adjustment).ceil();
    let amount = Coin {
        denom,
        amount: ((gas_limit * cfg.gas_prices).ceil() as u64).into(),
    };

    Ok(Fee::from_amount_and_gas(amount, gas_limit as u64))
}

fn chain_id(cfg: &ChainCfg) -> Result<Id, ClientError> {
    cfg.chain_id.parse().map_err(|_| ClientError::ChainId {
        chain_id: cfg.chain_id.to_string(),
    })
}

/// Returns the value of `attribute` on the first `event` emitted by the committed tx.
pub fn find_event_attr(res: &Response, event: &str, attribute: &str) -> Result<String, ClientError> {
    res.deliver_tx
        .events
        .iter()
        .filter(|e| e.type_str == event)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key.to_string() == attribute)
        .map(|a| a.value.to_string())
        .ok_or_else(|| ClientError::MissingEvent {
            event: event.to_string(),
            attribute: attribute.to_string(),
        })
}

/// Drives `f` to completion on a fresh current-thread runtime.
pub fn tokio_block<F: Future>(f: F) -> std::io::Result<F::Output> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(f))
}
