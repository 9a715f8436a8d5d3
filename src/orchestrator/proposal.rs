use cosmwasm_std::{Binary, Coin, Uint128, Uint64};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::context::RunContext;
use super::encode::encode;
use super::error::{EncodeError, ProcessError, ProposalError};
use crate::client::cosmwasm::WasmClient;
use crate::config::error::ConfigError;

/// Execute messages of the Astroport generator handled here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorExecuteMsg {
    /// Moves the staked LP tokens of `lp_token` to the given reward `proxy`.
    MoveToProxy { lp_token: String, proxy: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorQueryMsg {
    Config {},
}

/// Subset of the generator config response; other fields are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub allowed_reward_proxies: Vec<String>,
}

impl GeneratorConfig {
    pub fn proxy_is_allowed(&self, proxy: &str) -> bool {
        self.allowed_reward_proxies.iter().any(|p| p == proxy)
    }
}

/// One contract invocation embedded in a proposal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContractCallEnvelope {
    pub contract_addr: String,
    pub msg: Binary,
    pub funds: Vec<Coin>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProposalMsg {
    Wasm(WasmProposalMsg),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WasmProposalMsg {
    Execute(ContractCallEnvelope),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderedProposalMessage {
    /// Execution position once the proposal passes, starting at 1.
    pub order: Uint64,
    pub msg: ProposalMsg,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub messages: Vec<OrderedProposalMessage>,
}

/// Hook payload understood by the assembly contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyHookMsg {
    SubmitProposal(Proposal),
}

/// cw20 `send` of the deposit to the assembly, carrying the proposal as hook msg.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionEnvelope {
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
}

fn require_addr(field: &'static str, addr: &str) -> Result<(), ProposalError> {
    if addr.trim().is_empty() {
        return Err(ProposalError::EmptyAddress { field });
    }
    Ok(())
}

/// Builds the generator call that moves `lp_token` rewards to `proxy`.
pub fn build_move_to_proxy_call(
    generator: &str,
    lp_token: &str,
    proxy: &str,
) -> Result<ContractCallEnvelope, ProcessError> {
    require_addr("generator", generator)?;
    require_addr("lp_token", lp_token)?;
    require_addr("proxy", proxy)?;

    let msg = encode(&GeneratorExecuteMsg::MoveToProxy {
        lp_token: lp_token.to_string(),
        proxy: proxy.to_string(),
    })?;

    Ok(ContractCallEnvelope {
        contract_addr: generator.to_string(),
        msg,
        funds: vec![],
    })
}

pub fn wrap_as_ordered_message(
    call: ContractCallEnvelope,
    order: u64,
) -> Result<OrderedProposalMessage, ProposalError> {
    if order == 0 {
        return Err(ProposalError::ZeroOrder);
    }

    Ok(OrderedProposalMessage {
        order: Uint64::new(order),
        msg: ProposalMsg::Wasm(WasmProposalMsg::Execute(call)),
    })
}

/// Wraps `calls` in execution order, numbering them from 1.
pub fn order_messages(calls: Vec<ContractCallEnvelope>) -> Vec<OrderedProposalMessage> {
    calls
        .into_iter()
        .zip(1u64..)
        .map(|(call, order)| OrderedProposalMessage {
            order: Uint64::new(order),
            msg: ProposalMsg::Wasm(WasmProposalMsg::Execute(call)),
        })
        .collect()
}

/// Assembles a proposal. Title and description limits are enforced by the assembly.
pub fn build_proposal(
    title: &str,
    description: &str,
    link: Option<&str>,
    messages: Vec<OrderedProposalMessage>,
) -> Result<Proposal, ProposalError> {
    let mut orders: Vec<u64> = messages.iter().map(|m| m.order.u64()).collect();
    orders.sort_unstable();
    if orders.iter().zip(1u64..).any(|(order, expected)| *order != expected) {
        return Err(ProposalError::MessageOrder {
            orders: messages.iter().map(|m| m.order.to_string()).collect(),
        });
    }

    Ok(Proposal {
        title: title.to_string(),
        description: description.to_string(),
        link: link.map(str::to_string),
        messages,
    })
}

pub fn build_submission_envelope(
    assembly: &str,
    amount: Uint128,
    proposal: Proposal,
) -> Result<SubmissionEnvelope, ProcessError> {
    require_addr("assembly", assembly)?;

    Ok(SubmissionEnvelope::Send {
        contract: assembly.to_string(),
        amount,
        msg: encode(&AssemblyHookMsg::SubmitProposal(proposal))?,
    })
}

/// Parses a token amount given as a base-10 integer string.
pub fn parse_deposit_amount(amount: &str) -> Result<Uint128, ConfigError> {
    let invalid = || ConfigError::InvalidAmount {
        amount: amount.to_string(),
    };

    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    amount.parse::<u128>().map(Uint128::new).map_err(|_| invalid())
}

/// Sends the envelope to `token_contract` signed by the run's key and
/// returns the tx hash.
pub async fn submit<C: WasmClient>(
    ctx: &RunContext<C>,
    envelope: &SubmissionEnvelope,
    token_contract: &str,
) -> Result<String, ProcessError> {
    require_addr("token_contract", token_contract)?;

    // the outer msg goes on the tx as plain json, only nested payloads are base64
    let payload = serde_json::to_vec(envelope).map_err(EncodeError::json)?;
    debug!("{}", String::from_utf8_lossy(&payload));

    let res = ctx
        .client
        .execute(token_contract.to_string(), payload, &ctx.key)
        .await?;

    Ok(res.tx_hash)
}

pub async fn query_generator_config<C: WasmClient>(
    ctx: &RunContext<C>,
    generator: &str,
) -> Result<GeneratorConfig, ProcessError> {
    let payload = serde_json::to_vec(&GeneratorQueryMsg::Config {}).map_err(EncodeError::json)?;

    let res = ctx.client.query(generator.to_string(), payload).await?;

    Ok(res.data()?)
}

/// Builds the configured move-to-proxy proposal and submits it with the
/// configured deposit, returning the tx hash.
pub async fn propose_move_to_proxy<C: WasmClient>(
    ctx: &RunContext<C>,
) -> Result<String, ProcessError> {
    let cfg = &ctx.cfg.proposal;

    let amount = parse_deposit_amount(&cfg.deposit_amount)?;

    let call = build_move_to_proxy_call(&cfg.generator_addr, &cfg.lp_token_addr, &cfg.proxy_addr)?;
    let proposal = build_proposal(
        &cfg.title,
        &cfg.description,
        cfg.link.as_deref(),
        vec![wrap_as_ordered_message(call, 1)?],
    )?;
    let envelope = build_submission_envelope(&cfg.assembly_addr, amount, proposal)?;

    info!(
        "Submitting proposal {:?} to assembly {} with deposit {}",
        cfg.title, cfg.assembly_addr, amount
    );

    submit(ctx, &envelope, &cfg.xastro_addr).await
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cosmwasm_std::Uint128;
    use serde_json::{json, Value};

    use super::*;
    use crate::orchestrator::encode::decode;
    use crate::client::chain_res::{ChainResponse, ExecResponse, QueryResponse};
    use crate::client::cosmwasm::MockWasmClient;
    use crate::orchestrator::testing::{mock_cfg, mock_ctx, remote_err};

    #[test]
    fn move_to_proxy_call_targets_generator() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();

        assert_eq!(call.contract_addr, "genA");
        assert!(call.funds.is_empty());
        assert_eq!(
            decode::<Value>(&call.msg).unwrap(),
            json!({"move_to_proxy": {"lp_token": "lpA", "proxy": "proxyA"}})
        );
        assert_eq!(
            call.msg,
            encode(&json!({"move_to_proxy": {"lp_token": "lpA", "proxy": "proxyA"}})).unwrap()
        );
    }

    #[test]
    fn empty_addresses_are_rejected() {
        assert_matches!(
            build_move_to_proxy_call("genA", "", "proxyA"),
            Err(ProcessError::Proposal(ProposalError::EmptyAddress { field: "lp_token" }))
        );
        assert_matches!(
            build_move_to_proxy_call(" ", "lpA", "proxyA"),
            Err(ProcessError::Proposal(ProposalError::EmptyAddress { field: "generator" }))
        );
    }

    #[test]
    fn ordered_message_shape() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();
        let msg = wrap_as_ordered_message(call.clone(), 1).unwrap();

        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "order": "1",
                "msg": {"wasm": {"execute": {
                    "contract_addr": "genA",
                    "msg": call.msg,
                    "funds": [],
                }}}
            })
        );

        assert_eq!(
            wrap_as_ordered_message(call, 0).unwrap_err(),
            ProposalError::ZeroOrder
        );
    }

    #[test]
    fn order_messages_counts_from_one() {
        let calls = vec![
            build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap(),
            build_move_to_proxy_call("genA", "lpB", "proxyB").unwrap(),
            build_move_to_proxy_call("genA", "lpC", "proxyC").unwrap(),
        ];

        let orders: Vec<String> = order_messages(calls)
            .iter()
            .map(|m| m.order.to_string())
            .collect();
        assert_eq!(orders, vec!["1", "2", "3"]);
    }

    #[test]
    fn proposal_rejects_gaps_and_duplicates() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();

        let gap = vec![
            wrap_as_ordered_message(call.clone(), 1).unwrap(),
            wrap_as_ordered_message(call.clone(), 3).unwrap(),
        ];
        assert_eq!(
            build_proposal("t", "d", None, gap).unwrap_err(),
            ProposalError::MessageOrder {
                orders: vec!["1".to_string(), "3".to_string()]
            }
        );

        let dup = vec![
            wrap_as_ordered_message(call.clone(), 1).unwrap(),
            wrap_as_ordered_message(call.clone(), 1).unwrap(),
        ];
        assert_matches!(
            build_proposal("t", "d", None, dup),
            Err(ProposalError::MessageOrder { .. })
        );

        // any input order is fine as long as the set is 1..=n
        let shuffled = vec![
            wrap_as_ordered_message(call.clone(), 2).unwrap(),
            wrap_as_ordered_message(call, 1).unwrap(),
        ];
        assert!(build_proposal("t", "d", None, shuffled).is_ok());
    }

    #[test]
    fn submission_envelope_nesting() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();
        let proposal = build_proposal(
            "Add Generator Proxy to Sayve",
            "move rewards",
            None,
            vec![wrap_as_ordered_message(call, 1).unwrap()],
        )
        .unwrap();

        let envelope =
            build_submission_envelope("assemblyA", Uint128::new(15_000_000_000), proposal)
                .unwrap();

        let outer = serde_json::to_value(&envelope).unwrap();
        assert_eq!(outer["send"]["contract"], json!("assemblyA"));
        assert_eq!(outer["send"]["amount"], json!("15000000000"));

        let SubmissionEnvelope::Send { msg, .. } = envelope;
        let hook: Value = decode(&msg).unwrap();
        let submit = &hook["submit_proposal"];
        assert_eq!(submit["title"], json!("Add Generator Proxy to Sayve"));
        assert_eq!(submit["link"], Value::Null);
        assert!(submit.as_object().unwrap().contains_key("link"));

        let execute = &submit["messages"][0]["msg"]["wasm"]["execute"];
        assert_eq!(submit["messages"][0]["order"], json!("1"));
        assert_eq!(execute["contract_addr"], json!("genA"));
        assert_eq!(execute["funds"], json!([]));

        let inner: Value = serde_json::from_slice(
            &cosmwasm_std::Binary::from_base64(execute["msg"].as_str().unwrap())
                .unwrap()
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            inner,
            json!({"move_to_proxy": {"lp_token": "lpA", "proxy": "proxyA"}})
        );
    }

    #[test]
    fn hook_msg_round_trips() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();
        let proposal = build_proposal(
            "title",
            "description",
            Some("https://forum.example/t/1"),
            vec![wrap_as_ordered_message(call, 1).unwrap()],
        )
        .unwrap();

        let bin = encode(&AssemblyHookMsg::SubmitProposal(proposal.clone())).unwrap();
        assert_eq!(
            decode::<AssemblyHookMsg>(&bin).unwrap(),
            AssemblyHookMsg::SubmitProposal(proposal)
        );
    }

    #[test]
    fn deposit_amount_is_a_plain_integer() {
        assert_eq!(
            parse_deposit_amount("15000000000").unwrap(),
            Uint128::new(15_000_000_000)
        );
        assert_eq!(
            parse_deposit_amount("340282366920938463463374607431768211455").unwrap(),
            Uint128::MAX
        );

        for bad in ["", "1.5", "1e10", "-1", "+1", " 1", "0x10", "340282366920938463463374607431768211456"] {
            assert_matches!(
                parse_deposit_amount(bad),
                Err(ConfigError::InvalidAmount { .. }),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn envelope_bytes_match_reference_encoding() {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();
        let proposal =
            build_proposal("T", "D", None, vec![wrap_as_ordered_message(call, 1).unwrap()])
                .unwrap();
        let envelope =
            build_submission_envelope("asm", Uint128::new(15_000_000_000), proposal).unwrap();

        let expected = concat!(
            r#"{"send":{"contract":"asm","amount":"15000000000","msg":""#,
            "eyJzdWJtaXRfcHJvcG9zYWwiOnsidGl0bGUiOiJUIiwiZGVzY3JpcHRpb24iOiJEIiwibGluayI6bnVsbCwi",
            "bWVzc2FnZXMiOlt7Im9yZGVyIjoiMSIsIm1zZyI6eyJ3YXNtIjp7ImV4ZWN1dGUiOnsiY29udHJhY3RfYWRk",
            "ciI6ImdlbkEiLCJtc2ciOiJleUp0YjNabFgzUnZYM0J5YjNoNUlqcDdJbXh3WDNSdmEyVnVJam9pYkhCQkl",
            "pd2ljSEp2ZUhraU9pSndjbTk0ZVVFaWZYMD0iLCJmdW5kcyI6W119fX19XX19",
            r#""}}"#,
        );
        assert_eq!(
            String::from_utf8(serde_json::to_vec(&envelope).unwrap()).unwrap(),
            expected
        );
    }

    fn envelope() -> SubmissionEnvelope {
        let call = build_move_to_proxy_call("genA", "lpA", "proxyA").unwrap();
        let proposal =
            build_proposal("t", "d", None, vec![wrap_as_ordered_message(call, 1).unwrap()])
                .unwrap();
        build_submission_envelope("assemblyA", Uint128::new(100), proposal).unwrap()
    }

    fn exec_ok() -> ExecResponse {
        ExecResponse {
            tx_hash: "TXHASH1".to_string(),
            res: ChainResponse::default(),
        }
    }

    #[tokio::test]
    async fn submit_executes_on_token_contract() {
        let sent = envelope();
        let expected = sent.clone();

        let mut client = MockWasmClient::new();
        client
            .expect_execute()
            .times(1)
            .withf(move |address, payload, _| {
                // outer message is raw json, not base64
                address == "xastroA"
                    && serde_json::from_slice::<SubmissionEnvelope>(payload).ok().as_ref()
                        == Some(&expected)
            })
            .returning(|_, _, _| Ok(exec_ok()));
        let ctx = mock_ctx(client);

        let tx_hash = submit(&ctx, &sent, "xastroA").await.unwrap();

        assert_eq!(tx_hash, "TXHASH1");
    }

    #[tokio::test]
    async fn submit_surfaces_chain_errors() {
        let mut client = MockWasmClient::new();
        client
            .expect_execute()
            .times(1)
            .returning(|_, _, _| Err(remote_err("proposal title too long")));
        let ctx = mock_ctx(client);

        let err = submit(&ctx, &envelope(), "xastroA").await.unwrap_err();

        assert_matches!(&err, ProcessError::ClientError(_));
        assert!(err.to_string().contains("proposal title too long"));
    }

    #[tokio::test]
    async fn submit_rejects_empty_token_contract() {
        // no expectations, any chain call fails the test
        let ctx = mock_ctx(MockWasmClient::new());

        assert_matches!(
            submit(&ctx, &envelope(), "").await,
            Err(ProcessError::Proposal(ProposalError::EmptyAddress {
                field: "token_contract"
            }))
        );
    }

    #[tokio::test]
    async fn propose_from_config() {
        let cfg = mock_cfg().proposal;

        let mut client = MockWasmClient::new();
        client
            .expect_execute()
            .times(1)
            .withf(move |address, payload, _| {
                let sent: Value = serde_json::from_slice(payload).unwrap();
                address == &cfg.xastro_addr
                    && sent["send"]["amount"] == json!("15000000000")
                    && sent["send"]["contract"] == json!(cfg.assembly_addr)
            })
            .returning(|_, _, _| Ok(exec_ok()));
        let ctx = mock_ctx(client);

        let tx_hash = propose_move_to_proxy(&ctx).await.unwrap();
        assert_eq!(tx_hash, "TXHASH1");
    }

    #[tokio::test]
    async fn propose_rejects_bad_deposit_before_network() {
        let mut ctx = mock_ctx(MockWasmClient::new());
        ctx.cfg.proposal.deposit_amount = "15000000000.0".to_string();

        assert_matches!(
            propose_move_to_proxy(&ctx).await,
            Err(ProcessError::Config(ConfigError::InvalidAmount { .. }))
        );
    }

    #[tokio::test]
    async fn generator_config_lists_allowed_proxies() {
        let mut client = MockWasmClient::new();
        client
            .expect_query()
            .times(1)
            .withf(|address, payload| {
                address == "genA" && payload.as_slice() == br#"{"config":{}}"#
            })
            .returning(|_, _| {
                Ok(QueryResponse {
                    res: ChainResponse {
                        data: Some(
                            serde_json::to_vec(&json!({
                                "owner": "terra1owner",
                                "allowed_reward_proxies": ["proxyA", "proxyB"],
                                "tokens_per_block": "0",
                            }))
                            .unwrap(),
                        ),
                        ..Default::default()
                    },
                })
            });
        let ctx = mock_ctx(client);

        let cfg = query_generator_config(&ctx, "genA").await.unwrap();

        assert!(cfg.proxy_is_allowed("proxyB"));
        assert!(!cfg.proxy_is_allowed("proxyC"));
    }
}
