//! Transaction preparation
//!
//! Turns a host request into the unsigned binary form of a Tezos operation:
//! call arguments are decoded, both addresses resolved, the source account
//! state read from the chain, a reveal injected when the account has never
//! published its key, and counters assigned from the on-chain state.

use std::str::FromStr;
use std::sync::Arc;

use tezos_connect_http_client::{HttpClient, HttpError};
use tracing::instrument;

use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::micheline::Parameters;
use crate::operation::{Limits, Operation, OperationContent, Reveal, Transaction};
use crate::params::NetworkParams;
use crate::rpc::{BlockId, ChainClient, HttpRpcClient, RpcError};
use crate::signatory::SignatoryClient;
use crate::tezos::{self, Address, BlockHash};
use crate::types::{BigInt, TransactionPrepareRequest, TransactionPrepareResponse};

/// Decode every present call argument, in order, into one set of parameters
///
/// Later arguments overwrite the fields they carry, see
/// [`Parameters::apply_json`]. `None` entries are skipped.
pub fn prepare_input_params(params: &[Option<String>]) -> Result<Parameters> {
    let mut parameters = Parameters::default();
    for (index, param) in params.iter().enumerate() {
        let Some(text) = param else {
            continue;
        };
        parameters
            .apply_json(text)
            .map_err(|source| Error::DecodeParam { index, source })?;
    }
    Ok(parameters)
}

/// Tezos transaction preparation connector
#[derive(Clone)]
pub struct TezosConnector {
    network_name: String,
    params: &'static NetworkParams,
    signatory: SignatoryClient,
    client: Arc<dyn ChainClient>,
}

impl std::fmt::Debug for TezosConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TezosConnector")
            .field("network_name", &self.network_name)
            .field("network", &self.params.network)
            .field("signatory", &self.signatory)
            .finish_non_exhaustive()
    }
}

impl TezosConnector {
    /// Connector reading chain state through `client`
    pub fn new(
        config: &ConnectorConfig,
        client: Arc<dyn ChainClient>,
    ) -> std::result::Result<Self, HttpError> {
        let http_client = http_client(config)?;
        Ok(Self {
            network_name: config.network_name.clone(),
            params: config.network_params(),
            signatory: SignatoryClient::new(config.signatory_url.clone(), http_client),
            client,
        })
    }

    /// Connector talking to the node configured in `config`
    pub fn from_config(config: &ConnectorConfig) -> std::result::Result<Self, HttpError> {
        let client = HttpRpcClient::new(config.rpc_url.clone(), http_client(config)?);
        Self::new(config, Arc::new(client))
    }

    /// Protocol parameters applied to prepared operations
    pub fn network_params(&self) -> &'static NetworkParams {
        self.params
    }

    /// Build the unsigned operation for `request`
    ///
    /// Returns the hex encoded operation bytes and the request's gas value.
    #[instrument(skip_all, fields(from = %request.from, to = %request.to))]
    pub async fn transaction_prepare(
        &self,
        request: &TransactionPrepareRequest,
    ) -> Result<TransactionPrepareResponse> {
        let parameters = prepare_input_params(&request.params)?;
        let destination = resolve_destination(&request.to)?;
        let source = resolve_source(&request.from)?;

        let mut op = self.build_op(request, source, destination, parameters);
        self.complete_op(&mut op, source, &request.from, request.nonce.as_ref())
            .await?;

        let bytes = op.to_bytes()?;
        tracing::debug!(
            "Prepared {} content(s), {} bytes",
            op.contents().len(),
            bytes.len()
        );

        Ok(TransactionPrepareResponse {
            gas: request.gas.clone(),
            transaction_data: hex::encode(bytes),
        })
    }

    /// Operation holding the transaction, counter still unassigned
    fn build_op(
        &self,
        request: &TransactionPrepareRequest,
        source: Address,
        destination: Address,
        parameters: Parameters,
    ) -> Operation {
        let params = self.network_params();
        let gas_limit = match &request.gas {
            Some(gas) if !gas.is_negative() => {
                params.clamp_gas(gas.to_u64().unwrap_or(u64::MAX))
            }
            _ => 0,
        };

        let mut op = Operation::new(params);
        op.with_contents(OperationContent::Transaction(Transaction {
            source,
            counter: 0,
            limits: Limits {
                gas_limit,
                ..Default::default()
            },
            amount: request.value.clone().unwrap_or_else(BigInt::zero),
            destination,
            parameters,
        }));

        op
    }

    /// Fill in the branch, reveal, counters and fees
    async fn complete_op(
        &self,
        op: &mut Operation,
        source: Address,
        from: &str,
        nonce: Option<&BigInt>,
    ) -> Result<()> {
        let branch = match self.client.get_block_hash(BlockId::Head).await {
            Ok(branch) => branch,
            Err(err) => {
                tracing::warn!("Could not fetch branch, using the empty branch: {}", err);
                BlockHash::default()
            }
        };
        op.with_branch(branch);

        let state = self.client.get_contract_ext(&source, BlockId::Head).await?;
        tracing::debug!(
            "Account {} has counter {}, revealed {}",
            source,
            state.counter,
            state.is_revealed()
        );

        if !state.is_revealed() {
            let public_key = self.signatory.get_public_key(from).await?;
            tracing::debug!("Injecting reveal of {} for {}", public_key, source);

            op.with_contents_front(OperationContent::Reveal(Reveal {
                source,
                counter: 0,
                limits: self.network_params().reveal_limits(),
                public_key,
            }));
        }

        let expected = state.counter.checked_add(1).ok_or_else(|| {
            RpcError::InvalidResponse(format!(
                "counter {} of {} has no successor",
                state.counter, source
            ))
        })?;
        if let Some(nonce) = nonce.filter(|nonce| nonce.to_u64() != Some(expected)) {
            tracing::warn!(
                "Proposed nonce {} is stale, using counter {} for {}",
                nonce,
                expected,
                source
            );
        }

        if let Some(last) = op.assign_counters(expected)? {
            tracing::debug!("Assigned counters {} to {}", expected, last);
        }

        op.apply_transaction_fees()?;

        Ok(())
    }
}

fn resolve_destination(to: &str) -> Result<Address> {
    Address::from_str(to).map_err(|source| Error::InvalidToAddress {
        address: to.to_string(),
        source,
    })
}

fn resolve_source(from: &str) -> Result<Address> {
    let invalid = |source: tezos::Error| Error::InvalidFromAddress {
        address: from.to_string(),
        source,
    };

    let source = Address::from_str(from).map_err(invalid)?;
    if !source.is_implicit() {
        return Err(invalid(tezos::Error::Unsupported(format!(
            "`{}` is an originated contract and cannot sign",
            from
        ))));
    }
    Ok(source)
}

fn http_client(config: &ConnectorConfig) -> std::result::Result<HttpClient, HttpError> {
    let mut builder = HttpClient::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::micheline::{Entrypoint, Expr};

    #[test]
    fn test_absent_params_are_skipped() {
        let params = prepare_input_params(&[None, None]).expect("no params");
        assert!(params.is_empty());
    }

    #[test]
    fn test_params_merge_in_order() {
        let params = prepare_input_params(&[
            Some(r#"{"entrypoint": "transfer", "value": {"int": "1"}}"#.to_string()),
            None,
            Some(r#"{"value": {"int": "2"}}"#.to_string()),
        ])
        .expect("valid params");

        assert_eq!(params.entrypoint, Entrypoint::Named("transfer".to_string()));
        assert_eq!(params.value, Some(Expr::Int(BigInt::from(2u64))));
    }

    #[test]
    fn test_bare_value_does_not_replace_earlier_call() {
        let params = prepare_input_params(&[
            Some(r#"{"entrypoint": "a", "value": {"int": "1"}}"#.to_string()),
            Some(r#"{"prim": "Unit"}"#.to_string()),
        ])
        .expect("valid params");

        assert_eq!(params.entrypoint, Entrypoint::Named("a".to_string()));
        assert_eq!(params.value, Some(Expr::Int(BigInt::from(1u64))));
    }

    #[test]
    fn test_decode_error_reports_position() {
        let result = prepare_input_params(&[
            None,
            Some(r#"{"int": "1"}"#.to_string()),
            Some("{broken".to_string()),
        ]);

        assert!(matches!(result, Err(Error::DecodeParam { index: 2, .. })));
    }

    #[test]
    fn test_originated_source_is_rejected() {
        let result = resolve_source("KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn");
        assert!(matches!(
            result,
            Err(Error::InvalidFromAddress {
                source: tezos::Error::Unsupported(_),
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_source_is_rejected() {
        let result = resolve_source("tz1notanaddress");
        assert!(matches!(result, Err(Error::InvalidFromAddress { .. })));
    }
}
