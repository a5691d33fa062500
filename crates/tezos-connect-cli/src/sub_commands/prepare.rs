use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tezos_connect::{
    ConnectorConfig, Error, ErrorReason, TezosConnector, TransactionPrepareRequest,
};

#[derive(Args)]
pub struct PrepareSubCommand {
    /// Request file, stdin when absent
    #[arg(short, long)]
    request: Option<PathBuf>,
}

/// Failure reported to the host on stdout
#[derive(Debug, Serialize)]
struct ErrorResponse {
    reason: ErrorReason,
    error: String,
}

pub async fn prepare(
    connector_config: &ConnectorConfig,
    sub_command_args: &PrepareSubCommand,
) -> Result<()> {
    let input = match &sub_command_args.request {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let request: TransactionPrepareRequest = match serde_json::from_str(&input) {
        Ok(request) => request,
        Err(err) => {
            return fail(ErrorResponse {
                reason: ErrorReason::InvalidInputs,
                error: format!("invalid request: {}", err),
            })
        }
    };

    let connector = TezosConnector::from_config(connector_config)?;

    match connector.transaction_prepare(&request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(err) => {
            tracing::info!("Preparation failed: {}", err);
            fail(ErrorResponse::from(&err))
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            reason: err.reason(),
            error: err.to_string(),
        }
    }
}

fn fail(response: ErrorResponse) -> Result<()> {
    println!("{}", serde_json::to_string(&response)?);
    std::process::exit(1);
}
