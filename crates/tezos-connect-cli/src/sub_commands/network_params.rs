use anyhow::Result;
use clap::Args;
use tezos_connect::network_params_by_name;

#[derive(Args)]
pub struct NetworkParamsSubCommand {
    /// Network name, unknown names resolve to mainnet
    name: String,
}

pub fn network_params(sub_command_args: &NetworkParamsSubCommand) -> Result<()> {
    let params = network_params_by_name(&sub_command_args.name);

    println!("{}", serde_json::to_string_pretty(params)?);
    Ok(())
}
