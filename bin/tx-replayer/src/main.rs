//! `tx-replayer` CLI: replays a mined transaction as an `eth_call` and prints the string it
//! returns.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tx_replayer::Cmd;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cmd = Cmd::parse();
    if let Err(err) = cmd.log_args.init() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Replay aborted");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
