//! trmm-lam - Tactical RMM Linux agent installer

use clap::Parser;

use trmm_lam::cli::Cli;
use trmm_lam::logging;
use trmm_lam::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.no_color);
    let as_json = cli.json;

    if let Err(e) = cli.run().await {
        match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
            Ok(out) if as_json => println!("{out}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
