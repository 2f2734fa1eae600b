use clap::Parser;

mod cli;
mod logging;

use cli::args::Cli;
use cli::commands::dispatch;
use seisclient::SeisError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            e.downcast_ref::<SeisError>()
                .map(SeisError::exit_code)
                .unwrap_or(1)
        }
    };
    std::process::exit(code);
}
