use super::args::{Cli, Command};

mod fetch;
mod model_info;

pub const EXIT_SUCCESS: i32 = 0;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.service.to_config();
    match cli.cmd {
        Command::ModelInfo(args) => model_info::run(config, args).await,
        Command::Fetch(args) => fetch::run(config, args).await,
        Command::CachePath(args) => fetch::cache_path(args),
    }
}
