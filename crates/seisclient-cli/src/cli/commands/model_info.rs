use anyhow::Context;
use seisclient::{ClientConfig, SeisClient};

use super::super::args::ModelInfoArgs;
use super::EXIT_SUCCESS;

pub async fn run(config: ClientConfig, args: ModelInfoArgs) -> anyhow::Result<i32> {
    let client = SeisClient::new(config)?;
    let (info, summary) = client.get_model_info(&args.model).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&info).context("failed to render model info")?;
        println!("{}", json);
    } else {
        println!("model: {}", args.model.to_uppercase());
        print!("{}", summary);
    }
    Ok(EXIT_SUCCESS)
}
