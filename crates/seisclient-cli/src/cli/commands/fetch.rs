use std::path::PathBuf;

use anyhow::Context;
use seisclient::{BundleCache, ClientConfig, DataType, SeisClient};
use tracing::debug;

use super::super::args::KeyArgs;
use super::EXIT_SUCCESS;

fn resolve_save_dir(args: &KeyArgs) -> anyhow::Result<PathBuf> {
    match &args.save_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(BundleCache::default_dir()?),
    }
}

pub async fn run(config: ClientConfig, args: KeyArgs) -> anyhow::Result<i32> {
    let save_dir = resolve_save_dir(&args)?;
    std::fs::create_dir_all(&save_dir)
        .with_context(|| format!("failed to create save dir {}", save_dir.display()))?;
    debug!(save_dir = %save_dir.display(), "using save directory");

    let client = SeisClient::new(config)?;
    let resolved = client
        .fetch_resolved(
            &args.model,
            &args.station(),
            &args.origin(),
            &save_dir,
            DataType::from(args.data_type),
        )
        .await?;

    let bundle = &resolved.bundle;
    println!("source: {}", resolved.source);
    println!("path: {}", resolved.path.display());
    println!("tensor shape: {:?}", bundle.tensor.shape);
    println!("dt: {}", bundle.dt);
    println!("stf samples: {}", bundle.stf.len());
    Ok(EXIT_SUCCESS)
}

pub fn cache_path(args: KeyArgs) -> anyhow::Result<i32> {
    let save_dir = resolve_save_dir(&args)?;
    let cache = BundleCache::with_dir(save_dir);
    let path = cache.path_for_request(
        &args.model,
        &args.station(),
        &args.origin(),
        DataType::from(args.data_type),
    );
    println!("{}", path.display());
    Ok(EXIT_SUCCESS)
}
