use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use seisclient::{ClientConfig, DataType, Origin, Station};

#[derive(Parser)]
#[command(
    name = "seisclient",
    version,
    about = "Fetch and cache 3D strain Green's tensors and discrete Green's functions from SeisCloud"
)]
pub struct Cli {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the lat/lon/depth grid of a model
    ModelInfo(ModelInfoArgs),
    /// Read-through fetch of an SGT or DGF bundle into the save directory
    Fetch(KeyArgs),
    /// Print the cache file path for a request without fetching
    CachePath(KeyArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServiceArgs {
    /// Service base URL
    #[arg(long, global = true, env = "SEISCLIENT_URL")]
    pub url: Option<String>,

    /// Service port, appended as URL:PORT
    #[arg(long, global = true, env = "SEISCLIENT_PORT")]
    pub port: Option<u16>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SEISCLIENT_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl ServiceArgs {
    pub fn to_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        config
    }
}

#[derive(Args, Clone, Debug)]
pub struct ModelInfoArgs {
    /// Model identifier (case-insensitive)
    #[arg(long)]
    pub model: String,

    /// Print the raw grid as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum DataTypeArg {
    #[default]
    Sgt,
    Dgf,
}

impl From<DataTypeArg> for DataType {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::Sgt => DataType::Sgt,
            DataTypeArg::Dgf => DataType::Dgf,
        }
    }
}

/// Everything that identifies one cached bundle.
#[derive(Args, Clone, Debug)]
pub struct KeyArgs {
    /// Model identifier (case-insensitive)
    #[arg(long)]
    pub model: String,

    /// Station network code
    #[arg(long)]
    pub network: String,

    /// Station code
    #[arg(long)]
    pub station: String,

    /// Station location code
    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, allow_negative_numbers = true)]
    pub station_lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub station_lon: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub origin_lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub origin_lon: f64,

    /// Source depth in meters
    #[arg(long)]
    pub depth_m: f64,

    #[arg(long, value_enum, default_value_t = DataTypeArg::Sgt)]
    pub data_type: DataTypeArg,

    /// Cache directory (default: user cache dir/seisclient)
    #[arg(long, env = "SEISCLIENT_SAVE_DIR")]
    pub save_dir: Option<PathBuf>,
}

impl KeyArgs {
    pub fn station(&self) -> Station {
        Station::new(
            self.network.clone(),
            self.station.clone(),
            self.station_lat,
            self.station_lon,
        )
        .with_location(self.location.clone())
    }

    pub fn origin(&self) -> Origin {
        Origin::new(self.origin_lat, self.origin_lon, self.depth_m)
    }
}
