use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nanogpt_bootstrap::{
    Bootstrap, BootstrapConfig, ComputeDevice, ConfigOverrides, DevicePreference, RefreshPolicy,
    config_layers, resolve_bootstrap_config,
};

const BASE_CONFIG: &str = "config/base.toml";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prepare hyperparameters, compute device and the tinyshakespeare corpus"
)]
struct Cli {
    #[command(flatten)]
    args: BootstrapArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(ClapArgs, Debug)]
struct BootstrapArgs {
    /// Additional configuration files applied in order (later files override earlier ones).
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    config: Vec<PathBuf>,
    /// Compute device to use.
    #[arg(long, value_enum, global = true)]
    device: Option<DeviceArg>,
    /// When to download the corpus.
    #[arg(long, value_enum, global = true)]
    refresh: Option<RefreshArg>,
    /// Directory the corpus is written to.
    #[arg(long, value_name = "DIR", global = true)]
    cache_dir: Option<PathBuf>,
    /// Corpus source URL.
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved configuration as JSON and exit.
    ShowConfig,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DeviceArg {
    Auto,
    Cuda,
    Wgpu,
    Cpu,
}

impl From<DeviceArg> for DevicePreference {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Auto => DevicePreference::Auto,
            DeviceArg::Cuda => DevicePreference::Cuda,
            DeviceArg::Wgpu => DevicePreference::Wgpu,
            DeviceArg::Cpu => DevicePreference::Cpu,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RefreshArg {
    Always,
    IfMissing,
}

impl From<RefreshArg> for RefreshPolicy {
    fn from(arg: RefreshArg) -> Self {
        match arg {
            RefreshArg::Always => RefreshPolicy::Always,
            RefreshArg::IfMissing => RefreshPolicy::IfMissing,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli.args)?;

    if matches!(cli.command, Some(Command::ShowConfig)) {
        let payload =
            serde_json::to_string_pretty(&config).context("failed to serialize configuration")?;
        println!("{payload}");
        return Ok(());
    }

    let bootstrap = Bootstrap::new(config)?;
    let output = bootstrap.run()?;

    let device = ComputeDevice::open(output.target)
        .with_context(|| format!("failed to open {} device", output.target))?;
    info!(
        "Bootstrap complete: device={device:?}, corpus={} bytes ({})",
        output.corpus.len_bytes(),
        if output.fetch.downloaded {
            "downloaded"
        } else {
            "cached"
        }
    );

    Ok(())
}

fn resolve_config(args: &BootstrapArgs) -> Result<BootstrapConfig> {
    let layers = config_layers(Path::new(BASE_CONFIG), &args.config);
    let overrides = ConfigOverrides {
        device: args.device.map(Into::into),
        refresh: args.refresh.map(Into::into),
        cache_dir: args.cache_dir.clone(),
        url: args.url.clone(),
    };
    resolve_bootstrap_config(&layers, &overrides)
}
