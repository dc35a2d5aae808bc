mod cli; // Declare the cli module

use std::path::PathBuf;
use std::process::ExitCode;

use bridge_core::kernel::constants;
use bridge_core::platform::OsVersion;
use bridge_core::{BridgeConfig, Host, MethodCall, PlatformVariant, PluginRegistrar, Result, ViewHandle};
use clap::{Parser, Subcommand};
use log::{debug, error, info};

use cli::PluginKind;

/// Host simulator for the native plugin bridge
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for testing
    #[arg(long)]
    ping: bool,

    /// Configuration file (.json, .toml, .yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List plugins, their variants and init policies
    Plugins,
    /// Register a plugin on one window and deliver a single method call
    Call {
        plugin: PluginKind,
        method: String,
        /// Plugin variant (linux or windows)
        #[arg(long)]
        platform: Option<PlatformVariant>,
        /// Native view identity of the window
        #[arg(long)]
        view: Option<u64>,
        /// OS version reported to plugins, e.g. 10.0 or 6.1
        #[arg(long = "os-version")]
        os_version: Option<OsVersion>,
    },
    /// Register a plugin on several windows and report initializer runs
    Register {
        plugin: PluginKind,
        #[arg(long)]
        platform: Option<PlatformVariant>,
        /// Number of registrars to create
        #[arg(long)]
        windows: Option<usize>,
    },
}

fn init_logging(config: &BridgeConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    // Plugins may install their own logger later; the first one wins.
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Logger already initialized: {}", e);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<BridgeConfig> {
    match path {
        Some(path) => Ok(BridgeConfig::load(path)?),
        None => Ok(BridgeConfig::default()),
    }
}

async fn call(
    config: &BridgeConfig,
    plugin: PluginKind,
    method: &str,
    platform: PlatformVariant,
    view: Option<ViewHandle>,
) -> Result<()> {
    let host = Host::from_config(config)?;
    let registrar = host.create_registrar(view).await?;
    plugin.register(registrar.as_ref(), platform)?;

    let response = host
        .invoke_method(registrar.id(), plugin.channel(), &MethodCall::bare(method))
        .await?;
    println!("{}", response.to_json());

    host.shutdown().await
}

async fn register(config: &BridgeConfig, plugin: PluginKind, platform: PlatformVariant, windows: usize) -> Result<()> {
    let host = Host::from_config(config)?;
    let before = plugin.init_count();

    for window in 0..windows {
        // Only the first window gets the configured view.
        let view = if window == 0 { config.view_handle() } else { None };
        let registrar = host.create_registrar(view).await?;
        plugin.register(registrar.as_ref(), platform)?;
    }

    println!(
        "Registered {} ({}) on {} registrar(s); initializer ran {} time(s)",
        plugin.channel(),
        platform,
        host.registrar_count().await,
        plugin.init_count() - before
    );
    host.shutdown().await
}

async fn run(args: CliArgs, mut config: BridgeConfig) -> Result<()> {
    match args.command {
        Some(Commands::Plugins) => {
            println!("Available plugins:");
            for kind in PluginKind::ALL {
                for variant in [PlatformVariant::Linux, PlatformVariant::Windows] {
                    println!("{}", cli::describe(kind, variant));
                }
            }
            Ok(())
        }
        Some(Commands::Call { plugin, method, platform, view, os_version }) => {
            if let Some(version) = os_version {
                config.os_version = Some(version.to_string());
            }
            let view = view.map(ViewHandle::new).or_else(|| config.view_handle());
            call(&config, plugin, &method, platform.unwrap_or(config.platform), view).await
        }
        Some(Commands::Register { plugin, platform, windows }) => {
            let windows = windows.unwrap_or(config.windows);
            register(&config, plugin, platform.unwrap_or(config.platform), windows).await
        }
        None => {
            info!("{} v{} (bridge API {})", constants::APP_NAME, constants::APP_VERSION, constants::API_VERSION);
            println!("No command specified. Try `bridge --help`.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let args = CliArgs::parse();

    // Handle simple ping command
    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    debug!("Using configuration: {:?}", config);

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
