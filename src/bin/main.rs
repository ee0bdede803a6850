//! Xinde API client CLI
//!
//! Signs request URLs, submits two-factor verification tasks and polls task
//! status against the Xinde task endpoint.

use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use xinde_client::{
    AppId, AppSecret, BodyEncoding, ClientConfiguration, ClientError, ConfigManager,
    EndpointUrl, TaskFailure, TaskId, TaskOutcome, TaskWorkflow, UrlSigner, ValueSplit,
};

#[derive(Parser)]
#[command(name = "xinde-client")]
#[command(about = "Signed-URL client for the Xinde identity-verification API")]
#[command(long_about = "
Xinde API client - sign URLs, create verification tasks, poll task status

EXAMPLES:
    # Sign a URL (quote it so the shell keeps the '&')
    xinde-client sign \"https://api.xindedata.com/v1/task?appid=myappid&time=1467372594\" <APP_SECRET>

    # Check that a name matches a national id number
    xinde-client create-task <APP_ID> <APP_SECRET> <USER_NAME> <USER_ID>

    # Query a task created earlier
    xinde-client get-task-status <TID> <APP_ID> <APP_SECRET>

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Task endpoint (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a signature to a URL
    Sign {
        /// URL to sign, query string included
        #[arg(value_name = "URL")]
        url: String,

        /// Application secret
        #[arg(value_name = "APP_SECRET")]
        app_secret: String,

        /// How to split query values that contain '=' (overrides config)
        #[arg(long, value_enum)]
        split: Option<ValueSplitArg>,
    },

    /// Submit a name + national id verification task
    CreateTask {
        #[arg(value_name = "APP_ID")]
        app_id: String,

        #[arg(value_name = "APP_SECRET")]
        app_secret: String,

        /// Name of the person to verify
        #[arg(value_name = "USER_NAME")]
        user_name: String,

        /// National id number of the person to verify
        #[arg(value_name = "USER_ID")]
        user_id: String,

        /// Send the task body as JSON instead of a form
        #[arg(long)]
        json: bool,
    },

    /// Query the status of a task
    GetTaskStatus {
        /// Task id returned by create-task
        #[arg(value_name = "TID")]
        tid: String,

        #[arg(value_name = "APP_ID")]
        app_id: String,

        #[arg(value_name = "APP_SECRET")]
        app_secret: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create default configuration file
    Init,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum ValueSplitArg {
    Legacy,
    FirstEquals,
}

impl From<ValueSplitArg> for ValueSplit {
    fn from(arg: ValueSplitArg) -> Self {
        match arg {
            ValueSplitArg::Legacy => ValueSplit::Legacy,
            ValueSplitArg::FirstEquals => ValueSplit::FirstEquals,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let manager = match &cli.global.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Sign {
            url,
            app_secret,
            split,
        } => {
            let config = effective_config(&manager, &cli.global)?;
            let split = split.map_or(config.value_split, Into::into);
            let secret = AppSecret::new(app_secret);
            let signed = UrlSigner::new(secret).with_value_split(split).sign(&url);
            println!("signed url={signed}");
        }

        Commands::CreateTask {
            app_id,
            app_secret,
            user_name,
            user_id,
            json,
        } => {
            let mut config = effective_config(&manager, &cli.global)?;
            if json {
                config.body_encoding = BodyEncoding::Json;
            }
            let workflow = build_workflow(&config, &app_id, app_secret)?;
            report(workflow.create_task(&user_name, &user_id).await)?;
        }

        Commands::GetTaskStatus {
            tid,
            app_id,
            app_secret,
        } => {
            let config = effective_config(&manager, &cli.global)?;
            let tid = TaskId::new(tid).into_diagnostic()?;
            let workflow = build_workflow(&config, &app_id, app_secret)?;
            report(workflow.task_status(&tid).await)?;
        }

        Commands::Config(config_cmd) => handle_config_command(&manager, config_cmd)?,
    }

    Ok(())
}

/// File configuration with command-line overrides applied.
fn effective_config(manager: &ConfigManager, global: &GlobalArgs) -> Result<ClientConfiguration> {
    let mut config = manager.load_or_default().into_diagnostic()?;
    if let Some(base_url) = &global.base_url {
        config.base_url = EndpointUrl::new(base_url).into_diagnostic()?.to_string();
    }
    if let Some(timeout) = global.timeout {
        if timeout == 0 {
            return Err(ClientError::InvalidInput("--timeout must be greater than 0".into()))
                .into_diagnostic();
        }
        config.timeout_seconds = timeout;
    }
    Ok(config)
}

fn build_workflow(
    config: &ClientConfiguration,
    app_id: &str,
    app_secret: String,
) -> Result<TaskWorkflow> {
    TaskWorkflow::new(
        config.endpoint().into_diagnostic()?,
        AppId::new(app_id).into_diagnostic()?,
        AppSecret::new(app_secret),
        config.value_split,
        config.http_config(),
    )
    .into_diagnostic()
}

fn report(result: std::result::Result<TaskOutcome, TaskFailure>) -> Result<()> {
    match result {
        Ok(outcome) => {
            println!("signed url={}", outcome.signed_url);
            println!("{}", outcome.response.body);
            Ok(())
        }
        Err(TaskFailure { signed_url, error }) => {
            println!("signed url={signed_url}");
            match error {
                ClientError::UnexpectedResponse { status, body } => {
                    log::debug!("response body: {body}");
                    eprintln!("HTTP {status}");
                    std::process::exit(1);
                }
                other => Err(other).into_diagnostic(),
            }
        }
    }
}

fn handle_config_command(manager: &ConfigManager, config_cmd: ConfigCommands) -> Result<()> {
    match config_cmd {
        ConfigCommands::Show => {
            let config = manager.load_or_default().into_diagnostic()?;
            println!("Current configuration:");
            println!("  Base URL: {}", config.base_url);
            println!("  Timeout: {}s", config.timeout_seconds);
            println!("  Body encoding: {}", config.body_encoding);
            println!("  Value split: {}", config.value_split);
            println!("  Configuration file: {}", manager.config_path().display());
        }

        ConfigCommands::Init => {
            manager.load_or_create_default().into_diagnostic()?;
            println!(
                "Configuration initialized: {}",
                manager.config_path().display()
            );
        }

        ConfigCommands::Set { key, value } => {
            manager.update_value(&key, &value).into_diagnostic()?;
            println!("Configuration updated: {key} = {value}");
        }
    }

    Ok(())
}
