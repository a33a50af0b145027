use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use gateway_session::api::ApiClient;
use gateway_session::api::chat::{ChatMessage, ChatOptions};
use gateway_session::apps::App;
use gateway_session::config::{AppKind, ClientConfig, ConfigError, normalize_api_base};
use gateway_session::router::NavigationError;
use gateway_session::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] gateway_session::api::ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("{0}")]
    Rejected(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gateway-cli", about = "LLM gateway session and chat CLI")]
struct Cli {
    /// Backend root URL; defaults to `GATEWAY_API_BASE` or the built-in default.
    #[arg(long)]
    api_base: Option<String>,

    /// Token storage file; defaults to `GATEWAY_STATE_FILE`.
    #[arg(long)]
    state_file: Option<std::path::PathBuf>,

    /// `admin` or `chat`; defaults to `GATEWAY_APP`.
    #[arg(long)]
    app: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "GATEWAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GATEWAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Verify the saved token and print the current user.
    Whoami,
    /// Resolve a route the way the app's router would.
    Navigate {
        path: String,
    },
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct ChatArgs {
    #[arg(long, env = "GATEWAY_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long)]
    max_tokens: Option<u32>,

    #[arg(long)]
    system: Option<String>,

    #[arg(required = true)]
    message: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let api = Arc::new(ApiClient::from_config(&config)?);

    match cli.command {
        Command::Chat(args) => run_chat(&api, args).await,
        Command::Login { username, password } => {
            let app = open_app(&config, &api).await;
            let outcome = app.session().login(&username, &password).await;
            outcome_result(outcome.error())?;
            println!("logged in as {username}");
            Ok(())
        }
        Command::Register { username, email, password } => {
            let app = open_app(&config, &api).await;
            let outcome = app.session().register(&username, &email, &password).await;
            outcome_result(outcome.error())?;
            println!("registered {username}");
            Ok(())
        }
        Command::Logout => {
            open_app(&config, &api).await.session().logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&open_app(&config, &api).await).await,
        Command::Navigate { path } => {
            let resolved = open_app(&config, &api).await.navigate(&path).await?;
            match resolved.redirected_from {
                Some(from) => println!("{from} -> {}", resolved.path),
                None => println!("{}", resolved.path),
            }
            Ok(())
        }
    }
}

async fn open_app(config: &ClientConfig, api: &Arc<ApiClient>) -> App {
    let storage = Arc::new(FileStorage::new(&config.state_file));
    App::for_kind(config.app, api.clone(), storage).await
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base) = &cli.api_base {
        config.api_base = normalize_api_base(base)?;
    }
    if let Some(path) = &cli.state_file {
        config.state_file.clone_from(path);
    }
    if let Some(app) = &cli.app {
        config.app = AppKind::parse(app)?;
    }
    Ok(config)
}

fn outcome_result(error: Option<&str>) -> Result<(), CliError> {
    match error {
        Some(message) => Err(CliError::Rejected(message.to_owned())),
        None => Ok(()),
    }
}

async fn run_whoami(app: &App) -> Result<(), CliError> {
    let session = app.session();
    session.init().await;
    if !session.is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }
    match session.user() {
        Some(user) => print_json(&serde_json::to_value(user)?),
        None => Err(CliError::NotLoggedIn),
    }
}

async fn run_chat(api: &ApiClient, args: ChatArgs) -> Result<(), CliError> {
    let mut messages = Vec::new();
    if let Some(system) = args.system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(args.message.join(" ")));

    let options = ChatOptions {
        api_key: args.api_key,
        model: args.model,
        temperature: args.temperature,
        max_tokens: args.max_tokens,
    };
    let completion = api.chat_completions(&messages, &options).await?;
    match completion.first_content() {
        Some(content) => println!("{content}"),
        None => eprintln!("completion {} returned no choices", completion.id),
    }
    if let Some(usage) = completion.usage {
        tracing::info!(
            prompt = usage.prompt_tokens,
            completion = usage.completion_tokens,
            total = usage.total_tokens,
            "token usage"
        );
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
