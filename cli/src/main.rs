mod store;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use strapi::clock::SystemClock;
use strapi::config::{ApiConfig, ConfigError};
use strapi::transport::ReqwestTransport;
use strapi::types::{Pagination, PaperInput};
use strapi::validate::{RegisterForm, ResetPasswordForm};
use strapi::{ApiError, Services};
use tracing_subscriber::EnvFilter;

use crate::store::FileCredentialStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not signed in; run `papers-cli login` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "papers-cli", about = "Papers API command-line client")]
struct Cli {
    /// Strapi REST base, e.g. http://localhost:1337/api.
    #[arg(long, env = "STRAPI_URL")]
    api_url: Option<String>,

    /// GraphQL endpoint; derived from the REST base when omitted.
    #[arg(long, env = "GRAPHQL_URL")]
    graphql_url: Option<String>,

    /// Where the session token and profile are kept between runs.
    #[arg(long, env = "PAPERS_SESSION_FILE", default_value = ".papers-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password.
        #[arg(long)]
        confirm: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the signed-in user.
    Me,
    /// Request a password reset link.
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the code from the reset link.
    Reset {
        #[arg(long)]
        code: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: Option<String>,
    },
    Papers(PapersCommand),
}

#[derive(Args, Debug)]
struct PapersCommand {
    #[command(subcommand)]
    command: PapersSubcommand,
}

#[derive(Subcommand, Debug)]
enum PapersSubcommand {
    List {
        #[arg(long, requires = "page_size")]
        page: Option<u32>,
        #[arg(long, requires = "page")]
        page_size: Option<u32>,
    },
    Get {
        document_id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    Update {
        document_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Delete {
        document_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Missing .env is normal.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn api_config(cli: &Cli) -> Result<ApiConfig, ConfigError> {
    ApiConfig::from_lookup(|key: &str| match key {
        "STRAPI_URL" => cli.api_url.clone(),
        "GRAPHQL_URL" => cli.graphql_url.clone(),
        other => std::env::var(other).ok(),
    })
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = api_config(&cli)?;
    let transport = ReqwestTransport::new(config.timeouts)?;
    let store = FileCredentialStore::open(&cli.session_file);
    let services = Services::new(config, Arc::new(transport), Arc::new(store), Arc::new(SystemClock));

    let result = dispatch(&services, cli.command).await;
    if services.auth.take_redirect().is_some() {
        eprintln!("session expired; run `papers-cli login` again");
    }
    result
}

async fn dispatch(services: &Services, command: Command) -> Result<(), CliError> {
    let auth = &services.auth;
    match command {
        Command::Register { username, email, password, confirm } => {
            let form = RegisterForm {
                username,
                email,
                confirm_password: confirm.unwrap_or_else(|| password.clone()),
                password,
            };
            auth.register(&form).await?;
            print_current_user(services)
        }
        Command::Login { email, password } => {
            auth.login(&email, &password).await?;
            print_current_user(services)
        }
        Command::Logout => {
            auth.logout();
            println!("signed out");
            Ok(())
        }
        Command::Me => {
            auth.hydrate().await;
            print_current_user(services)
        }
        Command::Forgot { email } => {
            auth.forgot_password(&email).await?;
            println!("if an account exists for {email}, a reset link has been sent");
            Ok(())
        }
        Command::Reset { code, password, confirm } => {
            let form = ResetPasswordForm {
                code,
                password_confirmation: confirm.unwrap_or_else(|| password.clone()),
                password,
            };
            auth.reset_password(&form).await?;
            print_current_user(services)
        }
        Command::Papers(papers) => run_papers(services, papers).await,
    }
}

async fn run_papers(services: &Services, papers: PapersCommand) -> Result<(), CliError> {
    let store = &services.papers;
    match papers.command {
        PapersSubcommand::List { page, page_size } => {
            let pagination = page.zip(page_size).map(|(page, page_size)| Pagination { page, page_size });
            let list = store.list(pagination).await?;
            print_json(&serde_json::to_value(list)?)
        }
        PapersSubcommand::Get { document_id } => {
            let paper = store.get(&document_id).await?;
            print_json(&serde_json::to_value(paper)?)
        }
        PapersSubcommand::Create { title, content } => {
            let paper = store.create(&PaperInput { title: Some(title), content }).await?;
            print_json(&serde_json::to_value(paper)?)
        }
        PapersSubcommand::Update { document_id, title, content } => {
            let paper = store.update(&document_id, &PaperInput { title, content }).await?;
            print_json(&serde_json::to_value(paper)?)
        }
        PapersSubcommand::Delete { document_id } => {
            store.delete(&document_id).await?;
            println!("deleted {document_id}");
            Ok(())
        }
    }
}

fn print_current_user(services: &Services) -> Result<(), CliError> {
    let user = services.auth.snapshot().user.ok_or(CliError::NotSignedIn)?;
    print_json(&serde_json::to_value(user)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
