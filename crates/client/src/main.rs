// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `carelog` — drive a carelog session from the command line.

use clap::Parser;

use carelog::api::ApiClient;
use carelog::bootstrap::{BootstrapController, BootstrapState};
use carelog::session::SessionClient;
use carelog::storage::SecureStorage;

/// Device client for the carelog API.
#[derive(Debug, Parser)]
#[command(name = "carelog", version, about)]
struct Cli {
    /// Base URL of the carelog API, including the version prefix.
    #[arg(long, default_value = "http://127.0.0.1:3000/api/v1", env = "CARELOG_API_URL")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Create an account and start a session on this device.
    Register {
        email: String,
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and start a session on this device.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Run the launch bootstrap and report the resulting session state.
    Status,
    /// Revoke this device's refresh token and clear the stored session.
    Logout,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let api = ApiClient::new(&cli.api_url);
    let mut session = SessionClient::new(SecureStorage::open_default());

    match cli.command {
        Command::Register { email, name, password } => {
            match api.register(&email, &password, &name).await {
                Ok(auth) => {
                    if let Err(e) = session.set_tokens(&auth.tokens) {
                        eprintln!("error: failed to persist session: {e}");
                        return 1;
                    }
                    println!("registered as {}", auth.account.email);
                    0
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    1
                }
            }
        }
        Command::Login { email, password } => match api.login(&email, &password).await {
            Ok(auth) => {
                if let Err(e) = session.set_tokens(&auth.tokens) {
                    eprintln!("error: failed to persist session: {e}");
                    return 1;
                }
                println!("logged in as {}", auth.account.email);
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                1
            }
        },
        Command::Status => {
            let mut controller = BootstrapController::new(api, session);
            match controller.run().await {
                BootstrapState::Authenticated => {
                    let who = controller
                        .session()
                        .account()
                        .map(|a| a.email.clone())
                        .unwrap_or_default();
                    println!("authenticated as {who}");
                    0
                }
                _ => {
                    println!("not authenticated");
                    2
                }
            }
        }
        Command::Logout => {
            session.hydrate();
            if let Some(token) = session.refresh_token() {
                // Best-effort: the server treats logout as infallible, and
                // the local session is cleared either way.
                if let Err(e) = api.logout(token).await {
                    eprintln!("warning: server logout failed: {e}");
                }
            }
            session.clear_session();
            println!("logged out");
            0
        }
    }
}
