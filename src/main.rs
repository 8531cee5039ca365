use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use checklist_client::api::{checklists, users};
use checklist_client::{ApiClient, ApiError, AuthEvent, ClientConfig};

#[derive(Parser, Debug)]
#[command(name = "checklist-client", about = "Command line client for the checklist backend")]
struct Args {
    /// Backend server URL (the /api prefix is added automatically).
    /// Defaults to $CHECKLIST_API_URL, then http://localhost:8080
    #[arg(long)]
    server: Option<String>,

    /// Username for HTTP Basic authentication
    #[arg(long, short, env = "CHECKLIST_USERNAME", requires = "password")]
    username: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(
        long,
        short,
        env = "CHECKLIST_PASSWORD",
        hide_env_values = true,
        requires = "username"
    )]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in user
    Whoami,
    /// Check whether the credentials are accepted
    CheckAuth,
    /// List all users
    Users,
    /// List all checklists
    List,
    /// Show the items of a checklist with per-user progress
    Show { checklist_id: i64 },
    /// Toggle an item for a user
    Toggle {
        checklist_id: i64,
        item_id: i64,
        user_id: String,
    },
    /// Create a checklist
    Create { name: String, items: Vec<String> },
    /// Set the display order of a checklist's items
    Reorder {
        checklist_id: i64,
        #[arg(required = true)]
        item_ids: Vec<i64>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(api: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Whoami => print_json(&users::get_current_user(api).await?),
        Command::CheckAuth => {
            let ok = users::test_auth(api).await;
            println!("{}", if ok { "authenticated" } else { "not authenticated" });
            Ok(())
        }
        Command::Users => print_json(&users::get_all_users(api).await?),
        Command::List => print_json(&checklists::get_all_checklists(api).await?),
        Command::Show { checklist_id } => {
            print_json(&checklists::get_checklist(api, checklist_id).await?)
        }
        Command::Toggle {
            checklist_id,
            item_id,
            user_id,
        } => Ok(checklists::toggle_item(api, checklist_id, item_id, &user_id).await?),
        Command::Create { name, items } => {
            print_json(&checklists::create_checklist(api, &name, &items).await?)
        }
        Command::Reorder {
            checklist_id,
            item_ids,
        } => Ok(checklists::reorder_items(api, checklist_id, &item_ids).await?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = Args::parse();
    let config = match &args.server {
        Some(server) => ClientConfig::new(server),
        None => ClientConfig::from_env(),
    };
    log::info!("Using API at {}", config.base_url());

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Stands in for a login prompt: report when the backend rejects us.
    let mut auth_events = api.subscribe();
    let watcher = tokio::spawn(async move {
        while let Ok(AuthEvent::AuthRequired) = auth_events.recv().await {
            log::warn!("Backend requires authentication; pass --username/--password");
        }
    });

    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        api.set_auth(username, password).await;
    }

    let result = run(&api, args.command).await;

    // Dropping the client closes the channel and ends the watcher.
    drop(api);
    let _ = watcher.await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
