use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    connect, endpoint_url, run_workflow, UserAction, ViewState, WorkflowController,
    WorkflowPhase,
};
use shared::protocol::ServerEvent;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::timeout,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "residence-cli", about = "Look up payment methods by country of residence")]
struct Args {
    /// Settings file; defaults to ./residence_cli.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    app_id: Option<String>,
    /// Seconds to wait for each response in non-interactive commands.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the residence dropdown.
    Countries,
    /// Select a country by code and print its payment methods.
    Methods { code: String },
    /// Drive the workflow from stdin: `select [code]`, `get`, `clear`, `show`, `quit`.
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(app_id) = args.app_id {
        settings.app_id = app_id;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.response_timeout_secs = timeout_secs;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let url = endpoint_url(&settings.server_url, Some(&settings.app_id))?;
    let (sender, inbound) = connect(&url)
        .await
        .context("failed to open residence socket")?;
    let controller = WorkflowController::new(sender);

    match args.command {
        Command::Countries => {
            let view = countries(controller, inbound, settings.response_timeout()).await?;
            print!("{}", render::render_dropdown(&view));
        }
        Command::Methods { code } => {
            let view = methods(controller, inbound, &code, settings.response_timeout()).await?;
            if view.table_visible() {
                print!("{}", render::render_table(&view));
            } else {
                println!("No payment methods available for '{code}'.");
            }
        }
        Command::Interactive => interactive(controller, inbound).await,
    }

    Ok(())
}

type Controller = WorkflowController<client_core::WsSender>;

async fn countries(
    controller: Controller,
    inbound: mpsc::UnboundedReceiver<ServerEvent>,
    wait: Duration,
) -> Result<ViewState> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut actions = Some(action_tx);
    let mut loaded = false;

    let run = run_workflow(controller, inbound, action_rx, |_, phase| {
        if phase != WorkflowPhase::Init {
            loaded = true;
            actions = None;
        }
    });
    let view = timeout(wait, run)
        .await
        .context("timed out waiting for the residence list")?;
    if !loaded {
        bail!("connection closed before the residence list arrived");
    }
    Ok(view)
}

async fn methods(
    controller: Controller,
    inbound: mpsc::UnboundedReceiver<ServerEvent>,
    code: &str,
    wait: Duration,
) -> Result<ViewState> {
    if code.is_empty() {
        bail!("country code must not be empty");
    }
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut actions = Some(action_tx);
    let mut unknown_code = false;
    let mut requested = false;
    let mut in_flight = false;
    let mut answered = false;

    let run = run_workflow(controller, inbound, action_rx, |view, phase| {
        let Some(tx) = actions.as_ref() else {
            return;
        };
        match phase {
            WorkflowPhase::Init => {}
            WorkflowPhase::ListLoaded if !requested => {
                if !view.options.iter().any(|option| option.value == code) {
                    unknown_code = true;
                    actions = None;
                    return;
                }
                let _ = tx.send(UserAction::SelectCountry(code.to_string()));
                let _ = tx.send(UserAction::GetList);
                requested = true;
            }
            WorkflowPhase::MethodsRequested if !in_flight => {
                info!(residence = code, "waiting for payment methods");
                in_flight = true;
            }
            _ if in_flight && !view.loading => {
                // An empty answer leaves the workflow in CountrySelected.
                answered = true;
                actions = None;
            }
            _ => {}
        }
    });
    let view = timeout(wait, run)
        .await
        .context("timed out waiting for payment methods")?;

    if unknown_code {
        bail!("unknown country code '{code}'");
    }
    if !answered {
        bail!("connection closed before payment methods arrived");
    }
    Ok(view)
}

async fn interactive(controller: Controller, inbound: mpsc::UnboundedReceiver<ServerEvent>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Ok(Some(action)) => {
                    if action_tx.send(action).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(message) => eprintln!("{message}"),
            }
        }
    });

    run_workflow(controller, inbound, action_rx, |view, phase| {
        print!("{}", render::render_screen(view, phase));
    })
    .await;

    if let Some(notice) = session_end_notice(reader.is_finished()) {
        // The stdin reader blocks until the next line; don't wait for it.
        eprintln!("{notice}");
        std::process::exit(0);
    }
}

/// A still-running stdin reader means the socket, not the user, ended the session.
fn session_end_notice(reader_finished: bool) -> Option<&'static str> {
    (!reader_finished).then_some("connection closed by server")
}

/// `Ok(None)` means quit.
fn parse_command(line: &str) -> Result<Option<UserAction>, String> {
    let mut words = line.split_whitespace();
    let action = match (words.next(), words.next(), words.next()) {
        (Some("select"), code, None) => {
            UserAction::SelectCountry(code.unwrap_or_default().to_string())
        }
        (Some("get"), None, _) => UserAction::GetList,
        (Some("clear"), None, _) => UserAction::Clear,
        (Some("show"), None, _) => UserAction::Show,
        (Some("quit" | "exit"), None, _) => return Ok(None),
        _ => {
            return Err(format!(
                "unrecognized command '{}'; expected: select [code] | get | clear | show | quit",
                line.trim()
            ))
        }
    };
    Ok(Some(action))
}
