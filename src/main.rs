use anyhow::Result;
use clap::Parser;
use gemini_chat::app::{App, AppEvent};
use gemini_chat::commands::Command;
use gemini_chat::display::{Renderer, DEFAULT_TYPING_DELAY};
use gemini_chat::models::Config;
use gemini_chat::settings::SettingsStore;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-chat")]
#[command(about = "Chat with Gemini from the terminal")]
struct CliArgs {
    /// Model ID to use (overrides GEMINI_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Settings file path (overrides GEMINI_CHAT_SETTINGS).
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Print replies at once instead of typing them out.
    #[arg(long)]
    no_animation: bool,

    /// Send a single message, print the reply and exit.
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Attach an image to the --message turn.
    #[arg(long, value_name = "PATH", requires = "message")]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_chat=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(model) = args.model.clone() {
        config.model = model;
    }

    let store = match args.settings.clone().or_else(|| config.settings_path.clone()) {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::default_location()?,
    };

    let mut app = match App::new(&config, store) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let delay = if args.no_animation {
        Duration::ZERO
    } else {
        DEFAULT_TYPING_DELAY
    };
    let mut renderer = Renderer::new(tokio::io::stdout(), app.settings().dark_mode)
        .with_color(std::io::stdout().is_terminal())
        .with_typing_delay(delay);

    match args.message {
        Some(message) => {
            let mut commands = Vec::new();
            if let Some(image) = args.image {
                commands.push(Command::UploadImage(image));
            }
            commands.push(Command::Send(message));
            for command in commands {
                let events = app.dispatch(command).await?;
                render_all(&mut renderer, &events).await?;
            }
            Ok(())
        }
        None => run_repl(&mut app, &mut renderer).await,
    }
}

async fn run_repl(
    app: &mut App,
    renderer: &mut Renderer<tokio::io::Stdout>,
) -> Result<()> {
    info!("Starting interactive session");

    for message in app.transcript() {
        renderer.message(message).await?;
    }
    renderer.notice("Type /help for commands.").await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        renderer.prompt(app.pending_image().is_some()).await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let events = match app.dispatch(Command::parse(&line)).await {
            Ok(events) => events,
            Err(e) => {
                error!("Command failed: {}", e);
                vec![AppEvent::Notice(format!("Could not save settings: {}", e))]
            }
        };

        if render_all(renderer, &events).await? {
            break;
        }
    }

    info!("Session ended");
    Ok(())
}

/// Render events in order; returns true once a quit was requested.
async fn render_all(
    renderer: &mut Renderer<tokio::io::Stdout>,
    events: &[AppEvent],
) -> Result<bool> {
    let mut quit = false;
    for event in events {
        renderer.render(event).await?;
        quit |= matches!(event, AppEvent::Quit);
    }
    Ok(quit)
}
