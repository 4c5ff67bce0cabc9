//! Form-Sync CLI - headless composition root.
//!
//! Builds the bridge over an in-memory page and a reqwest client, performs one
//! panel interaction against a live control server, waits for the reply and
//! prints what the page would show.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formsync::domain::{Display, Visibility};
use formsync::infrastructure::config::{layout_from_lookup, ClientConfig, ConfigError, ENV_LAYOUT};
use formsync::infrastructure::http_client::ReqwestHttpClient;
use formsync::infrastructure::page::MemoryPage;
use formsync::infrastructure::spawner::TokioSpawner;
use formsync::{FormControl, FormSyncBridge, PageLayout, PowerState};

#[derive(Parser, Debug)]
#[command(name = "formsync-cli", about = "Drive the matrix control panel from the terminal")]
struct Cli {
    /// Base URL of the control server (overrides FORMSYNC_BASE_URL)
    #[arg(long)]
    url: Option<String>,

    /// Panel variant (overrides FORMSYNC_LAYOUT)
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Form action the controls post to
    #[arg(long, default_value = "/control")]
    action: String,

    /// Print the resulting page state as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LayoutArg {
    Basic,
    Rich,
}

impl LayoutArg {
    fn as_env(self) -> &'static str {
        match self {
            LayoutArg::Basic => "basic",
            LayoutArg::Rich => "rich",
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PowerArg {
    On,
    Off,
}

impl From<PowerArg> for PowerState {
    fn from(arg: PowerArg) -> Self {
        match arg {
            PowerArg::On => PowerState::On,
            PowerArg::Off => PowerState::Off,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select a game mode
    Mode {
        value: String,
        #[arg(long, default_value = "mode")]
        name: String,
    },
    /// Select the number of players
    Players {
        value: String,
        #[arg(long, default_value = "players")]
        name: String,
    },
    /// Click the power toggle
    Power {
        /// State the toggle is in before the click
        #[arg(long, value_enum, default_value = "off")]
        from: PowerArg,
        #[arg(long, default_value = "power")]
        name: String,
    },
}

#[derive(Serialize)]
struct PageReport {
    response: String,
    players_visible: Option<bool>,
    players_selected_index: Option<usize>,
    submit_hidden: bool,
    power: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formsync=debug,formsync_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let client_config = match &cli.url {
        Some(url) => ClientConfig::from_env()?.with_base_url(url)?,
        None => ClientConfig::from_env()?,
    };
    let layout = resolve_layout(|key| std::env::var(key).ok(), cli.layout)?;

    tracing::info!(base_url = %client_config.base_url, "Starting Form-Sync CLI");

    let page = Arc::new(MemoryPage::for_layout(&layout));
    let spawner = Arc::new(TokioSpawner::new());
    let http = Arc::new(ReqwestHttpClient::new(&client_config));
    let bridge = FormSyncBridge::new(http, page.clone(), spawner.clone(), layout.clone());

    bridge.init_page().context("page initialization failed")?;

    let power = match cli.command {
        Command::Mode { value, name } => {
            bridge.on_mode_changed(&FormControl::new(name, value).in_form(&cli.action))?;
            None
        }
        Command::Players { value, name } => {
            bridge.on_players_changed(&FormControl::new(name, value).in_form(&cli.action))?;
            None
        }
        Command::Power { from, name } => {
            let from = PowerState::from(from);
            let mut control = FormControl::new(name, from.label())
                .with_class(from.class_name())
                .in_form(&cli.action);
            let state = bridge.on_power_toggled(&mut control)?;
            tracing::info!(from = %from, to = %state, "Power toggled");
            Some(state)
        }
    };

    spawner.join_all().await;

    let report = report(&page, &layout, power);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.response);
    }
    Ok(())
}

/// Layout from the environment, with the variant optionally forced from the
/// command line. Element ids and the sentinel still come from the environment.
fn resolve_layout(
    lookup: impl Fn(&str) -> Option<String>,
    variant: Option<LayoutArg>,
) -> Result<PageLayout, ConfigError> {
    layout_from_lookup(|key| match (key, variant) {
        (ENV_LAYOUT, Some(arg)) => Some(arg.as_env().to_string()),
        _ => lookup(key),
    })
}

fn report(page: &MemoryPage, layout: &PageLayout, power: Option<PowerState>) -> PageReport {
    let players = layout.players.as_ref();
    PageReport {
        response: page.inner_html(&layout.response_id).unwrap_or_default(),
        players_visible: players
            .map(|p| page.display(&p.select_id) == Some(Display::InlineBlock)),
        players_selected_index: players.and_then(|p| page.selected_index(&p.select_id)),
        submit_hidden: page.visibility(&layout.submit_id) == Some(Visibility::Hidden),
        power: power.map(|state| state.label().to_string()),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
