pub mod config;
pub mod cron;
pub mod error;
pub mod navigation;
pub mod page;
pub mod service;
pub mod state;

use anyhow::Context;
use clap::{Parser, Subcommand};
use state::AppState;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cronwf", version, about = "List and create cron workflows")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace filter; omit to use the configured default, "" for all namespaces
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the cron workflow list
    List,
    /// Submit a JSON draft through the create panel
    Create {
        /// Draft file, or "-" for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },
    /// Print the example document the create panel starts from
    Example,
}

/// Drive the list page headlessly for one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    config::apply_env_overrides(&mut config);
    config::validate_config(&config)?;

    let docs_url = config.ui.docs_url.clone();
    let state = AppState::new(config)?;
    let page = state.list_page();

    if let Some(ref namespace) = cli.namespace {
        config::validate_namespace(namespace)?;
        page.url_state().set_namespace(namespace);
    }

    match cli.command {
        Command::List => {
            page.mount().await;
            let view = page.view()?;
            print!("{}", page::render_text(&view, &docs_url));
        }
        Command::Create { file } => {
            let text = read_draft(&file)?;
            page.mount().await;
            page.open_create_panel();
            let created = page.submit(&text).await?;
            tracing::info!("Created cron workflow {}", created.key());
            println!("{}", state.current_url());
        }
        Command::Example => {
            print!("{}", cron::example_placeholder(&page.namespace()));
        }
    }

    Ok(())
}

fn read_draft(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read draft from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read draft {:?}", file))
}
