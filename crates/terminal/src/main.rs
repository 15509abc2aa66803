//! Terminal entry point.

use std::io::Write as _;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tsmpos_observability::LogFormat;
use tsmpos_terminal::commands::HELP;
use tsmpos_terminal::{view, Command, Coordinator, HttpApi, Notice, PosConfig, PosError, PosState};

/// Point-of-sale terminal for the TSM stock backend.
#[derive(Parser)]
#[command(name = "tsm-pos")]
struct Cli {
    /// Backend base URL (overrides TSM_API_BASE).
    #[arg(long)]
    api_base: Option<String>,

    /// Emit logs (stderr) as JSON.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tsmpos_observability::init(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let config = PosConfig::from_env().with_api_base_override(cli.api_base);
    tracing::info!(api_base = %config.api_base, "starting point-of-sale terminal");

    let api = HttpApi::new(&config);
    let coordinator = Coordinator::new(api.clone(), api);

    let mut state = coordinator.initial_load(PosState::new()).await;
    println!("{}", view::render(&state));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", view::render_notice(&Notice::from(&PosError::from(e))));
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            _ => {}
        }

        let shows = command.clone();
        let transition = coordinator.dispatch(state, command).await;
        state = transition.state;

        for notice in &transition.notices {
            println!("{}", view::render_notice(notice));
        }
        match shows {
            Command::List => print!("{}", view::render_products(&state)),
            Command::Cart | Command::Add(_) => print!("{}", view::render_cart(state.cart())),
            Command::SetField(..) => print!("{}", view::render_form(state.form())),
            _ => print!("{}", view::render(&state)),
        }
    }

    tracing::info!("session ended");
    Ok(())
}
