//! rSala library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (booking API client, query cache, services, layout logic).

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod services;
pub mod session;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::context::AppContext;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &mut AppContext) -> AppResult<()> {
    use cli::commands as cmds;

    match &cli.command {
        Commands::Init => cmds::init::handle(cli),
        Commands::Config { .. } => cmds::config::handle(&cli.command, &ctx.cfg),
        Commands::Login { username } => cmds::session::login(username, ctx),
        Commands::Logout => cmds::session::logout(ctx),
        Commands::Whoami => cmds::session::whoami(ctx),
        Commands::Log { .. } => cmds::log::handle(&cli.command, ctx),
        Commands::Dashboard { date } => cmds::dashboard::handle(ctx, date),
        Commands::Slots { date, shift } => cmds::slots::handle(ctx, date, shift.as_deref()),
        Commands::Reservation(cmd) => cmds::reservation::handle(cmd, ctx),
        Commands::Room(cmd) => cmds::room::handle(cmd, ctx),
        Commands::Zones(cmd) => cmds::zones::handle(cmd, ctx),
        Commands::Table(cmd) => cmds::table::handle(cmd, ctx),
        Commands::Layout { slot, zoom } => cmds::layout::handle(ctx, slot, *zoom),
        Commands::Template(cmd) => cmds::template::handle(cmd, ctx),
        Commands::Hours(cmd) => cmds::hours::handle(cmd, ctx),
        Commands::Export {
            date,
            format,
            file,
            force,
        } => cmds::export::handle(ctx, date, *format, file, *force),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `log_level`.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("rsala={}", cfg.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("rsala=warn"));

    // una seconda init (test in-process) non è un errore
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta (init non ne ha bisogno)
    let mut cfg = if matches!(cli.command, Commands::Init) {
        Config::default()
    } else {
        Config::load()?
    };

    // 3️⃣ override da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(api) = &cli.api {
        cfg.api_base_url = api.clone();
        cfg.validate()?;
    }

    init_tracing(&cfg);

    // 4️⃣ passa tutto al dispatcher
    let mut ctx = AppContext::new(cfg);
    dispatch(&cli, &mut ctx)
}
