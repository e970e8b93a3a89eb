use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open;
use crate::db::log;
use crate::db::migrate::applied_versions;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the local state database and its pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ PREPARA CONFIGURAZIONE
    //
    let cfg = Config::init_all(cli.db.clone(), cli.api.clone(), cli.test)?;
    let path = Config::config_file();

    println!("⚙️  Initializing rSala…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🌐 Booking API : {}", &cfg.api_base_url);

    //
    // 2️⃣ APERTURA DB + MIGRAZIONI
    //
    let pool = open(&cfg.database)?;
    let versions = applied_versions(&pool.conn)?;
    println!("✅ Database initialized at {}", &cfg.database);
    if let Some(latest) = versions.last() {
        println!("🧩 Schema      : {} migrations (latest {latest})", versions.len());
    }

    //
    // 3️⃣ LOG INTERNO (non bloccante)
    //
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rSala initialization completed!");
    Ok(())
}
