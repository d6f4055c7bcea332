use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite store and its schema
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ CONFIG + FILES
    //
    // Config::init_all creates:
    //   ~/.eqc/
    //   ~/.eqc/eqc.conf
    // and touches the database file. In test mode the config file is left
    // alone.
    //
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    println!("⚙️  Initializing eqc…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database    : {}", &cfg.database);

    //
    // 2️⃣ SCHEMA
    //
    // Opening the store creates the key-value table, so the first scan
    // session finds everything in place.
    //
    LocalStore::open(&cfg.database)?;

    println!("✅ Store initialized at {}", &cfg.database);
    println!("🎉 eqc initialization completed!");
    Ok(())
}
