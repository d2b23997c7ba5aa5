mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use cs_core::config::Config;
use cs_core::{Account, AccountId, Creature};
use cs_db::pool::{get_conn, init_pool};
use cs_db::{migrations, AccountRepository};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CreatureSummary<'a> {
    entity_id: String,
    kind: &'a str,
    name: &'a str,
    level: i16,
    region: i32,
    life: f32,
    life_max: f32,
    items: usize,
    skills: usize,
    titles: usize,
    keywords: usize,
}

impl<'a> From<&'a Creature> for CreatureSummary<'a> {
    fn from(c: &'a Creature) -> Self {
        Self {
            entity_id: c.entity_id.to_string(),
            kind: c.kind.as_str(),
            name: &c.name,
            level: c.level,
            region: c.position.region,
            life: c.vitals.life.current,
            life_max: c.vitals.life.max(),
            items: c.inventory.len(),
            skills: c.skills.len(),
            titles: c.titles.len(),
            keywords: c.keywords.len(),
        }
    }
}

#[derive(Serialize)]
struct AccountSummary<'a> {
    id: &'a str,
    authority: u8,
    banned: bool,
    characters: Vec<CreatureSummary<'a>>,
    pets: Vec<CreatureSummary<'a>>,
}

impl<'a> From<&'a Account> for AccountSummary<'a> {
    fn from(a: &'a Account) -> Self {
        Self {
            id: a.id.as_str(),
            authority: a.authority,
            banned: a.is_banned(Utc::now()),
            characters: a.characters.iter().map(CreatureSummary::from).collect(),
            pets: a.pets.iter().map(CreatureSummary::from).collect(),
        }
    }
}

fn load_config(cli: &Cli) -> Config {
    let mut config = Config::load_or_default(cli.config.as_deref());
    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }
    config
}

fn migrate(config: &Config) -> Result<()> {
    let pool = init_pool(&config.database).context("failed to open database")?;
    let conn = get_conn(&pool)?;
    let version = migrations::current_version(&conn)?;
    println!(
        "Database {} is at schema version {version}",
        config.database.path.display()
    );
    Ok(())
}

fn show_account(config: &Config, id: &str, full: bool) -> Result<()> {
    let pool = init_pool(&config.database).context("failed to open database")?;
    let repo = AccountRepository::with_default_hooks(pool);

    let Some(account) = repo.load_account(&AccountId::new(id))? else {
        anyhow::bail!("account '{id}' not found");
    };

    let json = if full {
        serde_json::to_string_pretty(&account)?
    } else {
        serde_json::to_string_pretty(&AccountSummary::from(&account))?
    };
    println!("{json}");
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            Config::from_json(&contents)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        for w in &warnings {
            println!("! {w}");
        }
    }
    println!("  Database: {}", config.database.path.display());
    println!("  Pool size: {}", config.database.pool_size);
    println!("  WAL: {}", config.database.wal);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli);

    // Respect RUST_LOG if set, then the config file, then the verbose flag.
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| config.logging.filter.clone())
        .unwrap_or_else(|| {
            if cli.verbose {
                "channel_store=trace,cs_db=trace,cs_core=debug".to_string()
            } else {
                "channel_store=info,cs_db=info,cs_core=info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Migrate => migrate(&config),
        Commands::Account { ref id, full } => show_account(&config, id, full),
        Commands::Validate { ref file } => {
            let path = file.as_deref().or(cli.config.as_deref());
            validate_config(path)
        }
        Commands::Version => {
            println!("channel-store {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
