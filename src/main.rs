mod cli;
mod config;
mod database;
mod http;
mod schema;
mod validation;

use crate::cli::Cli;
use crate::config::Config;
use crate::database::Database;
use anyhow::Result;
use clap::Parser;
use log::{debug, LevelFilter};

#[actix_web::main]
async fn main() -> Result<()> {
    // A .env file is optional, real environment variables take precedence over it
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_module_level("actix_server", LevelFilter::Off)
        .with_module_level("mio", LevelFilter::Off)
        .with_level(if cli.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Debug
        })
        .init()?;

    let config = Config::from_cli(&cli);
    let mut db = Database::open(&config.db_uri)?;
    db.init(config.max_field_length)?;
    debug!("Opened database {}", config.db_uri);

    http::start_server(config, db, (cli.host.as_str(), cli.port)).await?;

    Ok(())
}
