use std::{env, process};

use database::{DatabaseConnectionInfo, PgDatabase};
use tracking::{config::TrackingConfig, server::Server};
use web::{start_web_server, StartupError, WebState, DEFAULT_BIND_ADDRESS};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(why) = run().await {
        log::error!("{}", why);
        process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = TrackingConfig::from_env()?;
    let address = env::var("WEB_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());

    // database
    let database_connection_info =
        DatabaseConnectionInfo::from_env().ok_or(StartupError::MissingDatabaseConfig)?;
    let database = PgDatabase::connect(database_connection_info)
        .await
        .map_err(StartupError::Database)?;

    // server
    log::info!("filter settings: {:?}", config.filter);
    let server = Server::new(database, config);

    // web server
    start_web_server(
        WebState {
            tracker: server.client("web"),
        },
        &address,
    )
    .await?;

    Ok(())
}
