use std::{error::Error, process, time::Duration};

use chrono::Utc;
use clap::Parser;
use tools::payload::test_message;

/// Publishes OwnTracks location messages to a running timeline service.
#[derive(Parser)]
#[command(name = "send-test-fix")]
struct Cli {
    /// Ingestion endpoint
    #[arg(long, default_value = "http://127.0.0.1:5000/pub")]
    url: String,

    #[arg(long, default_value = "52.0406", allow_negative_numbers = true)]
    lat: f64,

    #[arg(long, default_value = "5.3013", allow_negative_numbers = true)]
    lon: f64,

    /// Horizontal accuracy in metres
    #[arg(long, default_value = "5")]
    acc: f64,

    /// Tracker id, also used to build the topic
    #[arg(long, default_value = "test-laptop")]
    tid: String,

    /// Number of messages, one second apart. Fills the smoothing window.
    #[arg(long, default_value = "1")]
    count: u32,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(why) = send(Cli::parse()).await {
        eprintln!("could not reach the service: {}", why);
        process::exit(1);
    }
}

async fn send(cli: Cli) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::new();

    for n in 0..cli.count {
        if n > 0 {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        let message = test_message(cli.lat, cli.lon, cli.acc, &cli.tid, Utc::now().timestamp());
        log::debug!("{}", serde_json::to_string(&message)?);

        let response = client.post(&cli.url).json(&message).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            println!("{} {}, {} sent: {}", status.as_u16(), cli.lat, cli.lon, body);
        } else {
            println!("server answered {}: {}", status, body);
        }
    }

    Ok(())
}
