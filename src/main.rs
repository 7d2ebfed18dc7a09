use anyhow::{Context, Result};
use tracing::info;

mod types;
mod config;
mod parsing;
mod aggregate;
mod report;
mod sensu;
mod collector;

use aggregate::Aggregate;
use collector::EventCollector;
use config::load_config;
use report::{evaluate, percent_ok, Verdict};
use sensu::SensuClient;
use types::Status;

#[tokio::main]
async fn main() {
    init_tracing();

    // Anything that stops the check from judging the aggregate is UNKNOWN.
    let status = match run().await {
        Ok(verdict) => {
            println!("{}", verdict);
            verdict.status
        }
        Err(e) => {
            println!("{}: {:#}", Status::Unknown, e);
            Status::Unknown
        }
    };

    std::process::exit(status.exit_code());
}

async fn run() -> Result<Verdict> {
    let cfg = load_config()?;
    info!("namespaces = {:?}", cfg.namespaces);

    let client = SensuClient::new(&cfg.backend).context("Failed to build backend client")?;
    let session = client
        .authenticate()
        .await
        .with_context(|| format!("Failed to authenticate against {}", client.base_url()))?;

    let aggregate = Aggregate::new(cfg.check_labels.clone(), cfg.entity_labels.clone());
    let collector = EventCollector::new(&client, &aggregate);
    let tally = collector
        .collect(&session, &cfg.namespaces)
        .await
        .context("Failed to collect events")?;

    println!("Counters: {}", tally);
    if let Some(percent) = percent_ok(&tally) {
        println!("Percent OK: {}", percent);
    }

    let verdict = evaluate(&tally, &cfg.thresholds);
    info!("aggregate verdict: {}", verdict.status);
    Ok(verdict)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
