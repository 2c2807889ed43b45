use chrono::Utc;

use stocksync_app::config::Config;
use stocksync_app::{build_job, build_store, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let handle = build_store(&config)?;
    let job = build_job(&config, handle.store.clone())?;
    let report = job.run(Utc::now()).await;
    tracing::info!(
        "Run complete: {} written, {} failed",
        report.sections_written,
        report.sections_failed
    );

    if let Some(memory) = handle.memory {
        println!("{}", serde_json::to_string_pretty(&memory.snapshot())?);
    }
    Ok(())
}
