#![deny(rust_2018_idioms)]

use accountant_client::poller::{poll_pending_transfers, POLL_INTERVAL};
use accountant_client::PendingTransfer;
use anyhow::Context;
use monitor_lib::driver;
use monitor_lib::sink::LogSink;
use monitor_watcher::{NearWatcher, Watcher};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    setup_tracing();

    let config = config::Config::parse();

    info!(version = env!("CARGO_PKG_VERSION"), "🏁 Starting monitor.");

    let cancellation = CancellationToken::new();

    let accountant = match config.accountant {
        Some(accountant) => {
            let client = accountant_client::Client::new(accountant.url, &accountant.contract)
                .context("Creating accountant client")?;
            let (tx, rx) = watch::channel(Vec::new());

            let poller = tokio::spawn(poll_pending_transfers(
                client,
                POLL_INTERVAL,
                tx,
                cancellation.clone(),
            ));
            let report = tokio::spawn(report_pending_transfers(rx));
            Some((poller, report))
        }
        None => {
            info!("Accountant poller disabled, set --accountant.url and --accountant.contract to enable it");
            None
        }
    };

    let watcher = NearWatcher::new(config.near);
    info!(chain=%watcher.chain(), core_contract=%watcher.core_contract(), "Watching");

    let driver = {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            driver::run(&watcher, &LogSink, config.driver, cancellation).await;
        })
    };

    tokio::signal::ctrl_c()
        .await
        .context("Listening for shutdown signal")?;
    info!("Shutdown signal received, stopping");
    cancellation.cancel();

    driver.await.context("Joining driver task")?;
    if let Some((poller, report)) = accountant {
        poller.await.context("Joining accountant poller")?;
        // Ends once the poller dropped its sender.
        report.await.context("Joining accountant report")?;
    }

    Ok(())
}

async fn report_pending_transfers(mut rx: watch::Receiver<Vec<PendingTransfer>>) {
    while rx.changed().await.is_ok() {
        let pending = rx.borrow_and_update();
        info!(count=%pending.len(), "Accountant pending transfers");
        for transfer in pending.iter() {
            tracing::debug!(
                emitter_chain=%transfer.key.emitter_chain,
                emitter_address=%transfer.key.emitter_address,
                sequence=%transfer.key.sequence,
                observations=%transfer.data.len(),
                "Pending transfer"
            );
        }
    }
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
