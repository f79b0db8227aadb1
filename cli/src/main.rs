mod commands;
mod sink;
mod terminal;

use std::sync::atomic::Ordering;
use std::time::Duration;

use commands::CommandLine;
use sweepr_common::config::ScanConfig;
use sweepr_common::network::range;
use sweepr_core::engine::ScanEngine;
use terminal::{logging, print, progress};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg = ScanConfig {
        base_addr: commands.target.base_addr,
        prefix: commands.target.prefix,
        first_port: commands.ports.first,
        last_port: commands.ports.last,
        capacity: commands.slots,
        timeout: Duration::from_secs(commands.timeout),
        poll_interval: Duration::from_millis(commands.poll_interval),
        verbose: commands.verbose,
    };

    let engine = ScanEngine::new(&cfg)?;

    if cfg.verbose {
        let hosts = range::cidr_range(cfg.base_addr, cfg.prefix)?;
        print::sweep_plan(&cfg, hosts, engine.total(), engine.capacity());
    }

    let cancel = engine.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, draining outstanding attempts");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let mut sink = sink::OpenPortSink::new(commands.output.as_deref(), cfg.verbose)?;
    let mut progress = progress::SweepProgress::new(engine.total());

    let summary = engine.run(&mut sink, &mut progress).await;

    progress.finish();
    print::summary(&summary);

    Ok(())
}
