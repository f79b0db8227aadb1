//! Sweep orchestration.
//!
//! The engine draws targets from an [`AddressSpace`] into a [`ScanPool`]
//! and drives the fill / sleep / poll cycle until every target has reached
//! a terminal outcome, then force-resolves whatever is still outstanding.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::time;
use tracing::{debug, info};

use sweepr_common::config::ScanConfig;
use sweepr_common::network::range;

use crate::pool::{PollReport, ScanPool};
use crate::report::{ProgressObserver, ProgressSnapshot, ResultSink};
use crate::space::AddressSpace;

/// Pause after a transport creation failure before refilling.
const RESOURCE_BACKOFF: Duration = Duration::from_secs(10);

/// Aggregate result of one sweep.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub total: u64,
    pub issued: u64,
    pub open_found: u64,
    pub closed: u64,
    pub timed_out: u64,
    pub elapsed: Duration,
    pub cancelled: bool,
}

pub struct ScanEngine {
    space: AddressSpace,
    pool: ScanPool,
    timeout: Duration,
    poll_interval: Duration,
    cancel: Arc<AtomicBool>,
    total: u64,
    issued: u64,
    open_found: u64,
    closed: u64,
    timed_out: u64,
}

impl ScanEngine {
    /// Validates the configuration and builds the engine. No attempt is
    /// issued until [`ScanEngine::run`] is called.
    pub fn new(cfg: &ScanConfig) -> anyhow::Result<Self> {
        cfg.validate()?;

        let hosts = range::cidr_range(cfg.base_addr, cfg.prefix)?;
        let space = AddressSpace::new(hosts, cfg.first_port, cfg.last_port);
        let total = space.total();

        // no point holding more slots than there are targets
        let capacity = (cfg.capacity as u64).min(total) as usize;

        Ok(Self {
            space,
            pool: ScanPool::new(capacity, cfg.timeout),
            timeout: cfg.timeout,
            poll_interval: cfg.poll_interval,
            cancel: Arc::new(AtomicBool::new(false)),
            total,
            issued: 0,
            open_found: 0,
            closed: 0,
            timed_out: 0,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Shared flag that stops the sweep when set: no new attempt is issued
    /// past the next loop boundary and outstanding ones are force-resolved.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Runs the sweep to completion or cancellation, forwarding each
    /// confirmed open endpoint to `sink` and a counter snapshot per polling
    /// pass to `progress`.
    ///
    /// Every issued target ends in exactly one terminal outcome: open,
    /// closed, or timed out.
    pub async fn run(
        mut self,
        sink: &mut dyn ResultSink,
        progress: &mut dyn ProgressObserver,
    ) -> ScanSummary {
        let started = Instant::now();
        info!(
            total = self.total,
            capacity = self.pool.capacity(),
            "sweep started"
        );

        while !(self.space.is_exhausted() && !self.pool.has_backlog()) {
            if self.cancelled() {
                break;
            }

            let fill = self.pool.fill_idle(&mut self.space);
            self.issued += fill.issued as u64;
            if fill.starved {
                time::sleep(RESOURCE_BACKOFF).await;
            }

            // bounds CPU usage and gives fresh attempts time to settle
            time::sleep(self.poll_interval).await;

            let report = self.pool.poll_all().await;
            self.absorb(report, sink);
            progress.on_progress(self.snapshot());
        }

        self.drain(sink).await;
        progress.on_progress(self.snapshot());

        let cancelled = self.cancelled();
        if cancelled {
            info!(issued = self.issued, "sweep cancelled, all attempts resolved");
        } else {
            debug!(issued = self.issued, "sweep drained");
        }

        ScanSummary {
            total: self.total,
            issued: self.issued,
            open_found: self.open_found,
            closed: self.closed,
            timed_out: self.timed_out,
            elapsed: started.elapsed(),
            cancelled,
        }
    }

    /// Force-resolves everything still outstanding: one extended wait for
    /// stragglers (skipped on cancellation), one last poll to catch late
    /// completions, then unconditional eviction.
    async fn drain(&mut self, sink: &mut dyn ResultSink) {
        if self.pool.busy() > 0 && !self.cancelled() {
            time::sleep(self.timeout).await;
        }

        let report = self.pool.poll_all().await;
        self.absorb(report, sink);
        self.timed_out += self.pool.drain_all() as u64;
    }

    fn absorb(&mut self, report: PollReport, sink: &mut dyn ResultSink) {
        self.closed += report.closed as u64;
        self.timed_out += report.timed_out as u64;
        for target in report.open {
            self.open_found += 1;
            sink.on_open(target);
        }
    }

    fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            issued: self.issued,
            total: self.total,
            open_found: self.open_found,
        }
    }
}
