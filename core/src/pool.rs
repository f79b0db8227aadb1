//! Fixed-capacity pool of connection attempts.

use std::net::SocketAddrV4;
use std::time::Duration;

use tracing::{trace, warn};

use crate::slot::{AttemptSlot, Verdict};
use crate::space::AddressSpace;

/// Result of one `fill_idle` call.
#[derive(Debug, Default)]
pub struct FillReport {
    /// Attempts issued this call.
    pub issued: usize,
    /// Transport creation failed; the caller should pause before refilling.
    pub starved: bool,
}

/// Open events and terminal outcome counts from one polling pass.
#[derive(Debug, Default)]
pub struct PollReport {
    pub open: Vec<SocketAddrV4>,
    pub closed: usize,
    pub timed_out: usize,
}

/// Indexed collection of [`AttemptSlot`]s. Capacity is fixed for the life
/// of one sweep; the number of occupied slots never exceeds it.
pub struct ScanPool {
    slots: Vec<AttemptSlot>,
    timeout: Duration,
    /// Target drawn from the space but never attempted because transport
    /// creation failed; reissued before the space is consulted again.
    deferred: Option<SocketAddrV4>,
}

impl ScanPool {
    pub fn new(capacity: usize, timeout: Duration) -> Self {
        let slots = (0..capacity).map(|_| AttemptSlot::empty()).collect();
        Self {
            slots,
            timeout,
            deferred: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding an outstanding attempt.
    pub fn busy(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_idle()).count()
    }

    /// A target is waiting to be reissued after a resource failure.
    pub fn has_backlog(&self) -> bool {
        self.deferred.is_some()
    }

    /// Issues a new attempt into every idle slot until the pool is full or
    /// the space runs out. A transport creation failure stops the pass and
    /// hands the target back, so it is neither lost nor drawn twice.
    pub fn fill_idle(&mut self, space: &mut AddressSpace) -> FillReport {
        let mut report = FillReport::default();

        for idx in 0..self.slots.len() {
            if !self.slots[idx].is_idle() {
                continue;
            }

            let Some(target) = self.next_target(space) else {
                break;
            };

            match self.slots[idx].launch(target) {
                Ok(()) => {
                    trace!(slot = idx, %target, "attempt issued");
                    report.issued += 1;
                }
                Err(err) => {
                    self.deferred = Some(target);
                    warn!(%err, "transport creation failed, backing off");
                    report.starved = true;
                    break;
                }
            }
        }

        report
    }

    fn next_target(&mut self, space: &mut AddressSpace) -> Option<SocketAddrV4> {
        self.deferred
            .take()
            .or_else(|| space.next().map(|(host, port)| SocketAddrV4::new(host, port)))
    }

    /// Visits every occupied slot exactly once, applying the attempt
    /// transition rules. Safe to call with zero occupied slots.
    pub async fn poll_all(&mut self) -> PollReport {
        let mut report = PollReport::default();

        for idx in 0..self.slots.len() {
            match self.slots[idx].check(self.timeout).await {
                Verdict::Idle | Verdict::Pending => {}
                Verdict::Open(target) => {
                    trace!(slot = idx, %target, "connection established");
                    report.open.push(target);
                }
                Verdict::Closed(target) => {
                    trace!(slot = idx, %target, "refused or unreachable");
                    report.closed += 1;
                }
                Verdict::TimedOut(target) => {
                    trace!(slot = idx, %target, "attempt timed out");
                    report.timed_out += 1;
                }
            }
        }

        report
    }

    /// Forces every slot back to idle, closing any outstanding handle.
    /// Returns how many attempts were force-evicted.
    pub fn drain_all(&mut self) -> usize {
        self.slots.iter_mut().filter_map(AttemptSlot::evict).count()
    }
}
