//! One unit of bounded attempt capacity.

use std::io;
use std::mem;
use std::net::{SocketAddr, SocketAddrV4};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::net::{TcpSocket, TcpStream};
use tokio::task::JoinHandle;

/// Transport creation failed, typically because the process ran out of
/// file descriptors. The target was never attempted; the caller should
/// back off and reissue it later.
#[derive(Debug, Error)]
#[error("cannot create socket: {0}")]
pub struct ResourceExhausted(io::Error);

/// A connection attempt in flight: the target, when it was issued, and the
/// task that owns the connecting socket.
struct Attempt {
    target: SocketAddrV4,
    started: Instant,
    task: JoinHandle<io::Result<TcpStream>>,
}

enum SlotState {
    Idle,
    Connecting(Attempt),
}

/// Outcome of one transition check on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Slot holds no attempt.
    Idle,
    /// Attempt still in flight; the slot stays occupied.
    Pending,
    Open(SocketAddrV4),
    Closed(SocketAddrV4),
    TimedOut(SocketAddrV4),
}

/// Holds at most one outstanding connection attempt. Every way out of the
/// occupied state tears the transport down before the slot can be reused.
pub struct AttemptSlot {
    state: SlotState,
}

impl AttemptSlot {
    pub fn empty() -> Self {
        Self {
            state: SlotState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SlotState::Idle)
    }

    /// Issues a non-blocking connect towards `target` and records the start
    /// instant. On failure the slot is left idle and the target untouched.
    pub fn launch(&mut self, target: SocketAddrV4) -> Result<(), ResourceExhausted> {
        debug_assert!(self.is_idle());

        let socket = TcpSocket::new_v4().map_err(ResourceExhausted)?;
        let task = tokio::spawn(async move { socket.connect(SocketAddr::V4(target)).await });

        self.state = SlotState::Connecting(Attempt {
            target,
            started: Instant::now(),
            task,
        });
        Ok(())
    }

    /// Applies one transition check. Timeout eviction wins over a completed
    /// result when both hold at once.
    pub async fn check(&mut self, timeout: Duration) -> Verdict {
        let attempt = match mem::replace(&mut self.state, SlotState::Idle) {
            SlotState::Idle => return Verdict::Idle,
            SlotState::Connecting(attempt) => attempt,
        };

        if attempt.started.elapsed() >= timeout {
            attempt.task.abort();
            return Verdict::TimedOut(attempt.target);
        }

        if !attempt.task.is_finished() {
            self.state = SlotState::Connecting(attempt);
            return Verdict::Pending;
        }

        let target = attempt.target;
        match attempt.task.await {
            // the stream drops right here; a confirmed open needs no byte
            Ok(Ok(_stream)) => Verdict::Open(target),
            Ok(Err(_)) | Err(_) => Verdict::Closed(target),
        }
    }

    /// Forces the slot back to idle, aborting any in-flight attempt.
    /// Aborting drops the socket, which closes the handle. Idempotent:
    /// evicting an idle slot is a no-op.
    pub fn evict(&mut self) -> Option<SocketAddrV4> {
        match mem::replace(&mut self.state, SlotState::Idle) {
            SlotState::Idle => None,
            SlotState::Connecting(attempt) => {
                attempt.task.abort();
                Some(attempt.target)
            }
        }
    }
}
