use std::net::Ipv4Addr;
use std::time::Duration;

use thiserror::Error;

/// Absolute ceiling on simultaneously outstanding connection attempts.
pub const MAX_SLOTS: usize = 1024;

pub const DEFAULT_SLOTS: usize = 256;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Rejected before a single attempt is issued; the scan never starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port range: first port {first} is above last port {last}")]
    PortRangeInverted { first: u16, last: u16 },
    #[error("port must be a number within 1-65534, got {0}")]
    PortOutOfRange(u16),
    #[error("prefix length must be within 0-32, got {0}")]
    PrefixTooLong(u8),
    #[error("parallel attempts must be within 1-{MAX_SLOTS}, got {0}")]
    BadCapacity(usize),
    #[error("poll interval cannot be above the timeout value")]
    PollAboveTimeout,
}

/// Validated input for one sweep run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// First address of the host range; the sweep starts here, not at the
    /// normalized network base.
    pub base_addr: Ipv4Addr,
    /// Prefix length bounding the host range (0-32).
    pub prefix: u8,
    pub first_port: u16,
    pub last_port: u16,
    /// Upper bound on simultaneously outstanding attempts.
    pub capacity: usize,
    /// Time budget for a single connection attempt.
    pub timeout: Duration,
    /// Sleep between polling passes.
    pub poll_interval: Duration,
    pub verbose: bool,
}

impl ScanConfig {
    pub fn new(base_addr: Ipv4Addr, prefix: u8, first_port: u16, last_port: u16) -> Self {
        Self {
            base_addr,
            prefix,
            first_port,
            last_port,
            capacity: DEFAULT_SLOTS,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            verbose: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix > 32 {
            return Err(ConfigError::PrefixTooLong(self.prefix));
        }
        for port in [self.first_port, self.last_port] {
            if !(1..=65534).contains(&port) {
                return Err(ConfigError::PortOutOfRange(port));
            }
        }
        if self.first_port > self.last_port {
            return Err(ConfigError::PortRangeInverted {
                first: self.first_port,
                last: self.last_port,
            });
        }
        if self.capacity == 0 || self.capacity > MAX_SLOTS {
            return Err(ConfigError::BadCapacity(self.capacity));
        }
        if self.poll_interval > self.timeout {
            return Err(ConfigError::PollAboveTimeout);
        }
        Ok(())
    }
}
