//! # Sweep Target Model
//!
//! Defines the command-line facing inputs for a sweep.
//!
//! This module handles parsing the two coordinates of a sweep:
//! * The host block: a single IP address or a CIDR block (e.g. `192.168.1.0/24`).
//! * The port spec: a single port or an inclusive range (e.g. `1-1000`).

use std::net::Ipv4Addr;
use std::str::FromStr;

/// A block of hosts to sweep: a base IPv4 address plus prefix length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostSpec {
    pub base_addr: Ipv4Addr,
    pub prefix: u8,
}

impl FromStr for HostSpec {
    type Err = String;

    /// Parses a string into a `HostSpec`.
    ///
    /// Supported formats:
    /// * **Host**: a single IPv4 address (e.g. "192.168.1.5"), swept alone.
    /// * **CIDR**: "Base/Prefix" (e.g. "192.168.1.0/24").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            let base_addr = s
                .parse::<Ipv4Addr>()
                .map_err(|e| format!("invalid host '{s}': {e}"))?;
            return Ok(Self {
                base_addr,
                prefix: 32,
            });
        };

        let base_addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("invalid IP in CIDR '{ip_str}': {e}"))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| format!("invalid prefix in CIDR '{prefix_str}': {e}"))?;

        if prefix > 32 {
            return Err(format!("prefix in CIDR '{s}' must be within 0-32"));
        }

        Ok(Self { base_addr, prefix })
    }
}

/// An inclusive port range; a single port is a one-element range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortSpec {
    pub first: u16,
    pub last: u16,
}

impl FromStr for PortSpec {
    type Err = String;

    /// Parses a string into a `PortSpec`.
    ///
    /// Supported formats:
    /// * **Single**: "22".
    /// * **Range**: "First-Last" (e.g. "1-1000").
    ///
    /// Only the syntax is checked here; bounds and ordering are enforced by
    /// `ScanConfig::validate`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((first_str, last_str)) = s.split_once('-') else {
            let port = parse_port(s)?;
            return Ok(Self {
                first: port,
                last: port,
            });
        };

        Ok(Self {
            first: parse_port(first_str)?,
            last: parse_port(last_str)?,
        })
    }
}

fn parse_port(s: &str) -> Result<u16, String> {
    s.trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid port '{s}': {e}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
