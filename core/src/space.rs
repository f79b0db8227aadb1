//! Target enumeration for one sweep.

use std::net::Ipv4Addr;

use sweepr_common::network::range::Ipv4Range;

/// Cursor over the cross product of a host range and a port range.
///
/// Targets come out host-major, port-minor: every port of one host before
/// the next host. Nothing is materialized; the cursor only moves forward,
/// and once exhausted it stays exhausted.
#[derive(Debug)]
pub struct AddressSpace {
    hosts: Ipv4Range,
    first_port: u16,
    last_port: u16,
    next_host: u32,
    next_port: u16,
    exhausted: bool,
}

impl AddressSpace {
    pub fn new(hosts: Ipv4Range, first_port: u16, last_port: u16) -> Self {
        Self {
            hosts,
            first_port,
            last_port,
            next_host: hosts.start_addr.into(),
            next_port: first_port,
            exhausted: false,
        }
    }

    /// Total number of (host, port) targets in the space.
    pub fn total(&self) -> u64 {
        let ports = u64::from(self.last_port - self.first_port + 1);
        self.hosts.len() * ports
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for AddressSpace {
    type Item = (Ipv4Addr, u16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let target = (Ipv4Addr::from(self.next_host), self.next_port);

        let last_host: u32 = self.hosts.end_addr.into();
        if self.next_port == self.last_port {
            if self.next_host == last_host {
                self.exhausted = true;
            } else {
                self.next_host += 1;
                self.next_port = self.first_port;
            }
        } else {
            self.next_port += 1;
        }

        Some(target)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use sweepr_common::network::range::cidr_range;

    #[test]
    fn enumeration_is_host_major_port_minor() {
        let hosts = cidr_range(Ipv4Addr::new(10, 0, 0, 0), 30).unwrap();
        let mut space = AddressSpace::new(hosts, 80, 81);

        let expected = [
            (Ipv4Addr::new(10, 0, 0, 0), 80),
            (Ipv4Addr::new(10, 0, 0, 0), 81),
            (Ipv4Addr::new(10, 0, 0, 1), 80),
            (Ipv4Addr::new(10, 0, 0, 1), 81),
            (Ipv4Addr::new(10, 0, 0, 2), 80),
            (Ipv4Addr::new(10, 0, 0, 2), 81),
            (Ipv4Addr::new(10, 0, 0, 3), 80),
            (Ipv4Addr::new(10, 0, 0, 3), 81),
        ];

        for target in expected {
            assert_eq!(space.next(), Some(target));
        }
        assert_eq!(space.next(), None);
    }

    #[test]
    fn exhaustion_is_permanent() {
        let hosts = cidr_range(Ipv4Addr::new(127, 0, 0, 1), 32).unwrap();
        let mut space = AddressSpace::new(hosts, 443, 443);

        assert!(!space.is_exhausted());
        assert_eq!(space.next(), Some((Ipv4Addr::new(127, 0, 0, 1), 443)));
        assert!(space.is_exhausted());

        // no rewind
        assert_eq!(space.next(), None);
        assert_eq!(space.next(), None);
    }

    #[test]
    fn total_counts_the_cross_product() {
        let hosts = cidr_range(Ipv4Addr::new(192, 168, 0, 0), 24).unwrap();
        let space = AddressSpace::new(hosts, 1, 1000);
        assert_eq!(space.total(), 256 * 1000);
    }

    #[test]
    fn total_matches_enumerated_count() {
        let hosts = cidr_range(Ipv4Addr::new(10, 0, 0, 0), 28).unwrap();
        let space = AddressSpace::new(hosts, 20, 25);
        let total = space.total();
        assert_eq!(space.count() as u64, total);
    }
}
