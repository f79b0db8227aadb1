use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses in the inclusive range.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        u64::from(end) - u64::from(start) + 1
    }
}

/// Derives the host range for a base address and prefix length.
///
/// The range starts at `ip` as given and runs up to the block's broadcast
/// address, so `10.0.0.2/30` covers `10.0.0.2 - 10.0.0.3`.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Ipv4Range> {
    let network = pnet::ipnetwork::Ipv4Network::new(ip, prefix)?;
    let end = network.broadcast();

    Ok(Ipv4Range::new(ip, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_range_covers_block_from_base() {
        let range = cidr_range(Ipv4Addr::new(10, 0, 0, 0), 30).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(10, 0, 0, 3));
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn cidr_range_starts_at_given_addr() {
        let range = cidr_range(Ipv4Addr::new(192, 168, 1, 100), 24).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 1, 100));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(range.len(), 156);
    }

    #[test]
    fn cidr_range_single_host() {
        let range = cidr_range(Ipv4Addr::new(127, 0, 0, 1), 32).unwrap();
        assert_eq!(range.start_addr, range.end_addr);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn cidr_range_rejects_bad_prefix() {
        assert!(cidr_range(Ipv4Addr::new(10, 0, 0, 0), 33).is_err());
    }
}
