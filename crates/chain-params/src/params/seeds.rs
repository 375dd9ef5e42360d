//! Bootstrap peers
//!
//! Fixed seeds are compiled in as raw 16-byte addresses (IPv4 is stored
//! IPv4-mapped) plus a port. On conversion each one gets a synthetic "last
//! seen" time between one and two weeks ago: a node only needs one or two
//! of them, and once connected it receives a pile of addresses with newer
//! timestamps that should win.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use rand::Rng;
use serde::Serialize;

/// Seconds in one week.
pub const ONE_WEEK_SECS: u64 = 7 * 24 * 60 * 60;

/// Compiled-in seed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    /// IPv4 seed stored IPv4-mapped.
    pub const fn ipv4(octets: [u8; 4], port: u16) -> Self {
        let mut addr = [0u8; 16];
        addr[10] = 0xff;
        addr[11] = 0xff;
        addr[12] = octets[0];
        addr[13] = octets[1];
        addr[14] = octets[2];
        addr[15] = octets[3];
        Self { addr, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        let v6 = Ipv6Addr::from(self.addr);
        let ip = match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// Seed address handed to peer discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub addr: SocketAddr,
    /// Unix seconds.
    pub last_seen: u64,
}

/// DNS seed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

/// Convert compiled-in seeds, preserving order.
///
/// `last_seen` is uniform in `(now - 2 weeks, now - 1 week]`.
pub fn convert_seeds<R: Rng>(specs: &[SeedSpec], now: u64, rng: &mut R) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| {
            let jitter = rng.gen_range(0..ONE_WEEK_SECS);
            SeedAddress {
                addr: spec.socket_addr(),
                last_seen: now.saturating_sub(jitter).saturating_sub(ONE_WEEK_SECS),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ipv4_mapped_is_shown_as_ipv4() {
        let spec = SeedSpec::ipv4([192, 0, 2, 7], 20021);
        assert_eq!(spec.socket_addr(), "192.0.2.7:20021".parse().unwrap());
    }

    #[test]
    fn test_ipv6_seed() {
        let mut addr = [0u8; 16];
        addr[0] = 0x20;
        addr[1] = 0x01;
        addr[2] = 0x0d;
        addr[3] = 0xb8;
        addr[15] = 1;
        let spec = SeedSpec { addr, port: 20021 };
        assert_eq!(spec.socket_addr(), "[2001:db8::1]:20021".parse().unwrap());
    }

    #[test]
    fn test_last_seen_between_one_and_two_weeks() {
        let now = 1_700_000_000;
        let specs: Vec<SeedSpec> = (0..64)
            .map(|i| SeedSpec::ipv4([10, 0, 0, i], 20021))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let seeds = convert_seeds(&specs, now, &mut rng);
        assert_eq!(seeds.len(), specs.len());
        for (seed, spec) in seeds.iter().zip(&specs) {
            assert_eq!(seed.addr, spec.socket_addr());
            assert!(seed.last_seen <= now - ONE_WEEK_SECS);
            assert!(seed.last_seen > now - 2 * ONE_WEEK_SECS);
        }
        // Not all identical
        assert!(seeds.iter().any(|s| s.last_seen != seeds[0].last_seen));
    }

    #[test]
    fn test_last_seen_saturates_near_epoch() {
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = convert_seeds(&[SeedSpec::ipv4([127, 0, 0, 1], 1)], 10, &mut rng);
        assert_eq!(seeds[0].last_seen, 0);
    }
}
