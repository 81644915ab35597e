//! # Target Network Model
//!
//! A [`NetworkSpec`] is an immutable IPv4 CIDR block. Its host addresses are
//! produced lazily by [`HostAddresses`], which can be recreated any number
//! of times from the same spec.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// An IPv4 CIDR block, normalised to its network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkSpec {
    network: Ipv4Network,
}

impl NetworkSpec {
    /// Builds the block containing `ip` with the given prefix.
    ///
    /// Host bits in `ip` are ignored, so `192.168.3.7/24` and `192.168.3.0/24`
    /// describe the same block.
    pub fn new(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Self> {
        let with_host_bits = Ipv4Network::new(ip, prefix)?;
        let network = Ipv4Network::new(with_host_bits.network(), prefix)?;
        Ok(Self { network })
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn broadcast_addr(&self) -> Ipv4Addr {
        self.network.broadcast()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Every address in the block, including network and broadcast.
    pub fn block_size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    /// The usable host addresses, in ascending order.
    ///
    /// For prefixes up to /30 the all-zeros and all-ones addresses are
    /// skipped. A /31 (point-to-point) or /32 (single host) yields the whole
    /// block.
    pub fn hosts(&self) -> HostAddresses {
        let start: u64 = u32::from(self.network_addr()).into();
        let end: u64 = u32::from(self.broadcast_addr()).into();

        match self.prefix() {
            31 | 32 => HostAddresses::new(start, end),
            _ => HostAddresses::new(start + 1, end - 1),
        }
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }
}

impl fmt::Display for NetworkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

/// Lazy, finite iterator over a contiguous run of IPv4 addresses.
///
/// Bounds are kept as `u64` so that a `/0` block never overflows.
#[derive(Debug, Clone)]
pub struct HostAddresses {
    next: u64,
    last: u64,
}

impl HostAddresses {
    fn new(next: u64, last: u64) -> Self {
        Self { next, last }
    }

    /// Number of addresses not yet yielded.
    pub fn remaining(&self) -> u64 {
        if self.next > self.last {
            0
        } else {
            self.last - self.next + 1
        }
    }
}

impl Iterator for HostAddresses {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let ip = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        Some(ip)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
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
