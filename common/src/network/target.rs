//! # Scan Target Parsing
//!
//! Turns user input into a [`NetworkSpec`]. Accepted forms:
//! * **CIDR**: "Network/Prefix" (e.g., `192.168.3.0/24`). Host bits are allowed.
//! * **Host**: a bare IPv4 address, treated as a `/32`.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::ScanError;
use crate::network::range::NetworkSpec;

impl FromStr for NetworkSpec {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScanError::invalid_network(s, "empty input"));
        }

        match trimmed.split_once('/') {
            Some((ip_str, prefix_str)) => parse_cidr(s, ip_str, prefix_str),
            None => parse_host(s, trimmed),
        }
    }
}

fn parse_cidr(original: &str, ip_str: &str, prefix_str: &str) -> Result<NetworkSpec, ScanError> {
    let ipv4_addr = parse_ipv4(original, ip_str)?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| ScanError::invalid_network(original, format!("bad prefix '{prefix_str}': {e}")))?;

    if prefix > 32 {
        return Err(ScanError::invalid_network(
            original,
            format!("prefix /{prefix} is longer than 32 bits"),
        ));
    }

    NetworkSpec::new(ipv4_addr, prefix).map_err(|e| ScanError::invalid_network(original, e.to_string()))
}

fn parse_host(original: &str, ip_str: &str) -> Result<NetworkSpec, ScanError> {
    let ipv4_addr = parse_ipv4(original, ip_str)?;
    NetworkSpec::new(ipv4_addr, 32).map_err(|e| ScanError::invalid_network(original, e.to_string()))
}

fn parse_ipv4(original: &str, ip_str: &str) -> Result<Ipv4Addr, ScanError> {
    ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| ScanError::invalid_network(original, format!("bad IPv4 address '{ip_str}': {e}")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
