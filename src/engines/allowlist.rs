// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::net::IpAddr;

/// Hostnames the fetch guard may contact
///
/// Government auction portals, insurance-salvage marketplaces and municipal
/// surplus sites, enumerated at deployment. Callers cannot extend the list
/// at runtime.
const ALLOWED_HOSTS: &[&str] = &[
    "gsaauctions.gov",
    "www.gsaauctions.gov",
    "govdeals.com",
    "www.govdeals.com",
    "publicsurplus.com",
    "www.publicsurplus.com",
    "municibid.com",
    "www.municibid.com",
    "allsurplus.com",
    "www.allsurplus.com",
    "iaai.com",
    "www.iaai.com",
    "copart.com",
    "www.copart.com",
];

/// Host allow-list validator
///
/// A hostname passes only if it is in the permitted set AND does not match a
/// private/loopback address pattern; the two checks are independent, so an
/// allow-listed private address is still rejected. Pure, no DNS, no I/O.
#[derive(Debug, Clone)]
pub struct HostAllowList {
    hosts: HashSet<String>,
    permit_private: bool,
}

impl Default for HostAllowList {
    fn default() -> Self {
        Self::new(ALLOWED_HOSTS.iter().copied())
    }
}

impl HostAllowList {
    pub fn new(hosts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.into().to_ascii_lowercase())
                .collect(),
            permit_private: false,
        }
    }

    /// Disable the private-address rejection.
    ///
    /// Exists solely so test harnesses can point the fetch guard at a
    /// loopback mock server. Production wiring never calls this.
    pub fn permit_private_hosts(mut self) -> Self {
        self.permit_private = true;
        self
    }

    /// Whether `hostname` may be contacted
    pub fn is_allowed(&self, hostname: &str) -> bool {
        let host = normalize(hostname);
        if host.is_empty() {
            return false;
        }
        if !self.permit_private && is_private_host(&host) {
            return false;
        }
        self.hosts.contains(&host)
    }
}

fn normalize(hostname: &str) -> String {
    hostname
        .trim()
        .trim_end_matches('.')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_ascii_lowercase()
}

/// Private/loopback address patterns, matched on the hostname text itself
/// (no resolution): literal IPs in reserved ranges, plus `localhost`.
fn is_private_host(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }
    match host.parse::<IpAddr>() {
        Ok(ip) => is_private_ip(ip),
        Err(_) => false,
    }
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            // 10.0.0.0/8
            if octets[0] == 10 {
                return true;
            }
            // 172.16.0.0/12
            if octets[0] == 172 && (16..=31).contains(&octets[1]) {
                return true;
            }
            // 192.168.0.0/16
            if octets[0] == 192 && octets[1] == 168 {
                return true;
            }
            // 127.0.0.0/8
            if ipv4.is_loopback() {
                return true;
            }
            // 169.254.0.0/16
            if ipv4.is_link_local() {
                return true;
            }
            // 224.0.0.0/4
            if (224..=239).contains(&octets[0]) {
                return true;
            }
            ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            let first = ipv6.segments()[0];
            // fc00::/7 unique local
            if (first & 0xfe00) == 0xfc00 {
                return true;
            }
            // fe80::/10 link-local
            if (first & 0xffc0) == 0xfe80 {
                return true;
            }
            // ff00::/8 multicast
            (first & 0xff00) == 0xff00
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_hosts_allowed() {
        let list = HostAllowList::default();
        assert!(list.is_allowed("gsaauctions.gov"));
        assert!(list.is_allowed("www.govdeals.com"));
        assert!(list.is_allowed("PublicSurplus.com"));
        assert!(list.is_allowed("municibid.com."));
    }

    #[test]
    fn test_unknown_hosts_rejected() {
        let list = HostAllowList::default();
        assert!(!list.is_allowed("example.com"));
        assert!(!list.is_allowed("evil.gsaauctions.gov.attacker.net"));
        assert!(!list.is_allowed(""));
    }

    #[test]
    fn test_private_patterns_rejected_even_when_listed() {
        let list = HostAllowList::new(["127.0.0.1", "10.1.2.3", "localhost", "[::1]"]);
        assert!(!list.is_allowed("127.0.0.1"));
        assert!(!list.is_allowed("10.1.2.3"));
        assert!(!list.is_allowed("localhost"));
        assert!(!list.is_allowed("[::1]"));
        assert!(!list.is_allowed("::1"));
    }

    #[test]
    fn test_reserved_ranges() {
        assert!(is_private_ip("10.0.0.1".parse().unwrap()));
        assert!(is_private_ip("172.16.0.1".parse().unwrap()));
        assert!(is_private_ip("172.31.255.255".parse().unwrap()));
        assert!(!is_private_ip("172.32.0.1".parse().unwrap()));
        assert!(is_private_ip("192.168.1.1".parse().unwrap()));
        assert!(is_private_ip("127.0.0.1".parse().unwrap()));
        assert!(is_private_ip("169.254.169.254".parse().unwrap()));
        assert!(is_private_ip("::1".parse().unwrap()));
        assert!(is_private_ip("fe80::1".parse().unwrap()));
        assert!(!is_private_ip("8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn test_permit_private_hosts_still_requires_membership() {
        let list = HostAllowList::new(["127.0.0.1"]).permit_private_hosts();
        assert!(list.is_allowed("127.0.0.1"));
        assert!(!list.is_allowed("127.0.0.2"));
    }
}
