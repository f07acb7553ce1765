// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Spoofed client address headers
//!
//! Header-level forgery only: `CLIENT-IP`/`X-FORWARDED-FOR` convince the
//! kind of backend that trusts proxy headers, the transport's source
//! address is unchanged. Use a real proxy when you need actual egress
//! diversity.

use std::net::Ipv4Addr;

use rand::Rng;

use super::{headers, DEFAULT_USER_AGENT};

/// Inclusive IPv4 ranges the spoofed address is drawn from,
/// all allocated to large Chinese ISPs.
const SPOOF_RANGES: [(u32, u32); 10] = [
    (0x2438_0000, 0x243F_FFFF), // 36.56.0.0   - 36.63.255.255
    (0x3DE8_0000, 0x3DED_FFFF), // 61.232.0.0  - 61.237.255.255
    (0x6A50_0000, 0x6A5F_FFFF), // 106.80.0.0  - 106.95.255.255
    (0x794C_0000, 0x794D_FFFF), // 121.76.0.0  - 121.77.255.255
    (0x7BE8_0000, 0x7BEB_FFFF), // 123.232.0.0 - 123.235.255.255
    (0x8BC4_0000, 0x8BD7_FFFF), // 139.196.0.0 - 139.215.255.255
    (0xAB08_0000, 0xAB0F_FFFF), // 171.8.0.0   - 171.15.255.255
    (0xB650_0000, 0xB65C_FFFF), // 182.80.0.0  - 182.92.255.255
    (0xD219_0000, 0xD22F_FFFF), // 210.25.0.0  - 210.47.255.255
    (0xDE10_0000, 0xDE5F_FFFF), // 222.16.0.0  - 222.95.255.255
];

/// Draw a random address: uniform over ranges, then uniform inside the range
pub fn random_spoof_ip() -> Ipv4Addr {
    let mut rng = rand::thread_rng();
    let (lo, hi) = SPOOF_RANGES[rng.gen_range(0..SPOOF_RANGES.len())];
    Ipv4Addr::from(rng.gen_range(lo..=hi))
}

/// The four raw header lines `randomize_client_ip` appends
pub(crate) fn spoofed_header_lines() -> Vec<String> {
    let ip = random_spoof_ip();
    vec![
        format!("{}: {}", headers::CLIENT_IP, ip),
        format!("{}: {}", headers::X_FORWARDED_FOR, ip),
        format!("{}: {}", headers::USER_AGENT, DEFAULT_USER_AGENT),
        "Content-Type: application/json; charset=UTF-8".to_string(),
    ]
}

/// Check whether an address falls inside one of the spoof ranges
pub(crate) fn in_spoof_range(ip: Ipv4Addr) -> bool {
    let n = u32::from(ip);
    SPOOF_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_well_formed() {
        for &(lo, hi) in &SPOOF_RANGES {
            assert!(lo < hi);
        }
    }

    #[test]
    fn test_random_ip_stays_in_range() {
        for _ in 0..200 {
            let ip = random_spoof_ip();
            assert!(in_spoof_range(ip), "{} outside documented ranges", ip);
        }
    }

    #[test]
    fn test_range_boundaries() {
        assert!(in_spoof_range(Ipv4Addr::new(36, 56, 0, 0)));
        assert!(in_spoof_range(Ipv4Addr::new(222, 95, 255, 255)));
        assert!(!in_spoof_range(Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!in_spoof_range(Ipv4Addr::new(127, 0, 0, 1)));
    }

    #[test]
    fn test_spoofed_lines_share_one_address() {
        let lines = spoofed_header_lines();
        assert_eq!(lines.len(), 4);

        let client_ip = lines[0].split_once(':').unwrap().1.trim();
        let forwarded = lines[1].split_once(':').unwrap().1.trim();
        assert_eq!(client_ip, forwarded);

        let parsed: Ipv4Addr = client_ip.parse().expect("CLIENT-IP should be valid IPv4");
        assert!(in_spoof_range(parsed));
    }
}
