// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One-shot HTTP transfer layer
//!
//! A fluent builder over reqwest for single GET/POST exchanges: chained
//! setters accumulate the configuration, the terminal verb runs it. TLS
//! verification is relaxed for HTTPS targets, which is what you want when
//! pointing this at staging hosts and interception proxies, and exactly
//! what you do not want in production plumbing.

mod builder;
mod cookies;
mod exec;
mod payload;
mod spoof;

pub use builder::HttpTransfer;
pub use cookies::{Cookie, CookieFile};
pub use payload::Payload;
pub use spoof::random_spoof_ip;

use std::time::Duration;

/// Default user agent string (also used by `randomize_client_ip`)
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default cookie file name used by `persist_cookies`
pub const DEFAULT_COOKIE_FILE: &str = "cookies.json";

/// Default overall transfer timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default redirect hop limit
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const LOCATION: &str = "location";
    pub const USER_AGENT: &str = "User-Agent";
    pub const CLIENT_IP: &str = "CLIENT-IP";
    pub const X_FORWARDED_FOR: &str = "X-FORWARDED-FOR";
}
