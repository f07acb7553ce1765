// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Mustekala - Fluent HTTP Transfer Client
//!
//! A one-shot HTTP transfer builder for security testing and scraping.
//! Chain setters, call `get()` or `post()`, receive the body. The transport
//! heavy lifting (TLS, compression, connection handling) is reqwest's; this
//! crate is the configuration surface and the outcome policy.
//!
//! ## Features
//!
//! - Fluent builder: URL, payload, raw headers, timeout, redirect policy
//! - Permissive TLS: certificate and hostname checks skipped on HTTPS targets
//! - Client certificates: PEM cert/key pairs for mTLS endpoints
//! - Cookie persistence: one JSON file, read and rewritten per transfer
//! - Bounded redirects: 301/302/303/307/308 with a hop limit, cookies
//!   captured on every hop
//! - Spoofed client headers: random `CLIENT-IP`/`X-FORWARDED-FOR` from known
//!   ISP ranges
//! - Form or raw payloads: URL-encoded by default, multipart or verbatim on
//!   request
//!
//! Not a hardened production client. The TLS permissiveness is the point:
//! staging hosts, self-signed certs, interception proxies.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mustekala::HttpTransfer;
//!
//! #[tokio::main]
//! async fn main() -> mustekala::Result<()> {
//!     let body = HttpTransfer::new()
//!         .url("https://target.example/search")
//!         .header("X-Scan-Id: run-42")
//!         .accept_compressed()
//!         .persist_cookies()
//!         .get()
//!         .await?;
//!
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```
//!
//! A transfer is consumed by its verb. Reusing state across requests happens
//! through the cookie file, not through the builder.

pub mod error;
pub mod transfer;

// Errors
pub use error::{Error, Result};

// Transfer builder and supporting types
pub use transfer::{Cookie, CookieFile, HttpTransfer, Payload};

// Constants and helpers
pub use transfer::{
    random_spoof_ip, DEFAULT_COOKIE_FILE, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};

/// Mustekala version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
