// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fluent transfer builder

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::payload::Payload;
use super::{spoof, DEFAULT_COOKIE_FILE, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};
use crate::error::Result;

/// A single configurable HTTP transfer
///
/// Chained setters accumulate the configuration; `get`/`post` consume the
/// builder and run the exchange. One builder, one transfer: the only state
/// that survives across transfers is the cookie file, via the filesystem.
///
/// ```rust,no_run
/// use mustekala::HttpTransfer;
///
/// # async fn run() -> mustekala::Result<()> {
/// let body = HttpTransfer::new()
///     .url("https://target.example/login")
///     .data(vec![("user", "admin"), ("pass", "hunter2")])
///     .persist_cookies()
///     .post()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    pub(crate) url: String,
    pub(crate) is_https: bool,
    pub(crate) payload: Option<Payload>,
    pub(crate) keep_data_format: bool,
    pub(crate) headers: Vec<String>,
    pub(crate) ssl_cert: Option<PathBuf>,
    pub(crate) ssl_key: Option<PathBuf>,
    pub(crate) accept_compressed: bool,
    pub(crate) cookie_file: Option<PathBuf>,
    pub(crate) follow_redirects: bool,
    pub(crate) max_redirects: usize,
    pub(crate) timeout: Duration,
}

impl Default for HttpTransfer {
    fn default() -> Self {
        Self {
            url: String::new(),
            is_https: false,
            payload: None,
            keep_data_format: false,
            headers: Vec::new(),
            ssl_cert: None,
            ssl_key: None,
            accept_compressed: false,
            cookie_file: None,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpTransfer {
    /// Create a transfer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target URL
    ///
    /// Also recomputes the HTTPS flag by case-insensitive prefix match, the
    /// flag that gates the relaxed TLS verification on HTTPS targets.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self.is_https = has_http_scheme(&self.url);
        self
    }

    /// Set the request payload (pair lists become forms, strings stay raw)
    pub fn data(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Keep the payload's own format instead of URL-encoding it
    ///
    /// With the flag set, a form payload goes out as `multipart/form-data`
    /// and a raw payload is (as always) untouched.
    pub fn keep_data_format(mut self, keep: bool) -> Self {
        self.keep_data_format = keep;
        self
    }

    /// Append one raw header line (`Name: value`)
    ///
    /// Lines are sent verbatim in insertion order, never deduplicated.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.headers.push(line.into());
        self
    }

    /// Attach a PEM client certificate and key for TLS client auth
    pub fn ssl_cert(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.ssl_cert = Some(cert.into());
        self.ssl_key = Some(key.into());
        self
    }

    /// Negotiate gzip/deflate and transparently decompress the body
    pub fn accept_compressed(mut self) -> Self {
        self.accept_compressed = true;
        self
    }

    /// Persist cookies in the default file (`cookies.json`)
    pub fn persist_cookies(self) -> Self {
        self.persist_cookies_at(DEFAULT_COOKIE_FILE)
    }

    /// Persist cookies in the given file
    ///
    /// The file is the read source and write destination for every transfer
    /// that names it. Created empty here if absent; creation failures are not
    /// fatal at this point, the transfer re-attempts and reports them.
    pub fn persist_cookies_at(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(&path);
        }
        self.cookie_file = Some(path);
        self
    }

    /// Toggle redirect following (on by default)
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Override the redirect hop limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Override the overall transfer timeout, redirect hops included
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append spoofed client address headers
    ///
    /// Adds `CLIENT-IP` and `X-FORWARDED-FOR` with one random address from
    /// ten hard-coded Chinese ISP ranges, a desktop browser `User-Agent`,
    /// and a JSON `Content-Type`. Header-level forgery only.
    pub fn randomize_client_ip(mut self) -> Self {
        self.headers.extend(spoof::spoofed_header_lines());
        self
    }

    /// Execute as GET and return the response body
    pub async fn get(self) -> Result<String> {
        self.fetch(reqwest::Method::GET).await
    }

    /// Execute as POST and return the response body
    pub async fn post(self) -> Result<String> {
        self.fetch(reqwest::Method::POST).await
    }

    /// Whether the target URL carries an `http:`/`https:` scheme
    pub fn is_https(&self) -> bool {
        self.is_https
    }

    /// The raw header lines accumulated so far, in insertion order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The cookie file path, if persistence is enabled
    pub fn cookie_path(&self) -> Option<&Path> {
        self.cookie_file.as_deref()
    }
}

/// Case-insensitive `http:`/`https:` prefix match
fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_defaults() {
        let transfer = HttpTransfer::new();
        assert!(!transfer.is_https());
        assert!(transfer.follow_redirects);
        assert_eq!(transfer.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(transfer.timeout, Duration::from_secs(20));
        assert!(transfer.cookie_path().is_none());
        assert!(transfer.headers().is_empty());
    }

    #[test]
    fn test_https_flag_follows_url_prefix() {
        assert!(HttpTransfer::new().url("http://example.com").is_https());
        assert!(HttpTransfer::new().url("https://example.com").is_https());
        assert!(HttpTransfer::new().url("HTTPS://EXAMPLE.COM").is_https());
        assert!(!HttpTransfer::new().url("ftp://example.com").is_https());
        assert!(!HttpTransfer::new().url("/relative/path").is_https());
        assert!(!HttpTransfer::new().url("").is_https());
    }

    #[test]
    fn test_https_flag_is_recomputed() {
        let transfer = HttpTransfer::new()
            .url("https://example.com")
            .url("ftp://example.com");
        assert!(!transfer.is_https());
    }

    #[test]
    fn test_headers_keep_order_and_duplicates() {
        let transfer = HttpTransfer::new()
            .header("X-Tag: one")
            .header("Accept: text/html")
            .header("X-Tag: two");

        assert_eq!(
            transfer.headers(),
            &["X-Tag: one", "Accept: text/html", "X-Tag: two"]
        );
    }

    #[test]
    fn test_persist_cookies_uses_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let transfer = HttpTransfer::new().persist_cookies();
        assert_eq!(
            transfer.cookie_path(),
            Some(Path::new(DEFAULT_COOKIE_FILE))
        );
        assert!(dir.path().join(DEFAULT_COOKIE_FILE).exists());

        std::env::set_current_dir(old).unwrap();
    }

    #[test]
    fn test_persist_cookies_at_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");

        let transfer = HttpTransfer::new().persist_cookies_at(&path);
        assert_eq!(transfer.cookie_path(), Some(path.as_path()));
        assert!(path.exists());
    }

    #[test]
    fn test_randomize_client_ip_appends_spoof_headers() {
        let transfer = HttpTransfer::new().randomize_client_ip();
        let lines = transfer.headers();
        assert_eq!(lines.len(), 4);

        let client_ip = lines[0]
            .strip_prefix("CLIENT-IP:")
            .expect("first spoofed line should be CLIENT-IP")
            .trim();
        let forwarded = lines[1]
            .strip_prefix("X-FORWARDED-FOR:")
            .expect("second spoofed line should be X-FORWARDED-FOR")
            .trim();
        assert_eq!(client_ip, forwarded);

        let ip: Ipv4Addr = client_ip.parse().expect("spoofed value should parse");
        assert!(spoof::in_spoof_range(ip));

        assert!(lines[2].starts_with("User-Agent: Mozilla/5.0"));
        assert_eq!(lines[3], "Content-Type: application/json; charset=UTF-8");
    }

    #[test]
    fn test_spoof_headers_append_after_existing_ones() {
        let transfer = HttpTransfer::new()
            .header("Accept: */*")
            .randomize_client_ip();
        assert_eq!(transfer.headers()[0], "Accept: */*");
        assert!(transfer.headers()[1].starts_with("CLIENT-IP:"));
    }
}
