// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File-backed cookie persistence
//!
//! One JSON file is both the read source and the write destination: loaded
//! before the first hop of a transfer, rewritten once the exchange ends.
//! There is no inter-process locking on the file; last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie applies to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }
        if !url.path().starts_with(&self.path) {
            return false;
        }
        if self.secure && url.scheme() != "https" {
            return false;
        }
        !self.is_expired()
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }
        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a `Set-Cookie` header value; the request URL supplies defaults
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        if name.trim().is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name.trim(), value.trim());
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let val = val.trim();
                match attr.trim().to_lowercase().as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Render as a `Cookie` header pair
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Cookie jar bound to one file on disk
#[derive(Debug)]
pub struct CookieFile {
    path: PathBuf,
    cookies: DashMap<String, Vec<Cookie>>,
}

impl CookieFile {
    /// Open a cookie file, creating it empty if absent
    ///
    /// The path is resolved to an absolute one, so later writes land on the
    /// same file regardless of working-directory changes.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "")?;
        }
        let path = fs::canonicalize(&path)?;

        let raw = fs::read_to_string(&path)?;
        let stored: Vec<Cookie> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw)?
        };

        let jar = Self {
            path,
            cookies: DashMap::new(),
        };
        for cookie in stored {
            jar.add(cookie);
        }
        Ok(jar)
    }

    /// The resolved file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a cookie, replacing any existing one with the same name and path
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
    }

    /// Capture one `Set-Cookie` response header
    pub fn capture(&self, header: &str, url: &Url) {
        if let Some(cookie) = Cookie::parse(header, url) {
            self.add(cookie);
        }
    }

    /// Render the `Cookie` request header for a URL, if anything matches
    pub fn header_for(&self, url: &Url) -> Option<String> {
        let mut matched = Vec::new();
        for entry in self.cookies.iter() {
            for cookie in entry.value() {
                if cookie.matches(url) {
                    matched.push(cookie.to_header_value());
                }
            }
        }
        if matched.is_empty() {
            None
        } else {
            Some(matched.join("; "))
        }
    }

    /// Rewrite the file with the current cookies, dropping expired ones
    pub fn save(&self) -> Result<()> {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
        let all: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }

    /// Total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if the jar holds no cookies
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let url = Url::parse("https://example.com/path").unwrap();
        let cookie =
            Cookie::parse("session=abc123; Domain=example.com; Path=/; Secure; HttpOnly", &url)
                .unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn test_cookie_defaults_domain_from_url() {
        let url = Url::parse("http://sub.example.com/a/b").unwrap();
        let cookie = Cookie::parse("k=v", &url).unwrap();
        assert_eq!(cookie.domain, "sub.example.com");
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_cookie_matching() {
        let secure = Url::parse("https://example.com/app").unwrap();
        let insecure = Url::parse("http://example.com/app").unwrap();

        let cookie = Cookie::parse("k=v; Domain=example.com; Path=/app; Secure", &secure).unwrap();
        assert!(cookie.matches(&secure));
        assert!(!cookie.matches(&insecure));
        assert!(!cookie.matches(&Url::parse("https://example.com/other").unwrap()));
        assert!(!cookie.matches(&Url::parse("https://not-example.org/app").unwrap()));
    }

    #[test]
    fn test_expired_cookie_does_not_match() {
        let url = Url::parse("https://example.com/").unwrap();
        let cookie = Cookie::parse("k=v; Max-Age=-1", &url).unwrap();
        assert!(cookie.is_expired());
        assert!(!cookie.matches(&url));
    }

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");

        let jar = CookieFile::open(&path).unwrap();
        assert!(path.exists());
        assert!(jar.is_empty());
        assert!(jar.path().is_absolute());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");
        let url = Url::parse("https://example.com/").unwrap();

        let jar = CookieFile::open(&path).unwrap();
        jar.capture("session=abc; Domain=example.com", &url);
        jar.capture("theme=dark; Domain=example.com", &url);
        jar.save().unwrap();

        let reloaded = CookieFile::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        let header = reloaded.header_for(&url).unwrap();
        assert!(header.contains("session=abc"));
        assert!(header.contains("theme=dark"));
    }

    #[test]
    fn test_save_prunes_expired_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");
        let url = Url::parse("https://example.com/").unwrap();

        let jar = CookieFile::open(&path).unwrap();
        jar.capture("gone=1; Max-Age=-1", &url);
        jar.capture("kept=1; Max-Age=3600", &url);
        jar.save().unwrap();

        let reloaded = CookieFile::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.header_for(&url).unwrap(), "kept=1");
    }

    #[test]
    fn test_add_replaces_same_name_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let jar = CookieFile::open(dir.path().join("jar.json")).unwrap();
        let url = Url::parse("https://example.com/").unwrap();

        jar.capture("k=old; Domain=example.com", &url);
        jar.capture("k=new; Domain=example.com", &url);

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.header_for(&url).unwrap(), "k=new");
    }
}
