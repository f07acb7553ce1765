// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request payload representation and form encoding

/// Payload attached to a POST transfer
///
/// `Form` keeps its pairs in insertion order; how they go on the wire is
/// decided at execution time (`application/x-www-form-urlencoded` by
/// default, `multipart/form-data` when the raw-format flag is set). `Raw`
/// is always passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Ordered key/value pairs
    Form(Vec<(String, String)>),
    /// Pre-formatted body, sent byte-for-byte
    Raw(String),
}

impl Payload {
    /// Check if this is a form payload
    pub fn is_form(&self) -> bool {
        matches!(self, Payload::Form(_))
    }

    /// Encode form pairs as `application/x-www-form-urlencoded`
    pub fn urlencoded(pairs: &[(String, String)]) -> String {
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl From<String> for Payload {
    fn from(raw: String) -> Self {
        Payload::Raw(raw)
    }
}

impl From<&str> for Payload {
    fn from(raw: &str) -> Self {
        Payload::Raw(raw.to_string())
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Payload {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Payload::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Percent-encode one form component, space as '+'
fn form_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
