// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transfer execution
//!
//! One shared routine behind both verbs: build the transport client from the
//! accumulated configuration, run the exchange hop by hop with a bounded
//! redirect loop, classify the final response. Redirect handling is done
//! here rather than in the transport so cookies from intermediate hops are
//! captured and the hop limit stays observable.

use std::fs;
use std::time::Instant;

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, Identity, Method, StatusCode};
use url::Url;

use super::builder::HttpTransfer;
use super::cookies::CookieFile;
use super::headers;
use super::payload::Payload;
use crate::error::{Error, Result};

impl HttpTransfer {
    /// Run the configured transfer and return the response body
    pub(crate) async fn fetch(self, method: Method) -> Result<String> {
        let url = Url::parse(&self.url)?;
        let header_pairs = parse_header_lines(&self.headers)?;
        let client = self.build_client()?;

        let jar = match &self.cookie_file {
            Some(path) => Some(CookieFile::open(path)?),
            None => None,
        };

        let outcome = self
            .exchange(&client, url, method, &header_pairs, jar.as_ref())
            .await;

        // The jar is rewritten whatever the outcome was: cookies captured
        // on completed hops survive a failed chain.
        if let Some(jar) = &jar {
            jar.save()?;
        }

        let (status, final_url, body) = outcome?;
        if status.is_success() {
            Ok(String::from_utf8_lossy(&body).into_owned())
        } else {
            Err(Error::status(status.as_u16(), final_url.as_str()))
        }
    }

    /// Hop loop: at most `1 + max_redirects` round trips under one deadline
    async fn exchange(
        &self,
        client: &Client,
        mut url: Url,
        mut method: Method,
        header_pairs: &[(HeaderName, HeaderValue)],
        jar: Option<&CookieFile>,
    ) -> Result<(StatusCode, Url, Bytes)> {
        let deadline = Instant::now() + self.timeout;
        let mut send_body = method == Method::POST;
        let mut hops = 0usize;

        loop {
            tracing::debug!(%method, %url, hops, "running transfer hop");

            let mut request = client
                .request(method.clone(), url.clone())
                .timeout(deadline.saturating_duration_since(Instant::now()));

            let mut caller_set_content_type = false;
            for (name, value) in header_pairs {
                caller_set_content_type |= *name == CONTENT_TYPE;
                request = request.header(name, value);
            }

            if let Some(jar) = jar {
                if let Some(cookie_header) = jar.header_for(&url) {
                    request = request.header(headers::COOKIE, cookie_header);
                }
            }

            if send_body {
                request = self.attach_body(request, caller_set_content_type);
            }

            let response = request
                .send()
                .await
                .map_err(|err| Error::transfer(url.as_str(), err))?;

            let status = response.status();
            if let Some(jar) = jar {
                for value in response.headers().get_all(headers::SET_COOKIE) {
                    if let Ok(raw) = value.to_str() {
                        jar.capture(raw, &url);
                    }
                }
            }

            if status.is_redirection() && self.follow_redirects {
                if let Some(location) = response
                    .headers()
                    .get(headers::LOCATION)
                    .and_then(|v| v.to_str().ok())
                {
                    if hops >= self.max_redirects {
                        return Err(Error::TooManyRedirects {
                            url: url.to_string(),
                            limit: self.max_redirects,
                        });
                    }
                    let next = url.join(location)?;
                    // 307/308 keep method and body, everything else
                    // refetches with GET the way browsers do.
                    if !preserves_method(status) {
                        method = Method::GET;
                        send_body = false;
                    }
                    tracing::debug!(%status, from = %url, to = %next, "following redirect");
                    url = next;
                    hops += 1;
                    continue;
                }
                tracing::warn!(%status, %url, "redirect response without Location header");
            }

            tracing::debug!(%status, %url, "transfer complete");
            let body = response
                .bytes()
                .await
                .map_err(|err| Error::transfer(url.as_str(), err))?;
            return Ok((status, url, body));
        }
    }

    /// Attach the POST body per payload kind and the raw-format flag
    fn attach_body(
        &self,
        request: reqwest::RequestBuilder,
        caller_set_content_type: bool,
    ) -> reqwest::RequestBuilder {
        match &self.payload {
            None => request,
            Some(Payload::Raw(text)) => request.body(text.clone()),
            Some(Payload::Form(pairs)) => {
                if self.keep_data_format {
                    let mut form = reqwest::multipart::Form::new();
                    for (name, value) in pairs {
                        form = form.text(name.clone(), value.clone());
                    }
                    request.multipart(form)
                } else {
                    let request = if caller_set_content_type {
                        request
                    } else {
                        request.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    };
                    request.body(Payload::urlencoded(pairs))
                }
            }
        }
    }

    /// Translate the configuration into a transport client
    fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .redirect(Policy::none())
            .gzip(self.accept_compressed)
            .deflate(self.accept_compressed);

        // Peer and hostname verification are both skipped for HTTPS
        // targets. Self-signed staging certs and interception proxies are
        // the normal case for this client.
        if self.is_https {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let (Some(cert), Some(key)) = (&self.ssl_cert, &self.ssl_key) {
            let mut pem = fs::read(cert)?;
            pem.extend(fs::read(key)?);
            let identity = Identity::from_pem(&pem)
                .map_err(|err| Error::ClientCertificate(err.to_string()))?;
            builder = builder.identity(identity);
        }

        builder.build().map_err(Error::Client)
    }
}

/// Parse raw `Name: value` lines into typed header pairs
fn parse_header_lines(lines: &[String]) -> Result<Vec<(HeaderName, HeaderValue)>> {
    let mut parsed = Vec::with_capacity(lines.len());
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::header(line, "missing ':' separator"))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|err| Error::header(line, err.to_string()))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|err| Error::header(line, err.to_string()))?;
        parsed.push((name, value));
    }
    Ok(parsed)
}

/// 307 and 308 are the only redirects that keep method and body
fn preserves_method(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
    )
}
