//! Cookie attribute rendering and `document.cookie` parsing.
//!
//! Pure string work so it runs (and is tested) off the browser too.

use crate::config::ConnectorConfig;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "strict",
            SameSite::Lax => "lax",
            SameSite::None => "none",
        }
    }
}

/// Attributes attached to every connection cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Leading dot included, e.g. `.rss3.bio`.
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub expires_days: u32,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            domain: None,
            path: "/".into(),
            secure: true,
            same_site: SameSite::None,
            expires_days: 0,
        }
    }
}

impl CookieAttributes {
    /// Cross-subdomain, secure, `SameSite=None`, expiring after the configured days.
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self {
            domain: Some(format!(".{}", config.root_domain.trim_start_matches('.'))),
            expires_days: config.cookie_expires_days,
            ..Default::default()
        }
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Attribute suffix for a cookie written at `now`. Zero days, or an expiry
    /// past the representable range, means a session cookie.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut out = format!("; path={}", self.path);
        if let Some(domain) = &self.domain {
            out.push_str("; domain=");
            out.push_str(domain);
        }
        if self.expires_days > 0 {
            let expires = Duration::try_days(i64::from(self.expires_days)).and_then(|d| now.checked_add_signed(d));
            match expires {
                Some(expires) => {
                    out.push_str("; expires=");
                    out.push_str(&http_date(expires));
                }
                None => tracing::warn!(days = self.expires_days, "cookie expiry out of range, writing a session cookie"),
            }
        }
        if self.secure {
            out.push_str("; secure");
        }
        out.push_str("; samesite=");
        out.push_str(self.same_site.as_str());
        out
    }

    /// Full `document.cookie` assignment storing `value` under `key`.
    pub fn set_cookie(&self, key: &str, value: &str, now: DateTime<Utc>) -> String {
        format!("{}={}{}", percent_encode(key), percent_encode(value), self.render(now))
    }

    /// Assignment that deletes `key`: same scope, expiry in the past.
    pub fn remove_cookie(&self, key: &str, now: DateTime<Utc>) -> String {
        let mut scope = self.clone();
        scope.expires_days = 0;
        let expired = http_date(now - Duration::days(1));
        format!("{}={}; expires={}", percent_encode(key), scope.render(now), expired)
    }
}

/// Look up `key` in a `document.cookie` string (`a=1; b=2`).
pub fn find_cookie(header: &str, key: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| percent_decode(name) == key)
        .map(|(_, value)| percent_decode(value))
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for &b in value.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|digits| u8::from_str_radix(digits, 16).ok());
            if let Some(b) = decoded {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
