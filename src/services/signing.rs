//! URL signing service.
//!
//! The signature is the lowercase hex SHA-1 of
//! `secret + name1 + value1 + ... + nameN + valueN + secret`, where the
//! parameters are taken from the URL's query string, percent-decoded and
//! sorted by name. The URL itself is returned untouched apart from the
//! appended `&signature=<hex>`.

use crate::domain::constants::PARAM_SIGNATURE;
use crate::domain::query::{QueryParams, ValueSplit};
use crate::domain::types::AppSecret;
use sha1::{Digest, Sha1};
use std::fmt;

/// A URL carrying a trailing `signature` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    url: String,
    signature: String,
}

impl SignedUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Hex digest that was appended
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Signs request URLs with a shared application secret.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    secret: AppSecret,
    split: ValueSplit,
}

impl UrlSigner {
    #[must_use]
    pub fn new(secret: AppSecret) -> Self {
        Self {
            secret,
            split: ValueSplit::default(),
        }
    }

    #[must_use]
    pub fn with_value_split(mut self, split: ValueSplit) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn value_split(&self) -> ValueSplit {
        self.split
    }

    /// The secret-bracketed concatenation that gets hashed.
    ///
    /// Contains the secret in clear text; never log it.
    #[must_use]
    pub fn signing_string(&self, params: &QueryParams) -> String {
        let secret = self.secret.expose();
        let mut out = String::with_capacity(secret.len() * 2 + 64);
        out.push_str(secret);
        for (name, value) in params.iter() {
            out.push_str(name);
            out.push_str(value);
        }
        out.push_str(secret);
        out
    }

    /// Lowercase hex signature of `url`'s query parameters.
    #[must_use]
    pub fn signature(&self, url: &str) -> String {
        let params = QueryParams::from_url(url, self.split);
        log::debug!("signing {} query parameter(s)", params.len());
        hex::encode(Sha1::digest(self.signing_string(&params).as_bytes()))
    }

    /// Append `&signature=<hex>` to `url`.
    ///
    /// The separator is always `&`, even when `url` has no query string.
    #[must_use]
    pub fn sign(&self, url: &str) -> SignedUrl {
        let signature = self.signature(url);
        SignedUrl {
            url: format!("{url}&{PARAM_SIGNATURE}={signature}"),
            signature,
        }
    }
}

/// Sign `url` with `secret` using the default value split.
#[must_use]
pub fn sign_url(url: &str, secret: &AppSecret) -> SignedUrl {
    UrlSigner::new(secret.clone()).sign(url)
}
