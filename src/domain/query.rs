//! Query string parsing for the URL signer.
//!
//! Parsing is deliberately lenient: the signer has no error path, so
//! malformed input yields a best-effort parameter set instead of a failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a `name=value` pair is split when the value itself contains `=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueSplit {
    /// Value is the text between the first and second `=`; anything after
    /// the second `=` is dropped. Produces the same signatures as the
    /// server's published reference clients.
    #[default]
    Legacy,
    /// Value is everything after the first `=`.
    FirstEquals,
}

impl ValueSplit {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSplit::Legacy => "legacy",
            ValueSplit::FirstEquals => "first-equals",
        }
    }

    fn split_pair(self, pair: &str) -> (&str, &str) {
        let Some((name, rest)) = pair.split_once('=') else {
            return (pair, "");
        };
        match self {
            ValueSplit::Legacy => (name, rest.split('=').next().unwrap_or_default()),
            ValueSplit::FirstEquals => (name, rest),
        }
    }
}

impl FromStr for ValueSplit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(ValueSplit::Legacy),
            "first-equals" | "first_equals" => Ok(ValueSplit::FirstEquals),
            other => Err(format!("unknown value split mode: {other}")),
        }
    }
}

impl fmt::Display for ValueSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters keyed and ordered by raw name, values percent-decoded.
///
/// A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parameters of the query string following the first `?` in `url`.
    /// A URL without `?` has no parameters.
    #[must_use]
    pub fn from_url(url: &str, split: ValueSplit) -> Self {
        match query_of(url) {
            Some(query) => Self::from_query(query, split),
            None => Self::default(),
        }
    }

    /// Parse a bare query string (`a=1&b=2`). Empty segments are skipped and
    /// a segment without `=` becomes a parameter with an empty value.
    #[must_use]
    pub fn from_query(query: &str, split: ValueSplit) -> Self {
        let mut params = BTreeMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, raw_value) = split.split_pair(pair);
            params.insert(name.to_string(), percent_decode(raw_value));
        }
        Self { params }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Name/value pairs in ascending byte order of name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Substring after the first `?`, if any.
#[must_use]
pub fn query_of(url: &str) -> Option<&str> {
    url.split_once('?').map(|(_, query)| query)
}

/// Decode `%XX` escapes. `+` is kept literally. Byte sequences that are not
/// valid UTF-8 after decoding are replaced with U+FFFD.
#[must_use]
pub fn percent_decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query_is_empty() {
        let params = QueryParams::from_url("https://x/y", ValueSplit::Legacy);
        assert!(params.is_empty());
    }

    #[test]
    fn test_sorted_iteration() {
        let params = QueryParams::from_url("https://x/y?time=1&appid=A&tid=9", ValueSplit::Legacy);
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["appid", "tid", "time"]);
    }

    #[test]
    fn test_values_are_decoded() {
        let params = QueryParams::from_query("name=%E5%BC%A0&note=a%20b&plus=a+b", ValueSplit::Legacy);
        assert_eq!(params.get("name"), Some("张"));
        assert_eq!(params.get("note"), Some("a b"));
        assert_eq!(params.get("plus"), Some("a+b"));
    }

    #[test]
    fn test_legacy_split_truncates_at_second_equals() {
        let params = QueryParams::from_query("token=abc=def=ghi", ValueSplit::Legacy);
        assert_eq!(params.get("token"), Some("abc"));
    }

    #[test]
    fn test_first_equals_split_keeps_remainder() {
        let params = QueryParams::from_query("token=abc=def=ghi", ValueSplit::FirstEquals);
        assert_eq!(params.get("token"), Some("abc=def=ghi"));
    }

    #[test]
    fn test_lenient_segments() {
        let params = QueryParams::from_query("a=1&&flag&b=&", ValueSplit::Legacy);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("b"), Some(""));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let params = QueryParams::from_query("a=1&a=2", ValueSplit::Legacy);
        assert_eq!(params.get("a"), Some("2"));
    }

    #[test]
    fn test_invalid_utf8_decodes_lossily() {
        assert_eq!(percent_decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_value_split_parse() {
        assert_eq!("legacy".parse::<ValueSplit>(), Ok(ValueSplit::Legacy));
        assert_eq!("First-Equals".parse::<ValueSplit>(), Ok(ValueSplit::FirstEquals));
        assert!("other".parse::<ValueSplit>().is_err());
    }
}
