//! Flat key/value representation of gateway requests and responses.

use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter},
};

/// Keys whose values are never printed.
static REDACTED_KEYS: &[&str] = &["USER.PWD"];

/// Ordered map of `GROUP.PARAMETER` keys to their values.
///
/// This is the shape of both requests sent to the payment gateway and the responses it returns:
///
/// ```rust
/// # use heidelpay_rust::params::Params;
/// let mut params = Params::new();
/// params.insert("PRESENTATION", "AMOUNT", "23.12");
///
/// assert_eq!(params.get("PRESENTATION", "AMOUNT"), Some("23.12"));
/// assert_eq!(params.get_key("PRESENTATION.AMOUNT"), Some("23.12"));
/// ```
#[derive(Serialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body).into_owned())
    }

    /// Builds a new set of parameters from already decoded key/value pairs.
    ///
    /// Keys are normalised: they are upper-cased, and keys without a `.` get their first `_`
    /// replaced with a `.`. This allows parsing posts which went through frameworks
    /// that do not allow dots in form field names (`PROCESSING_RESULT` becomes `PROCESSING.RESULT`).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (normalize_key(k.as_ref()), v.into()))
                .collect(),
        )
    }

    /// Sets `GROUP.NAME` to the given value, replacing any previous one.
    pub fn insert(&mut self, group: &str, name: &str, value: impl Into<String>) {
        self.0.insert(format!("{}.{}", group, name), value.into());
    }

    /// Sets `GROUP.NAME` only if a value is present.
    pub fn insert_opt(&mut self, group: &str, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.insert(group, name, value);
        }
    }

    /// Sets a raw key.
    pub fn insert_key(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, group: &str, name: &str) -> Option<&str> {
        self.get_key(&format!("{}.{}", group, name))
    }

    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Params {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| {
                if REDACTED_KEYS.contains(&k.as_str()) {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            }))
            .finish()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim().to_uppercase();
    if key.contains('.') {
        key
    } else {
        key.replacen('_', ".", 1)
    }
}
