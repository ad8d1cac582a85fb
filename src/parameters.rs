use crate::decode;
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::OnceLock;

/// A single Parameter Store value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    value: Option<String>,
}

impl Parameter {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    /// The parameter value, or an empty string when SSM returned none.
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::new(Some(value.to_string()))
    }
}

/// All parameters fetched under one base path, keyed by full name.
///
/// Lookups never fail: a missing name reads as an empty string. The JSON
/// form is computed once on first use and reused by [`Parameters::to_json`]
/// and the [`Read`] implementation.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    base_path: String,
    entries: HashMap<String, Parameter>,
    encoded: OnceLock<Vec<u8>>,
    cursor: usize,
}

impl Parameters {
    pub fn new(base_path: impl Into<String>, entries: HashMap<String, Parameter>) -> Self {
        Self {
            base_path: base_path.into(),
            entries,
            encoded: OnceLock::new(),
            cursor: 0,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of `base_path + name`.
    pub fn get_value_by_name(&self, name: &str) -> &str {
        self.get_value_by_full_path(&format!("{}{}", self.base_path, name))
    }

    pub fn get_value_by_full_path(&self, full_path: &str) -> &str {
        self.entries
            .get(full_path)
            .map(Parameter::value)
            .unwrap_or("")
    }

    /// Flatten to `short name -> value`, removing the first occurrence of the
    /// base path from each key.
    pub fn to_key_value_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(name, p)| (name.replacen(&self.base_path, "", 1), p.value().to_string()))
            .collect()
    }

    /// Decode the flattened map into `T`, matching fields by their serde name.
    ///
    /// Values are parsed from strings as the field type requires. Fields
    /// without a matching key decode from an empty string, so they come out
    /// as zero, `false`, `None` or empty.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(decode::from_key_value_map(self.to_key_value_map())?)
    }

    /// The flattened map as a JSON object.
    pub fn to_json(&self) -> Result<&[u8]> {
        if let Some(bytes) = self.encoded.get() {
            return Ok(bytes);
        }
        let bytes = serde_json::to_vec(&self.to_key_value_map())?;
        Ok(self.encoded.get_or_init(|| bytes))
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.base_path == other.base_path && self.entries == other.entries
    }
}

/// Streams the JSON form. Once drained, the next read returns `Ok(0)` and
/// rewinds, so the same bytes can be read again.
impl Read for Parameters {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let cursor = self.cursor;
        let encoded = self.to_json().map_err(io::Error::other)?;

        if cursor >= encoded.len() {
            self.cursor = 0;
            return Ok(0);
        }

        let n = buf.len().min(encoded.len() - cursor);
        buf[..n].copy_from_slice(&encoded[cursor..cursor + n]);
        self.cursor += n;
        Ok(n)
    }
}

/// Forward a fetch error, or serialize the fetched parameters to JSON.
///
/// ```no_run
/// # async fn run(store: paramstore::ParameterStore) -> paramstore::Result<()> {
/// let json = paramstore::json_from_result(
///     store.get_all_parameters_by_path("/my-service/dev/", true).await,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn json_from_result(parameters: Result<Parameters>) -> Result<Vec<u8>> {
    Ok(parameters?.to_json()?.to_vec())
}
