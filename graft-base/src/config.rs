use std::collections::BTreeMap;
use std::path::Path;

use graft::StdError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Host configuration document: a set of named JSON sections.
///
/// Sections are addressed by string key and deserialized on access, so each
/// subsystem declares its own section type without the document knowing
/// about it.
#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub(crate) sections: BTreeMap<String, serde_json::Value>,
}

/// A typed view over one named section of a [`Config`].
///
/// Implemented by hand or with the `#[config_section("key")]` attribute
/// macro.
pub trait ConfigSection: DeserializeOwned {
    fn key() -> &'static str;
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes the section stored under `name`.
    ///
    /// A missing section deserializes from JSON null, so `Option` section
    /// types read as `None` rather than failing.
    pub fn get<T>(&self, name: impl AsRef<str>) -> Result<T, StdError>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(
            self.sections
                .get(name.as_ref())
                .cloned()
                .unwrap_or(serde_json::Value::Null),
        )?)
    }

    /// Deserializes the section addressed by `T`'s declared key.
    pub fn section<T>(&self) -> Result<T, StdError>
    where
        T: ConfigSection,
    {
        self.get(T::key())
    }

    /// Serializes `value` into the section stored under `name`.
    pub fn set<T>(&mut self, name: impl Into<String>, value: T) -> Result<(), StdError>
    where
        T: Serialize,
    {
        self.sections
            .insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Builder-style [`set`](Config::set); panics if `value` cannot be
    /// serialized.
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Serialize,
    {
        self.sections
            .insert(name.into(), serde_json::to_value(value).unwrap());
        self
    }

    /// Deep-merges `other` into this document.
    ///
    /// Objects merge recursively, arrays concatenate, and any other value in
    /// `other` replaces the existing one.
    pub fn merge_from(&mut self, other: Self) -> Result<(), StdError> {
        for (key, value) in other.sections {
            let entry = self.sections.entry(key);
            merge_json_from(entry.or_insert(serde_json::Value::Null), value)?;
        }
        Ok(())
    }

    pub fn parse<T>(text: T) -> Result<Self, StdError>
    where
        T: AsRef<str>,
    {
        Ok(serde_json::from_str(text.as_ref())?)
    }

    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, StdError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(text)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of top-level sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }
}

fn merge_json_from(lhs: &mut serde_json::Value, rhs: serde_json::Value) -> Result<(), StdError> {
    match lhs {
        serde_json::Value::Object(l) => match rhs {
            serde_json::Value::Object(r) => {
                for (key, value) in r {
                    let entry = l.entry(key);
                    merge_json_from(entry.or_insert(serde_json::Value::Null), value)?;
                }
            }
            _ => *lhs = rhs,
        },
        serde_json::Value::Array(l) => match rhs {
            serde_json::Value::Array(r) => {
                l.extend(r);
            }
            _ => *lhs = rhs,
        },
        _ => *lhs = rhs,
    }
    Ok(())
}
