use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strata_core::Function;

use super::LevelSet;
use crate::DomainError;

/// Current version of [`LevelSetRecord`].
pub const RECORD_VERSION: u32 = 1;

/// The persisted form of a [`LevelSet`].
///
/// Functions are stored by name and resolved through a [`FunctionRegistry`]
/// when loading, so a record never embeds the function itself.
///
/// Finite numbers are written as JSON numbers. Infinities and NaN, which JSON
/// cannot represent, are written as the strings `"inf"`, `"-inf"` and `"nan"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSetRecord {
    pub version: u32,
    pub function: String,
    #[serde(serialize_with = "serialize_float", deserialize_with = "deserialize_float")]
    pub level: f64,
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    pub lower_bound: Vec<f64>,
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    pub upper_bound: Vec<f64>,
}

/// Resolves persisted function names to function handles.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under its name, returning any function it replaces.
    pub fn register(&mut self, function: Function) -> Option<Function> {
        self.functions.insert(function.name().to_owned(), function)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl LevelSet {
    /// Captures the function name, level, and bounds.
    #[must_use]
    pub fn save(&self) -> LevelSetRecord {
        LevelSetRecord {
            version: RECORD_VERSION,
            function: self.function.name().to_owned(),
            level: self.level,
            lower_bound: self.bounds.lower().to_vec(),
            upper_bound: self.bounds.upper().to_vec(),
        }
    }

    /// Rebuilds a level set from a record, resolving its function by name.
    ///
    /// Loading a record produced by [`save`](Self::save) with a registry that
    /// holds the original function yields a level set equal to the original.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedVersion`] for unknown record versions,
    /// [`DomainError::UnknownFunction`] if the name is not registered, or a
    /// dimension error if the bounds do not fit the function.
    pub fn load(record: &LevelSetRecord, registry: &FunctionRegistry) -> Result<Self, DomainError> {
        if record.version != RECORD_VERSION {
            return Err(DomainError::UnsupportedVersion {
                version: record.version,
            });
        }

        let function = registry
            .get(&record.function)
            .ok_or_else(|| DomainError::UnknownFunction {
                name: record.function.clone(),
            })?;

        let mut level_set = LevelSet::new(function.clone(), record.level)?;
        level_set.set_lower_bound(record.lower_bound.clone())?;
        level_set.set_upper_bound(record.upper_bound.clone())?;
        Ok(level_set)
    }

    /// Encodes the saved record as JSON.
    ///
    /// Decoding the result with [`from_json`](Self::from_json) restores every
    /// level and bound bit for bit, infinities included. A NaN comes back as
    /// the canonical NaN.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Encoding`] if the record cannot be encoded.
    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(&self.save())?)
    }

    /// Decodes a JSON record and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Encoding`] for malformed JSON, including
    /// non-numeric strings other than `"inf"`, `"-inf"` and `"nan"`, or any
    /// error from [`load`](Self::load).
    pub fn from_json(json: &str, registry: &FunctionRegistry) -> Result<Self, DomainError> {
        let record: LevelSetRecord = serde_json::from_str(json)?;
        Self::load(&record, registry)
    }
}

/// A JSON float, with the non-finite values spelled out as strings.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum JsonFloat {
    Finite(f64),
    Special(String),
}

impl From<f64> for JsonFloat {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Finite(value)
        } else if value.is_nan() {
            Self::Special("nan".to_owned())
        } else if value > 0.0 {
            Self::Special("inf".to_owned())
        } else {
            Self::Special("-inf".to_owned())
        }
    }
}

impl JsonFloat {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Finite(value) => Ok(value),
            Self::Special(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                _ => Err(E::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"nan\", got {text:?}"
                ))),
            },
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_float<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    JsonFloat::from(*value).serialize(serializer)
}

fn deserialize_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    JsonFloat::deserialize(deserializer)?.into_f64()
}

fn serialize_floats<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(|&value| JsonFloat::from(value)))
}

fn deserialize_floats<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<JsonFloat>::deserialize(deserializer)?
        .into_iter()
        .map(JsonFloat::into_f64)
        .collect()
}
