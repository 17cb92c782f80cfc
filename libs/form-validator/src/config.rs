//! Validator configuration
//!
//! The datatype → rendering table is policy, not code: institutions extend
//! the supported datatypes by editing configuration. Keys are camelCase so the
//! same document a form builder already ships (`dataTypeToRenderingMap`) loads
//! unchanged.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    #[serde(default)]
    pub data_type_to_rendering_map: DataTypeRenderingMap,

    /// What concept and answer lookups do when the terminology service fails.
    #[serde(default)]
    pub lookup_failures: LookupFailurePolicy,

    /// Upper bound on lookups in flight. `None` launches every check at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_lookups: Option<usize>,
}

impl ValidatorConfig {
    pub fn new(data_type_to_rendering_map: DataTypeRenderingMap) -> Self {
        Self {
            data_type_to_rendering_map,
            ..Self::default()
        }
    }

    pub fn with_lookup_failures(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failures = policy;
        self
    }

    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = Some(limit);
        self
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_lookups == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "maxConcurrentLookups must be at least 1".to_string(),
            ));
        }

        if let Some(datatype) = self
            .data_type_to_rendering_map
            .datatypes()
            .find(|d| d.trim().is_empty())
        {
            return Err(ConfigError::InvalidConfig(format!(
                "dataTypeToRenderingMap contains an empty datatype name {:?}",
                datatype
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupFailurePolicy {
    /// Log the failure and carry on as if the lookup had not happened.
    #[default]
    Ignore,
    /// Log the failure and add an error record for it.
    Report,
}

/// Allowed rendering controls per concept datatype name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTypeRenderingMap(BTreeMap<String, Vec<String>>);

/// Result of looking a datatype/rendering pair up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingMatch {
    Allowed,
    /// The datatype is tracked but does not list the rendering.
    Mismatch,
    /// The datatype has no entry at all.
    Untracked,
}

impl DataTypeRenderingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, S>(mut self, datatype: impl Into<String>, renderings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(datatype, renderings);
        self
    }

    pub fn insert<I, S>(&mut self, datatype: impl Into<String>, renderings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            datatype.into(),
            renderings.into_iter().map(Into::into).collect(),
        );
    }

    pub fn check(&self, datatype: &str, rendering: &str) -> RenderingMatch {
        match self.0.get(datatype) {
            None => RenderingMatch::Untracked,
            Some(allowed) if allowed.iter().any(|r| r == rendering) => RenderingMatch::Allowed,
            Some(_) => RenderingMatch::Mismatch,
        }
    }

    pub fn allowed(&self, datatype: &str) -> Option<&[String]> {
        self.0.get(datatype).map(Vec::as_slice)
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
