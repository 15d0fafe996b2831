//! Ordered tag → shape dispatch table.
//!
//! This is the configurable part of classification. A table is a list of
//! rules checked in order; the first rule with a matching tag decides the
//! shape. It can be loaded from JSON, for example:
//!
//! ```json
//! { "rules": [
//!     { "key": "highway", "target": { "shape": "road" } },
//!     { "key": "landuse", "values": ["residential"],
//!       "target": { "shape": "geo_feature", "kind": "residential" } }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TileError};
use crate::feature::Tags;
use crate::shape::GeoFeatureKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Target {
    Road,
    Railway,
    Waterway,
    /// Generic feature; without a `kind` the `natural` tag decides
    GeoFeature {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<GeoFeatureKind>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    /// Accepted values; empty accepts any value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub target: Target,
}

impl Rule {
    pub fn new(key: impl Into<String>, target: Target) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            target,
        }
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, tags: &Tags) -> bool {
        tags.any(|key, value| {
            key == self.key && (self.values.is_empty() || self.values.iter().any(|v| v == value))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub rules: Vec<Rule>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let generic = Target::GeoFeature { kind: None };

        Self {
            rules: vec![
                Rule::new("highway", Target::Road),
                Rule::new("railway", Target::Railway),
                Rule::new("waterway", Target::Waterway),
                Rule::new("natural", generic.clone()),
                Rule::new(
                    "landuse",
                    Target::GeoFeature {
                        kind: Some(GeoFeatureKind::Residential),
                    },
                )
                .with_values(["residential"]),
                Rule::new("landuse", generic),
            ],
        }
    }
}

impl Taxonomy {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| TileError::TaxonomyIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Target of the first rule matching `tags`
    pub fn target_for(&self, tags: &Tags) -> Option<&Target> {
        self.rules
            .iter()
            .find(|rule| rule.matches(tags))
            .map(|rule| &rule.target)
    }
}
