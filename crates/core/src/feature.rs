//! Raw map features as handed over by a data source.
//!
//! Tags are kept as an ordered list of key/value pairs rather than a map:
//! several lookups are "first matching key wins" and prefix-based, so the
//! source order has to survive.

use geo::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// Ordered key/value tag list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of the first tag whose key is exactly `key`
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// True if any tag satisfies `predicate`
    pub fn any(&self, mut predicate: impl FnMut(&str, &str) -> bool) -> bool {
        self.iter().any(|(k, v)| predicate(k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// A geographic feature before classification.
///
/// Coordinates are `x = longitude`, `y = latitude` in WGS84 degrees.
#[derive(Debug, Clone)]
pub struct RawFeature {
    pub geometry: GeometryKind,
    pub coords: Vec<Coord<f64>>,
    pub tags: Tags,
    pub label: Option<String>,
}

impl RawFeature {
    pub fn new(geometry: GeometryKind, coords: Vec<Coord<f64>>, tags: Tags) -> Self {
        Self {
            geometry,
            coords,
            tags,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The display label, with an empty string treated as absent
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    pub fn is_polygon(&self) -> bool {
        self.geometry == GeometryKind::Polygon
    }
}
