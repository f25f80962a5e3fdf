use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Top-level structure of an inbound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeShape {
    /// `result.input.payload.hits.hits[]` holding SIEM hits.
    NestedWrapped,
    /// Top-level `hits[]` holding flat alerts.
    FlatHitsArray,
    /// The body itself is an array of hits.
    BareHitsArray,
    /// Telemetry: one object or an array of objects.
    SingleObjectOrArray,
}

impl EnvelopeShape {
    /// Shape assumed for a hit that carries neither `_source` nor `timestamp`.
    pub fn default_hit_shape(self) -> HitShape {
        match self {
            EnvelopeShape::FlatHitsArray => HitShape::Flat,
            EnvelopeShape::NestedWrapped
            | EnvelopeShape::BareHitsArray
            | EnvelopeShape::SingleObjectOrArray => HitShape::Nested,
        }
    }
}

impl fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnvelopeShape::NestedWrapped => "nested_wrapped",
            EnvelopeShape::FlatHitsArray => "flat_hits_array",
            EnvelopeShape::BareHitsArray => "bare_hits_array",
            EnvelopeShape::SingleObjectOrArray => "single_object_or_array",
        };
        f.write_str(name)
    }
}

/// Layout of a single hit, sniffed per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitShape {
    Nested,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHits {
    pub shape: Option<EnvelopeShape>,
    pub hits: Vec<Value>,
}

impl ResolvedHits {
    pub fn none() -> Self {
        Self {
            shape: None,
            hits: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
