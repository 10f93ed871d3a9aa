use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Records
// =============================================================================

/// One analyst insight entry. Field names match the dataset keys so the same
/// struct deserializes from the bundled JSON array and from CSV headers.
///
/// Records are read-only once loaded; nothing in the core mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub id: i64,
    #[serde(deserialize_with = "loose_string")]
    pub end_year: String,
    #[serde(deserialize_with = "loose_f64")]
    pub intensity: f64,
    #[serde(deserialize_with = "loose_string")]
    pub sector: String,
    #[serde(deserialize_with = "loose_string")]
    pub topic: String,
    #[serde(deserialize_with = "loose_string")]
    pub insight: String,
    #[serde(deserialize_with = "loose_string")]
    pub url: String,
    #[serde(deserialize_with = "loose_string")]
    pub region: String,
    #[serde(deserialize_with = "loose_string")]
    pub start_year: String,
    #[serde(deserialize_with = "loose_string")]
    pub impact: String,
    #[serde(deserialize_with = "loose_string")]
    pub added: String,
    #[serde(deserialize_with = "loose_string")]
    pub published: String,
    #[serde(deserialize_with = "loose_string")]
    pub country: String,
    #[serde(deserialize_with = "loose_f64")]
    pub relevance: f64,
    #[serde(deserialize_with = "loose_string")]
    pub pestle: String,
    #[serde(deserialize_with = "loose_string")]
    pub source: String,
    #[serde(deserialize_with = "loose_string")]
    pub title: String,
    #[serde(deserialize_with = "loose_f64")]
    pub likelihood: f64,
}

// =============================================================================
// Filter selection
// =============================================================================

/// The currently active per-field equality constraints. An empty string means
/// "no constraint" for that key. `city` is a reserved slot with no record
/// field to match; it never constrains anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub end_year: String,
    pub topic: String,
    pub sector: String,
    pub region: String,
    pub pestle: String,
    pub source: String,
    pub country: String,
    pub city: String,
}

impl Filters {
    /// True if no key carries a constraint.
    pub fn is_empty(&self) -> bool {
        self.end_year.is_empty()
            && self.topic.is_empty()
            && self.sector.is_empty()
            && self.region.is_empty()
            && self.pestle.is_empty()
            && self.source.is_empty()
            && self.country.is_empty()
            && self.city.is_empty()
    }
}

// =============================================================================
// Aggregated output
// =============================================================================

/// One aggregated series point feeding a chart. `count` is only populated by
/// the averaging strategy and is omitted from serialized output otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

// =============================================================================
// Field selectors
// =============================================================================

/// Compile-time-checked selector for the categorical record fields. Replaces
/// access by runtime string key: an invalid field name is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EndYear,
    Sector,
    Topic,
    Insight,
    Url,
    Region,
    StartYear,
    Impact,
    Added,
    Published,
    Country,
    Pestle,
    Source,
    Title,
}

impl Field {
    pub fn get(self, record: &Insight) -> &str {
        match self {
            Field::EndYear => &record.end_year,
            Field::Sector => &record.sector,
            Field::Topic => &record.topic,
            Field::Insight => &record.insight,
            Field::Url => &record.url,
            Field::Region => &record.region,
            Field::StartYear => &record.start_year,
            Field::Impact => &record.impact,
            Field::Added => &record.added,
            Field::Published => &record.published,
            Field::Country => &record.country,
            Field::Pestle => &record.pestle,
            Field::Source => &record.source,
            Field::Title => &record.title,
        }
    }

    /// Resolve a dataset key name (e.g. from a CLI flag) to a selector.
    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "end_year" => Some(Field::EndYear),
            "sector" => Some(Field::Sector),
            "topic" => Some(Field::Topic),
            "insight" => Some(Field::Insight),
            "url" => Some(Field::Url),
            "region" => Some(Field::Region),
            "start_year" => Some(Field::StartYear),
            "impact" => Some(Field::Impact),
            "added" => Some(Field::Added),
            "published" => Some(Field::Published),
            "country" => Some(Field::Country),
            "pestle" => Some(Field::Pestle),
            "source" => Some(Field::Source),
            "title" => Some(Field::Title),
            _ => None,
        }
    }
}

/// Selector for the numeric record fields used as averaging measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Intensity,
    Relevance,
    Likelihood,
}

impl Measure {
    pub fn get(self, record: &Insight) -> f64 {
        match self {
            Measure::Intensity => record.intensity,
            Measure::Relevance => record.relevance,
            Measure::Likelihood => record.likelihood,
        }
    }

    pub fn from_name(name: &str) -> Option<Measure> {
        match name {
            "intensity" => Some(Measure::Intensity),
            "relevance" => Some(Measure::Relevance),
            "likelihood" => Some(Measure::Likelihood),
            _ => None,
        }
    }
}

// =============================================================================
// Permissive deserializers
// =============================================================================

// The bundled dataset is sloppy: numeric fields arrive as numbers, numeric
// strings, "" or null; categorical fields occasionally arrive as numbers.
// Malformed values coerce to 0.0 / "" instead of failing the whole load.

fn loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LooseF64;

    impl<'de> Visitor<'de> for LooseF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<f64, D2::Error> {
            d.deserialize_any(LooseF64)
        }
    }

    deserializer.deserialize_any(LooseF64)
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LooseString;

    impl<'de> Visitor<'de> for LooseString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, a number, or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(LooseString)
        }
    }

    deserializer.deserialize_any(LooseString)
}
