//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which matcher stage produced a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    ExactDistrict,
    DistrictAlias,
    CityName,
    CityAlias,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactDistrict => write!(f, "District"),
            Self::DistrictAlias => write!(f, "District alias"),
            Self::CityName => write!(f, "City"),
            Self::CityAlias => write!(f, "City alias"),
        }
    }
}

/// Why a query could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The caller handed over something that is not text.
    InvalidInput,
    /// Nothing but filler words, punctuation or emoji.
    EmptyQuery,
    /// No city or district matched any stage.
    NoMatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::EmptyQuery => write!(f, "empty query"),
            Self::NoMatch => write!(f, "no match"),
        }
    }
}

/// Result of resolving one message.
///
/// Either a (partial) success carrying a city and optionally one of its
/// districts, or a failure carrying a user-facing message. The fields are
/// private so neither shape can be mixed with the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<String>,
    /// Weather-source id of `city`.
    #[serde(skip_serializing_if = "Option::is_none")]
    city_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<MatchSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<FailureKind>,
}

impl ResolvedLocation {
    pub(crate) fn found(
        city: &str,
        city_id: &str,
        district: Option<&str>,
        source: MatchSource,
    ) -> Self {
        Self {
            city: Some(city.to_string()),
            district: district.map(str::to_string),
            city_id: Some(city_id.to_string()),
            source: Some(source),
            error: None,
            failure: None,
        }
    }

    pub(crate) fn failed(kind: FailureKind, message: String) -> Self {
        Self {
            city: None,
            district: None,
            city_id: None,
            source: None,
            error: Some(message),
            failure: Some(kind),
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn city_id(&self) -> Option<&str> {
        self.city_id.as_deref()
    }

    pub fn source(&self) -> Option<MatchSource> {
        self.source
    }

    /// User-facing explanation, present only on failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn is_resolved(&self) -> bool {
        self.city.is_some()
    }

    pub fn display_line(&self) -> String {
        match (&self.city, &self.district, &self.error) {
            (Some(city), Some(district), _) => format!("\u{1F4CD} {} {}", city, district),
            (Some(city), None, _) => format!("\u{1F4CD} {}", city),
            (None, _, Some(err)) => err.clone(),
            (None, _, None) => String::new(),
        }
    }
}

/// Gazetteer construction and loading errors.
#[derive(Debug, thiserror::Error)]
pub enum GazetteerError {
    #[error("cannot read gazetteer: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid gazetteer JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gazetteer has a city with an empty name")]
    EmptyCityName,

    #[error("city '{city}' has a district with an empty name")]
    EmptyDistrictName { city: String },

    #[error("city '{0}' is declared more than once")]
    DuplicateCity(String),

    #[error("district '{district}' is declared under both '{first}' and '{second}'")]
    DuplicateDistrict {
        district: String,
        first: String,
        second: String,
    },

    #[error("city alias '{alias}' points at unknown city '{target}'")]
    UnknownCity { alias: String, target: String },

    #[error("district alias '{alias}' points at unknown district '{target}'")]
    UnknownDistrict { alias: String, target: String },
}
