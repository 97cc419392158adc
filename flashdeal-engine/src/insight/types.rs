//! Insight envelope and error types shared by the assistant and backends.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static DATA_URI: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^data:([\w.+-]+/[\w.+-]+);base64,([A-Za-z0-9+/=]+)$").ok());

/// Coordinate used to ground answers in nearby places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Accepts only finite coordinates inside the WGS84 ranges.
    #[must_use]
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Web,
    Place,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSource {
    pub kind: SourceKind,
    pub title: String,
    pub uri: String,
}

/// Answer shown in the assistant panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiInsight {
    pub text: String,
    /// `None` when the answer carries no references; never `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<InsightSource>>,
}

impl AiInsight {
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: None,
        }
    }

    #[must_use]
    pub fn with_sources(text: impl Into<String>, sources: Vec<InsightSource>) -> Self {
        Self {
            text: text.into(),
            sources: (!sources.is_empty()).then_some(sources),
        }
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.as_ref().map_or(0, Vec::len)
    }
}

/// Generated image payload, rendered as a `data:` URI for `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDataUri {
    pub mime_type: String,
    /// Base64 payload exactly as returned by the service.
    pub data: String,
}

impl ImageDataUri {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn to_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Parse a base64 `data:` URI back into its parts.
    #[must_use]
    pub fn parse(uri: &str) -> Option<Self> {
        let re = DATA_URI.as_ref()?;
        let caps = re.captures(uri.trim())?;
        Some(Self::new(&caps[1], &caps[2]))
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    #[error("no API key configured for the insight service")]
    MissingApiKey,
    #[error("insight backend misconfigured: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_uri_formats_and_parses() {
        let image = ImageDataUri::new("image/png", "aGVsbG8=");
        assert_eq!(image.to_uri(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(image.to_string(), image.to_uri());
        assert_eq!(ImageDataUri::parse(&image.to_uri()), Some(image));
        assert_eq!(ImageDataUri::parse("https://example.com/a.png"), None);
        assert_eq!(ImageDataUri::parse("data:image/png;base64,"), None);
    }

    #[test]
    fn empty_sources_collapse_to_none() {
        let insight = AiInsight::with_sources("hi", Vec::new());
        assert!(insight.sources.is_none());
        assert_eq!(insight.source_count(), 0);
        let json = serde_json::to_value(&insight).unwrap();
        assert!(json.get("sources").is_none());
    }

    #[test]
    fn geo_point_rejects_out_of_range() {
        assert!(GeoPoint::checked(37.77, -122.42).is_some());
        assert!(GeoPoint::checked(91.0, 0.0).is_none());
        assert!(GeoPoint::checked(0.0, f64::NAN).is_none());
    }
}
