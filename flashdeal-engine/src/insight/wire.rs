//! Request and response shapes of the `generateContent` API.
//!
//! Every substructure the service may omit is an `Option` or a defaulted
//! collection, and the polymorphic pieces (parts, grounding chunks) are sum
//! types with a catch-all variant, so callers match exhaustively instead of
//! probing for keys.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::types::{GeoPoint, InsightSource, SourceKind};

/// What the assistant asks a backend to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Enables place retrieval around this point when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            location: None,
        }
    }

    #[must_use]
    pub const fn located(mut self, location: Option<GeoPoint>) -> Self {
        self.location = location;
        self
    }

    /// JSON body for the REST endpoint.
    #[must_use]
    pub fn to_body(&self) -> GenerateContentBody {
        let (tools, tool_config) = match self.location {
            Some(point) => (
                vec![Tool {
                    google_maps: GoogleMaps {},
                }],
                Some(ToolConfig {
                    retrieval_config: RetrievalConfig {
                        lat_lng: LatLng {
                            latitude: point.lat,
                            longitude: point.lng,
                        },
                    },
                }),
            ),
            None => (Vec::new(), None),
        };
        GenerateContentBody {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: self.prompt.clone(),
                }],
            }],
            tools,
            tool_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    pub contents: Vec<RequestContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_maps: GoogleMaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoogleMaps {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Response with a single text part, for scripted backends.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)])
    }

    #[must_use]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content { parts, role: None }),
                grounding_metadata: None,
            }],
        }
    }

    #[must_use]
    pub fn with_chunks(mut self, chunks: Vec<GroundingChunk>) -> Self {
        let metadata = GroundingMetadata {
            grounding_chunks: chunks.into_iter().collect(),
        };
        match self.candidates.first_mut() {
            Some(candidate) => candidate.grounding_metadata = Some(metadata),
            None => self.candidates.push(Candidate {
                content: None,
                grounding_metadata: Some(metadata),
            }),
        }
        self
    }

    #[must_use]
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Concatenated answer text of the first candidate, skipping thought
    /// parts. `None` when there is no visible text.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let parts = self.first_candidate()?.parts();
        let text: String = parts
            .iter()
            .filter_map(|part| match part {
                Part::Text {
                    text,
                    thought: false,
                } => Some(text.as_str()),
                Part::Text { thought: true, .. } | Part::InlineData { .. } | Part::Other(_) => {
                    None
                }
            })
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_candidate()?
            .parts()
            .iter()
            .find_map(|part| match part {
                Part::InlineData { inline_data } => Some(inline_data),
                Part::Text { .. } | Part::Other(_) => None,
            })
    }

    #[must_use]
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.first_candidate()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|metadata| metadata.grounding_chunks.as_slice())
            .unwrap_or_default()
    }

    /// One source per usable chunk, in response order.
    #[must_use]
    pub fn sources(&self) -> Vec<InsightSource> {
        self.grounding_chunks()
            .iter()
            .filter_map(GroundingChunk::to_source)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

impl Candidate {
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        self.content
            .as_ref()
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        thought: bool,
    },
    Other(serde_json::Value),
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            thought: false,
        }
    }

    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: SmallVec<[GroundingChunk; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroundingChunk {
    Web { web: WebChunk },
    Maps { maps: MapsChunk },
    Other(serde_json::Value),
}

impl GroundingChunk {
    /// Web reference wins over a place reference in the same chunk. Chunks
    /// without a URI contribute nothing; a missing title falls back to the URI.
    #[must_use]
    pub fn to_source(&self) -> Option<InsightSource> {
        match self {
            Self::Web { web } => {
                let uri = non_empty(web.uri.as_deref())?;
                Some(InsightSource {
                    kind: SourceKind::Web,
                    title: non_empty(web.title.as_deref()).unwrap_or(uri).to_string(),
                    uri: uri.to_string(),
                })
            }
            Self::Maps { maps } => {
                let uri = non_empty(maps.google_maps_uri.as_deref())
                    .or_else(|| non_empty(maps.uri.as_deref()))?;
                Some(InsightSource {
                    kind: SourceKind::Place,
                    title: non_empty(maps.title.as_deref()).unwrap_or(uri).to_string(),
                    uri: uri.to_string(),
                })
            }
            Self::Other(_) => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}
