use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persist::PersistError;

/// Opaque id the caller attaches to a command; echoed back on the matching event.
pub type RequestId = u64;

/// Video metadata as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoDetails {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub thumbnail: String,
}

/// Body of a successful `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Summary {
    pub video_info: VideoDetails,
    pub english_summary: String,
    pub hindi_summary: String,
}

/// Where the backend stored the fetched thumbnail, already resolved to an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailLocation {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaledThumbnail {
    pub url: String,
    /// Resolution label reported by the backend, e.g. `"4K"` or `"2x"`.
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    #[serde(rename = "4K")]
    FourK,
    #[serde(rename = "8K")]
    EightK,
}

/// What to ask the upscaler for. Exactly one request field is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscaleTarget {
    ScaleFactor(u32),
    Resolution(Resolution),
}

#[derive(Debug)]
pub enum EngineEvent {
    Summarized {
        request_id: RequestId,
        result: Result<Summary, ApiError>,
    },
    ThumbnailFetched {
        request_id: RequestId,
        result: Result<ThumbnailLocation, ApiError>,
    },
    Upscaled {
        request_id: RequestId,
        result: Result<UpscaledThumbnail, ApiError>,
    },
    ImageSaved {
        result: Result<PathBuf, SaveError>,
    },
    HealthChecked {
        healthy: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// The `error` field of the backend's JSON body, when it sent one.
    pub backend_message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            backend_message: None,
        }
    }

    pub(crate) fn with_backend_message(mut self, message: Option<String>) -> Self {
        self.backend_message = message;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    /// Backend answered 2xx but reported `success: false`.
    Rejected,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Rejected => write!(f, "rejected by backend"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("download failed: {0}")]
    Download(#[from] ApiError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}
