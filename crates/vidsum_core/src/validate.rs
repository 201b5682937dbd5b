use std::fmt;

/// Hosts a submitted URL must mention. Plain substring match, not a URL parse.
const ACCEPTED_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

/// A validated submission, immutable once dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    url: String,
}

impl VideoRequest {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidUrl,
}

impl ValidationError {
    /// Text shown to the user when the submission is rejected.
    pub fn user_message(self) -> &'static str {
        match self {
            ValidationError::InvalidUrl => "Please enter a valid YouTube URL",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidUrl => write!(f, "invalid url"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks the shape of a submitted video URL before any network call.
///
/// Surrounding whitespace is trimmed; the trimmed text becomes the request URL.
pub fn validate_video_url(raw: &str) -> Result<VideoRequest, ValidationError> {
    let url = raw.trim();
    if ACCEPTED_HOSTS.iter().any(|host| url.contains(host)) {
        Ok(VideoRequest {
            url: url.to_string(),
        })
    } else {
        Err(ValidationError::InvalidUrl)
    }
}
