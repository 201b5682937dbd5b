/// Metadata for one video, produced by the summarization call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub duration_seconds: u64,
    pub view_count: u64,
    /// Low-resolution thumbnail embedded in the summary; used when no fetched asset exists.
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryResult {
    pub video_info: VideoInfo,
    pub english_summary: String,
    pub hindi_summary: String,
}

impl SummaryResult {
    pub fn summary_for(&self, tab: LanguageTab) -> &str {
        match tab {
            LanguageTab::English => &self.english_summary,
            LanguageTab::Hindi => &self.hindi_summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageTab {
    #[default]
    English,
    Hindi,
}

/// Why a backend stage failed. `message` is the backend's own text when it sent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageFailure {
    pub message: Option<String>,
}

impl StageFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self::default()
    }

    pub(crate) fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Transient message for the user. Severity is fixed by the operation that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Healthy,
    Unreachable,
}
