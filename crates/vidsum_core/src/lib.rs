//! Vidsum core: pure orchestration state machine and view-model helpers.
mod effect;
mod filename;
mod msg;
mod sequencer;
mod state;
mod summary;
mod thumbnail;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use filename::download_filename;
pub use msg::Msg;
pub use sequencer::{RequestSequencer, RequestToken};
pub use state::AppState;
pub use summary::{
    BackendHealth, LanguageTab, Notification, Severity, StageFailure, SummaryResult, VideoInfo,
};
pub use thumbnail::{
    TargetResolution, ThumbnailAsset, ThumbnailPhase, UpscaleOption, UpscaleSpec, Variant,
};
pub use update::update;
pub use validate::{validate_video_url, ValidationError, VideoRequest};
pub use view_model::{format_duration, format_view_count, watch_url, AppViewModel, SummaryView};
