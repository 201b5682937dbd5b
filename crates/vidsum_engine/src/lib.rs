//! Vidsum engine: backend client, effect execution and thumbnail persistence.
mod client;
mod engine;
mod persist;
mod resolve;
mod types;

pub use client::{ClientSettings, ReqwestVideoApi, VideoApi};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use resolve::resolve_backend_url;
pub use types::{
    ApiError, EngineEvent, FailureKind, RequestId, Resolution, SaveError, Summary,
    ThumbnailLocation, UpscaleTarget, UpscaledThumbnail, VideoDetails,
};
