use crate::{RequestToken, UpscaleSpec, VideoRequest};

/// Work the reducer asks the outside world to perform.
///
/// Token-scoped effects must report back with the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Summarize {
        token: RequestToken,
        request: VideoRequest,
    },
    FetchThumbnail {
        token: RequestToken,
        request: VideoRequest,
    },
    Upscale {
        token: RequestToken,
        request: VideoRequest,
        spec: UpscaleSpec,
    },
    SaveImage { url: String, filename: String },
}
