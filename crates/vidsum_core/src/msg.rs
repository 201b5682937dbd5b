use crate::{LanguageTab, RequestToken, StageFailure, SummaryResult, UpscaleOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input.
    SubmitClicked,
    /// Summarization call finished for the submission identified by `token`.
    SummarizeFinished {
        token: RequestToken,
        result: Result<SummaryResult, StageFailure>,
    },
    /// Thumbnail fetch finished; `Ok` carries the resolved image URL.
    ThumbnailFetched {
        token: RequestToken,
        result: Result<String, StageFailure>,
    },
    /// User clicked the default (2x) upscale button.
    UpscaleClicked,
    UpscaleMenuOpened,
    UpscaleMenuClosed,
    /// User picked an entry of the upscale menu.
    UpscaleOptionChosen(UpscaleOption),
    /// Upscale finished; `Ok` carries the resolved image URL.
    UpscaleFinished {
        token: RequestToken,
        result: Result<String, StageFailure>,
    },
    /// User flipped between original and upscaled image.
    VariantToggled,
    DialogOpened,
    DialogClosed,
    LanguageTabSelected(LanguageTab),
    NotificationDismissed,
    /// User asked to save the current image. The caller supplies the clock.
    DownloadClicked { requested_at_ms: i64 },
    /// Save-to-device finished; `Ok` carries where the file landed.
    ImageSaved { result: Result<String, StageFailure> },
    /// Result of the startup health probe.
    BackendHealthChecked { healthy: bool },
}
