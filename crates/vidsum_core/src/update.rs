use vidsum_logging::{vidsum_debug, vidsum_warn};

use crate::filename::download_filename;
use crate::{
    validate_video_url, AppState, BackendHealth, Effect, Msg, Notification, RequestToken,
    UpscaleSpec,
};

const SUMMARIZE_FAILED: &str = "An error occurred while summarizing the video";
const UPSCALE_FAILED: &str = "Failed to upscale thumbnail. Please try again.";
const SAVE_FAILED: &str = "Failed to save thumbnail";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SummarizeFinished { token, result } => {
            if drop_stale(&state, token, "summary") {
                return (state, Vec::new());
            }
            match result {
                Ok(summary) => {
                    state.finish_summary(Some(summary));
                    match state.current_request().cloned() {
                        Some(request) => {
                            state.begin_thumbnail_fetch();
                            vec![Effect::FetchThumbnail { token, request }]
                        }
                        None => Vec::new(),
                    }
                }
                Err(failure) => {
                    state.finish_summary(None);
                    state.notify(Notification::error(failure.message_or(SUMMARIZE_FAILED)));
                    Vec::new()
                }
            }
        }
        Msg::ThumbnailFetched { token, result } => {
            if drop_stale(&state, token, "thumbnail") {
                return (state, Vec::new());
            }
            match result {
                Ok(url) => state.finish_thumbnail_fetch(Some(url)),
                Err(failure) => {
                    // Falls back to the thumbnail embedded in the summary.
                    vidsum_warn!(
                        "Thumbnail fetch failed for {}: {}",
                        token,
                        failure.message_or("no details")
                    );
                    state.finish_thumbnail_fetch(None);
                }
            }
            Vec::new()
        }
        Msg::UpscaleClicked => request_upscale(&mut state, UpscaleSpec::STANDARD),
        Msg::UpscaleMenuOpened => {
            state.open_menu();
            Vec::new()
        }
        Msg::UpscaleMenuClosed => {
            state.close_menu();
            Vec::new()
        }
        Msg::UpscaleOptionChosen(option) => {
            state.close_menu();
            request_upscale(&mut state, option.spec())
        }
        Msg::UpscaleFinished { token, result } => {
            if drop_stale(&state, token, "upscale") {
                return (state, Vec::new());
            }
            let failure = result.as_ref().err().cloned();
            match state.finish_upscale(result.ok()) {
                None => {
                    vidsum_debug!("Upscale result for {} without a pending upscale", token);
                }
                Some(spec) => match failure {
                    None => state.notify(Notification::success(format!(
                        "Thumbnail successfully upscaled to {}!",
                        spec.label()
                    ))),
                    Some(failure) => {
                        vidsum_warn!(
                            "Upscale {} failed for {}: {}",
                            spec.label(),
                            token,
                            failure.message_or("no details")
                        );
                        state.notify(Notification::error(UPSCALE_FAILED));
                    }
                },
            }
            Vec::new()
        }
        Msg::VariantToggled => {
            state.toggle_variant();
            Vec::new()
        }
        Msg::DialogOpened => {
            state.open_dialog();
            Vec::new()
        }
        Msg::DialogClosed => {
            state.close_dialog();
            Vec::new()
        }
        Msg::LanguageTabSelected(tab) => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::DownloadClicked { requested_at_ms } => save_current_image(&state, requested_at_ms),
        Msg::ImageSaved { result } => {
            match result {
                Ok(path) => state.notify(Notification::info(format!("Thumbnail saved to {path}"))),
                Err(failure) => state.notify(Notification::error(match failure.message {
                    Some(message) if !message.is_empty() => format!("{SAVE_FAILED}: {message}"),
                    _ => SAVE_FAILED.to_string(),
                })),
            }
            Vec::new()
        }
        Msg::BackendHealthChecked { healthy } => {
            state.set_backend_health(if healthy {
                BackendHealth::Healthy
            } else {
                BackendHealth::Unreachable
            });
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // Submit is disabled while the input box is empty.
    if state.input().is_empty() {
        return Vec::new();
    }
    match validate_video_url(state.input()) {
        Ok(request) => {
            let token = state.begin_submission(request.clone());
            vec![Effect::Summarize { token, request }]
        }
        Err(err) => {
            state.notify(Notification::error(err.user_message()));
            Vec::new()
        }
    }
}

fn request_upscale(state: &mut AppState, spec: UpscaleSpec) -> Vec<Effect> {
    let (Some(token), Some(request)) = (state.current_token(), state.current_request().cloned())
    else {
        return Vec::new();
    };
    if !state.begin_upscale(spec) {
        vidsum_debug!(
            "Upscale {} ignored: no original thumbnail or upscale in flight",
            spec.label()
        );
        return Vec::new();
    }
    vec![Effect::Upscale {
        token,
        request,
        spec,
    }]
}

fn save_current_image(state: &AppState, requested_at_ms: i64) -> Vec<Effect> {
    if state.is_loading_thumbnail() {
        return Vec::new();
    }
    let (Some(summary), Some(url)) = (state.summary(), state.current_image_url()) else {
        return Vec::new();
    };
    let filename = download_filename(
        &summary.video_info.id,
        requested_at_ms,
        state.active_variant(),
        state.resolution_badge(),
    );
    vec![Effect::SaveImage {
        url: url.to_string(),
        filename,
    }]
}

fn drop_stale(state: &AppState, token: RequestToken, stage: &str) -> bool {
    let stale = state.is_stale(token);
    if stale {
        vidsum_debug!("Dropping stale {} result for {}", stage, token);
    }
    stale
}
