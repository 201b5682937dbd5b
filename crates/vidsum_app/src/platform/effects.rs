use std::sync::{mpsc, Arc};

use vidsum_core::{
    Effect, Msg, RequestToken, StageFailure, SummaryResult, TargetResolution, UpscaleSpec,
    VideoInfo,
};
use vidsum_engine::{
    ApiError, AtomicFileWriter, EngineEvent, EngineHandle, EventSink, PersistError,
    ReqwestVideoApi, Resolution, SaveError, Summary, UpscaleTarget,
};
use vidsum_logging::{vidsum_debug, vidsum_info, vidsum_warn};

use super::app::AppEvent;
use super::config::AppConfig;

/// Runs core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let api = ReqwestVideoApi::new(config.client_settings())?;
        let writer = AtomicFileWriter::new(config.output_dir.clone());
        let sink = MsgSink { tx: event_tx };
        let engine = EngineHandle::new(Arc::new(api), writer, Arc::new(sink))?;
        Ok(Self { engine })
    }

    pub fn check_health(&self) {
        self.engine.check_health();
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Summarize { token, request } => {
                    vidsum_info!("Summarize {} url={}", token, request.url());
                    self.engine.summarize(token.get(), request.url());
                }
                Effect::FetchThumbnail { token, request } => {
                    vidsum_info!("FetchThumbnail {} url={}", token, request.url());
                    self.engine.fetch_thumbnail(token.get(), request.url());
                }
                Effect::Upscale {
                    token,
                    request,
                    spec,
                } => {
                    vidsum_info!("Upscale {} to {} url={}", token, spec.label(), request.url());
                    self.engine.upscale(token.get(), request.url(), map_spec(spec));
                }
                Effect::SaveImage { url, filename } => {
                    vidsum_info!("SaveImage {} as {}", url, filename);
                    self.engine.save_image(url, filename);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Summarized { request_id, result } => Msg::SummarizeFinished {
            token: RequestToken::new(request_id),
            result: result.map(map_summary).map_err(|err| failure(&err)),
        },
        EngineEvent::ThumbnailFetched { request_id, result } => Msg::ThumbnailFetched {
            token: RequestToken::new(request_id),
            result: result.map(|location| location.url).map_err(|err| failure(&err)),
        },
        EngineEvent::Upscaled { request_id, result } => Msg::UpscaleFinished {
            token: RequestToken::new(request_id),
            result: result
                .map(|upscaled| {
                    vidsum_debug!(
                        "Backend upscaled to {}",
                        upscaled.resolution.as_deref().unwrap_or("<unreported>")
                    );
                    upscaled.url
                })
                .map_err(|err| failure(&err)),
        },
        EngineEvent::ImageSaved { result } => Msg::ImageSaved {
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| save_failure(&err)),
        },
        EngineEvent::HealthChecked { healthy } => Msg::BackendHealthChecked { healthy },
    }
}

/// Only the backend's own text reaches the user; transport details stay in the log.
fn failure(err: &ApiError) -> StageFailure {
    vidsum_debug!("Backend call failed: {}", err);
    StageFailure {
        message: err.backend_message.clone(),
    }
}

/// Short reason for the user; the full error chain goes to the log.
fn save_failure(err: &SaveError) -> StageFailure {
    vidsum_warn!("Saving thumbnail failed: {}", err);
    let reason = match err {
        SaveError::Download(_) => "could not download the image",
        SaveError::Persist(PersistError::OutputDir(_)) => "output directory is not usable",
        SaveError::Persist(PersistError::InvalidFileName(_)) => "invalid file name",
        SaveError::Persist(PersistError::Io(_)) => "could not write the file",
    };
    StageFailure::new(reason)
}

fn map_summary(summary: Summary) -> SummaryResult {
    let info = summary.video_info;
    SummaryResult {
        video_info: VideoInfo {
            id: info.id,
            title: info.title,
            channel: info.channel,
            duration_seconds: info.duration,
            view_count: info.view_count,
            thumbnail_url: info.thumbnail,
        },
        english_summary: summary.english_summary,
        hindi_summary: summary.hindi_summary,
    }
}

fn map_spec(spec: UpscaleSpec) -> UpscaleTarget {
    match spec {
        UpscaleSpec::ScaleFactor(factor) => UpscaleTarget::ScaleFactor(factor),
        UpscaleSpec::Target(TargetResolution::FourK) => {
            UpscaleTarget::Resolution(Resolution::FourK)
        }
        UpscaleSpec::Target(TargetResolution::EightK) => {
            UpscaleTarget::Resolution(Resolution::EightK)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use vidsum_core::{Msg, RequestToken, StageFailure, UpscaleOption};
    use vidsum_engine::{
        ApiError, EngineEvent, FailureKind, PersistError, Resolution, SaveError,
        ThumbnailLocation, UpscaleTarget, UpscaledThumbnail,
    };

    use super::{map_event, map_spec};

    #[test]
    fn upscale_specs_map_onto_engine_targets() {
        assert_eq!(
            map_spec(UpscaleOption::Standard.spec()),
            UpscaleTarget::ScaleFactor(2)
        );
        assert_eq!(
            map_spec(UpscaleOption::FourK.spec()),
            UpscaleTarget::Resolution(Resolution::FourK)
        );
        assert_eq!(
            map_spec(UpscaleOption::EightK.spec()),
            UpscaleTarget::Resolution(Resolution::EightK)
        );
    }

    #[test]
    fn request_ids_become_tokens() {
        let msg = map_event(EngineEvent::ThumbnailFetched {
            request_id: 3,
            result: Ok(ThumbnailLocation {
                url: "http://localhost:5000/static/thumbnails/a.jpg".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::ThumbnailFetched {
                token: RequestToken::new(3),
                result: Ok("http://localhost:5000/static/thumbnails/a.jpg".to_string()),
            }
        );

        let msg = map_event(EngineEvent::Upscaled {
            request_id: 4,
            result: Ok(UpscaledThumbnail {
                url: "http://localhost:5000/static/u.jpg".to_string(),
                resolution: Some("4K".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Msg::UpscaleFinished {
                token: RequestToken::new(4),
                result: Ok("http://localhost:5000/static/u.jpg".to_string()),
            }
        );
    }

    #[test]
    fn save_errors_are_described() {
        let msg = map_event(EngineEvent::ImageSaved {
            result: Err(SaveError::Persist(PersistError::InvalidFileName("..".into()))),
        });
        assert_eq!(
            msg,
            Msg::ImageSaved {
                result: Err(StageFailure::new("invalid file name")),
            }
        );

        let msg = map_event(EngineEvent::ImageSaved {
            result: Ok(PathBuf::from("thumbnails").join("a.jpg")),
        });
        assert!(matches!(msg, Msg::ImageSaved { result: Ok(_) }));
    }

    #[test]
    fn save_errors_hide_io_and_transport_details() {
        let msg = map_event(EngineEvent::ImageSaved {
            result: Err(SaveError::Persist(PersistError::Io(std::io::Error::other(
                "No space left on device (os error 28)",
            )))),
        });
        assert_eq!(
            msg,
            Msg::ImageSaved {
                result: Err(StageFailure::new("could not write the file")),
            }
        );

        let msg = map_event(EngineEvent::ImageSaved {
            result: Err(SaveError::Download(ApiError {
                kind: FailureKind::Network,
                message: "error sending request for url (http://localhost:5000/a.jpg)".to_string(),
                backend_message: None,
            })),
        });
        assert_eq!(
            msg,
            Msg::ImageSaved {
                result: Err(StageFailure::new("could not download the image")),
            }
        );
    }
}
