use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use vidsum_logging::{vidsum_debug, vidsum_info, vidsum_warn};

use crate::client::VideoApi;
use crate::persist::AtomicFileWriter;
use crate::{EngineEvent, RequestId, SaveError, UpscaleTarget};

enum EngineCommand {
    Summarize { request_id: RequestId, video_url: String },
    FetchThumbnail { request_id: RequestId, video_url: String },
    Upscale {
        request_id: RequestId,
        video_url: String,
        target: UpscaleTarget,
    },
    SaveImage { url: String, filename: String },
    CheckHealth,
}

/// Receives engine events, from whichever runtime worker finished the command.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Handle to the background engine thread.
///
/// Commands run concurrently on a tokio runtime and finish in any order;
/// each reports exactly one event. Nothing in flight is ever aborted.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        api: Arc<dyn VideoApi>,
        writer: AtomicFileWriter,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let writer = Arc::new(writer);

        thread::Builder::new()
            .name("vidsum-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let writer = writer.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), writer.as_ref(), command, sink.as_ref())
                            .await;
                    });
                }
                vidsum_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn summarize(&self, request_id: RequestId, video_url: impl Into<String>) {
        self.send(EngineCommand::Summarize {
            request_id,
            video_url: video_url.into(),
        });
    }

    pub fn fetch_thumbnail(&self, request_id: RequestId, video_url: impl Into<String>) {
        self.send(EngineCommand::FetchThumbnail {
            request_id,
            video_url: video_url.into(),
        });
    }

    pub fn upscale(
        &self,
        request_id: RequestId,
        video_url: impl Into<String>,
        target: UpscaleTarget,
    ) {
        self.send(EngineCommand::Upscale {
            request_id,
            video_url: video_url.into(),
            target,
        });
    }

    pub fn save_image(&self, url: impl Into<String>, filename: impl Into<String>) {
        self.send(EngineCommand::SaveImage {
            url: url.into(),
            filename: filename.into(),
        });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            vidsum_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn VideoApi,
    writer: &AtomicFileWriter,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Summarize {
            request_id,
            video_url,
        } => {
            let result = api.summarize(&video_url).await;
            sink.emit(EngineEvent::Summarized { request_id, result });
        }
        EngineCommand::FetchThumbnail {
            request_id,
            video_url,
        } => {
            let result = api.download_thumbnail(&video_url).await;
            sink.emit(EngineEvent::ThumbnailFetched { request_id, result });
        }
        EngineCommand::Upscale {
            request_id,
            video_url,
            target,
        } => {
            let result = api.upscale_thumbnail(&video_url, target).await;
            sink.emit(EngineEvent::Upscaled { request_id, result });
        }
        EngineCommand::SaveImage { url, filename } => {
            let result = save_image(api, writer, &url, &filename).await;
            if let Ok(path) = &result {
                vidsum_info!("Saved {} to {:?}", url, path);
            }
            sink.emit(EngineEvent::ImageSaved { result });
        }
        EngineCommand::CheckHealth => {
            let healthy = match api.health().await {
                Ok(healthy) => healthy,
                Err(err) => {
                    vidsum_warn!("Health check failed: {}", err);
                    false
                }
            };
            sink.emit(EngineEvent::HealthChecked { healthy });
        }
    }
}

async fn save_image(
    api: &dyn VideoApi,
    writer: &AtomicFileWriter,
    url: &str,
    filename: &str,
) -> Result<std::path::PathBuf, SaveError> {
    let bytes = api.fetch_image(url).await?;
    let writer = writer.clone();
    let filename = filename.to_string();
    // Disk IO stays off the async workers.
    let written = tokio::task::spawn_blocking(move || writer.write(&filename, &bytes))
        .await
        .map_err(|err| crate::PersistError::Io(io::Error::other(err.to_string())))??;
    Ok(written)
}
