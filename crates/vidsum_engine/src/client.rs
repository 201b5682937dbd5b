use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vidsum_logging::{vidsum_debug, vidsum_warn};

use crate::resolve::{endpoint_url, resolve_backend_url};
use crate::{
    ApiError, FailureKind, Resolution, Summary, ThumbnailLocation, UpscaleTarget,
    UpscaledThumbnail,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Backend origin, e.g. `http://localhost:5000`. Relative asset URLs resolve against it.
    pub base_url: String,
    /// Route prefix of the JSON endpoints.
    pub api_prefix: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_image_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            api_prefix: "/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Summarization transcribes and translates server-side.
            request_timeout: Duration::from_secs(120),
            max_image_bytes: 32 * 1024 * 1024,
        }
    }
}

/// The backend as seen by the engine. One call per method, no retries.
#[async_trait::async_trait]
pub trait VideoApi: Send + Sync {
    async fn summarize(&self, video_url: &str) -> Result<Summary, ApiError>;

    async fn download_thumbnail(&self, video_url: &str) -> Result<ThumbnailLocation, ApiError>;

    async fn upscale_thumbnail(
        &self,
        video_url: &str,
        target: UpscaleTarget,
    ) -> Result<UpscaledThumbnail, ApiError>;

    async fn health(&self) -> Result<bool, ApiError>;

    /// Downloads image bytes from an absolute URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

#[derive(Serialize)]
struct VideoUrlBody<'a> {
    video_url: &'a str,
}

#[derive(Serialize)]
struct UpscaleBody<'a> {
    video_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_factor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_resolution: Option<Resolution>,
}

#[derive(Deserialize)]
struct ThumbnailBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct UpscaleResponseBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    upscaled_url: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestVideoApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestVideoApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, name: &str) -> Result<reqwest::Url, ApiError> {
        endpoint_url(&self.settings.base_url, &self.settings.api_prefix, name)
    }

    fn resolve(&self, location: &str) -> Result<String, ApiError> {
        resolve_backend_url(&self.settings.base_url, location).map(String::from)
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(endpoint)?;
        vidsum_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    fn is_image(content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        ct.to_ascii_lowercase().starts_with("image/")
    }
}

#[async_trait::async_trait]
impl VideoApi for ReqwestVideoApi {
    async fn summarize(&self, video_url: &str) -> Result<Summary, ApiError> {
        self.post_json("summarize", &VideoUrlBody { video_url }).await
    }

    async fn download_thumbnail(&self, video_url: &str) -> Result<ThumbnailLocation, ApiError> {
        let body: ThumbnailBody = self
            .post_json("download-thumbnail", &VideoUrlBody { video_url })
            .await?;
        match body.url.filter(|url| body.success && !url.is_empty()) {
            Some(location) => Ok(ThumbnailLocation {
                url: self.resolve(&location)?,
            }),
            None => Err(ApiError::new(
                FailureKind::Rejected,
                "thumbnail download was not successful",
            )),
        }
    }

    async fn upscale_thumbnail(
        &self,
        video_url: &str,
        target: UpscaleTarget,
    ) -> Result<UpscaledThumbnail, ApiError> {
        let request = match target {
            UpscaleTarget::ScaleFactor(factor) => UpscaleBody {
                video_url,
                scale_factor: Some(factor),
                target_resolution: None,
            },
            UpscaleTarget::Resolution(resolution) => UpscaleBody {
                video_url,
                scale_factor: None,
                target_resolution: Some(resolution),
            },
        };
        let body: UpscaleResponseBody = self.post_json("upscale-thumbnail", &request).await?;
        match body.upscaled_url.filter(|url| body.success && !url.is_empty()) {
            Some(location) => Ok(UpscaledThumbnail {
                url: self.resolve(&location)?,
                resolution: body.resolution.filter(|label| !label.is_empty()),
            }),
            None => Err(ApiError::new(
                FailureKind::Rejected,
                "thumbnail upscale was not successful",
            )),
        }
    }

    async fn health(&self) -> Result<bool, ApiError> {
        let url = self.endpoint("health")?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let body: HealthBody = decode_json(response).await?;
        Ok(body.status.eq_ignore_ascii_case("healthy"))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let max_bytes = self.settings.max_image_bytes;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "image too large",
                ));
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !Self::is_image(ct) {
                return Err(ApiError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "not an image",
                ));
            }
        }

        let mut bytes = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "image too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes.to_vec())
    }
}

/// Decodes a JSON body, turning non-2xx answers into errors that carry the
/// backend's `error` text when present.
async fn decode_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        let backend_message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error);
        vidsum_warn!(
            "Backend answered {}: {}",
            status,
            backend_message.as_deref().unwrap_or("<no error body>")
        );
        return Err(
            ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                .with_backend_message(backend_message),
        );
    }

    serde_json::from_slice(&body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
