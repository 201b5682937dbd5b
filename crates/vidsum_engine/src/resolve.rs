use url::Url;

use crate::{ApiError, FailureKind};

/// Resolves a location returned by the backend against its base URL.
///
/// Absolute URLs pass through. Anything else is appended to the base, so a
/// base with a path (`https://host/app`) keeps that path.
pub fn resolve_backend_url(base: &str, location: &str) -> Result<Url, ApiError> {
    if let Ok(absolute) = Url::parse(location) {
        return Ok(absolute);
    }
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        location.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
}

/// `{base}{prefix}/{endpoint}` with slashes normalized.
pub(crate) fn endpoint_url(base: &str, prefix: &str, endpoint: &str) -> Result<Url, ApiError> {
    let prefix = prefix.trim_matches('/');
    let path = if prefix.is_empty() {
        endpoint.to_string()
    } else {
        format!("{prefix}/{endpoint}")
    };
    resolve_backend_url(base, &path)
}

#[cfg(test)]
mod tests {
    use super::{endpoint_url, resolve_backend_url};
    use crate::FailureKind;

    #[test]
    fn relative_locations_are_appended_to_base() {
        let url =
            resolve_backend_url("http://localhost:5000", "/static/thumbnails/abc.jpg").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/static/thumbnails/abc.jpg");

        let url = resolve_backend_url("https://host/app/", "static/a.jpg").unwrap();
        assert_eq!(url.as_str(), "https://host/app/static/a.jpg");
    }

    #[test]
    fn absolute_locations_pass_through() {
        let url = resolve_backend_url(
            "http://localhost:5000",
            "https://img.youtube.com/vi/abc/maxresdefault.jpg",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("img.youtube.com"));
    }

    #[test]
    fn garbage_base_is_invalid_url() {
        let err = resolve_backend_url("not a base", "/x").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn endpoints_respect_prefix() {
        assert_eq!(
            endpoint_url("http://localhost:5000", "/api", "summarize").unwrap().as_str(),
            "http://localhost:5000/api/summarize"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000/", "", "health").unwrap().as_str(),
            "http://localhost:5000/health"
        );
    }
}
