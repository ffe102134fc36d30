//! Shared reqwest plumbing for the outbound clients.

use std::time::Duration;

use lessonline_types::error::CollaboratorError;

/// Default timeout for calls to LINE and the record service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a client with the given request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, CollaboratorError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("lessonline/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CollaboratorError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Parse a configured base URL such as `https://api.line.me`.
pub fn parse_base(base: &str) -> Result<reqwest::Url, CollaboratorError> {
    let url = reqwest::Url::parse(base)
        .map_err(|e| CollaboratorError::NotConfigured(format!("invalid base URL {base:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CollaboratorError::NotConfigured(format!(
            "base URL {base:?} cannot carry a path"
        )));
    }
    Ok(url)
}

/// Append `segments` to the path of `base`.
///
/// Each segment is percent-encoded as one path segment, `/` included, so a
/// caller-supplied identifier cannot climb out of the resource it names.
/// Empty, `.` and `..` segments are rejected.
pub fn endpoint(base: &reqwest::Url, segments: &[&str]) -> Result<reqwest::Url, CollaboratorError> {
    if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(CollaboratorError::InvalidIdentifier((*bad).to_string()));
    }
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CollaboratorError::NotConfigured(format!("base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn transport(e: reqwest::Error) -> CollaboratorError {
    CollaboratorError::Transport(format!("HTTP request failed: {e}"))
}

/// Turn a non-success response into [`CollaboratorError::Status`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, CollaboratorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CollaboratorError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let base = parse_base("http://records.local/api/").unwrap();
        let url = endpoint(&base, &["lessons", "latest"]).unwrap();
        assert_eq!(url.as_str(), "http://records.local/api/lessons/latest");

        let bare = parse_base("http://records.local").unwrap();
        assert_eq!(
            endpoint(&bare, &["lessons"]).unwrap().as_str(),
            "http://records.local/lessons"
        );
    }

    #[test]
    fn test_endpoint_encodes_separators_in_segments() {
        let base = parse_base("http://records.local").unwrap();
        let url = endpoint(&base, &["lessons", "../admin/purge"]).unwrap();
        assert_eq!(url.path(), "/lessons/..%2Fadmin%2Fpurge");

        let url = endpoint(&base, &["lessons", "a?b#c"]).unwrap();
        assert_eq!(url.path(), "/lessons/a%3Fb%23c");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let base = parse_base("http://records.local").unwrap();
        for bad in ["", ".", ".."] {
            let err = endpoint(&base, &["lessons", bad]).unwrap_err();
            assert!(matches!(err, CollaboratorError::InvalidIdentifier(_)));
        }
    }

    #[test]
    fn test_parse_base_rejects_garbage() {
        assert!(matches!(
            parse_base("not a url"),
            Err(CollaboratorError::NotConfigured(_))
        ));
        assert!(matches!(
            parse_base("mailto:someone@example.com"),
            Err(CollaboratorError::NotConfigured(_))
        ));
    }
}
