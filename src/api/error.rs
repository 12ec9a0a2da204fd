use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized, check the configured API token")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Invalid submission: {0}")]
    Invalid(String),
    #[error("HTTP {0}: {1}")]
    Status(u16, String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Map a non-success status and its response body to an error.
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = server_message(body);
        match code {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::Invalid(message),
            _ => Self::Status(code, message),
        }
    }
}

/// Extract the human readable message from an error body.
///
/// The API answers with `{"code": .., "status": .., "message": ..}`; anything
/// else is passed through trimmed.
fn server_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(serde_json::Value::as_str)
    {
        return message.to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        "no details".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound(_)));
        assert!(matches!(ApiError::from_status(409, ""), ApiError::Conflict(_)));
        assert!(matches!(ApiError::from_status(422, ""), ApiError::Invalid(_)));
        assert!(matches!(
            ApiError::from_status(500, ""),
            ApiError::Status(500, _)
        ));
    }

    #[test]
    fn test_message_from_json_body() {
        let body = r#"{"code": 409, "status": "Conflict", "message": "Flavor already exists"}"#;
        let error = ApiError::from_status(409, body);
        assert_eq!(error.to_string(), "Already exists: Flavor already exists");
    }

    #[test]
    fn test_message_from_plain_body() {
        let error = ApiError::from_status(502, "  Bad Gateway\n");
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");

        let error = ApiError::from_status(500, "");
        assert_eq!(error.to_string(), "HTTP 500: no details");
    }
}
