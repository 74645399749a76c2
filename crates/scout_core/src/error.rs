use std::fmt;

/// Closed set of failure kinds shared by every scout component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No token, or the platform redirected to its login wall.
    NotAuthenticated,
    /// No person, company or job id could be extracted from the input.
    InvalidIdentifier,
    /// The body could not be read or decoded, or redirects never settled.
    InvalidResponse,
    /// Any status the classification table does not map to a named kind.
    HttpError(u16),
    /// The platform answered with a checkpoint/challenge page.
    SecurityChallenge,
    /// The document was empty or had no usable primary field.
    ParseError,
    RateLimited,
    RecordNotFound,
    /// `value` is not a `urn:li:profile:` or `urn:li:miniProfile:` URN.
    InvalidUrn { value: String },
    /// Capture or analysis failed, or the answer had the wrong kind or no name.
    VisionUnavailable,
    /// A caller-supplied argument `name` failed validation before any request.
    InvalidParameter { name: String },
    /// The request exceeded the configured connect or total timeout.
    Timeout,
    /// Transport failure below HTTP, such as a refused connection.
    Network,
}

impl ErrorKind {
    /// Stable name for adapters that render the kind verbatim.
    pub fn tag(&self) -> &'static str {
        match self {
            ErrorKind::NotAuthenticated => "not_authenticated",
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::InvalidResponse => "invalid_response",
            ErrorKind::HttpError(_) => "http_error",
            ErrorKind::SecurityChallenge => "security_challenge",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::RecordNotFound => "record_not_found",
            ErrorKind::InvalidUrn { .. } => "invalid_urn",
            ErrorKind::VisionUnavailable => "vision_unavailable",
            ErrorKind::InvalidParameter { .. } => "invalid_parameter",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Network => "network",
        }
    }

    /// Read failures the vision path may recover from.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(
            self,
            ErrorKind::NotAuthenticated
                | ErrorKind::InvalidResponse
                | ErrorKind::HttpError(_)
                | ErrorKind::SecurityChallenge
                | ErrorKind::ParseError
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotAuthenticated => write!(f, "not authenticated"),
            ErrorKind::InvalidIdentifier => write!(f, "invalid identifier"),
            ErrorKind::InvalidResponse => write!(f, "invalid response"),
            ErrorKind::HttpError(code) => write!(f, "http error {code}"),
            ErrorKind::SecurityChallenge => write!(f, "security challenge"),
            ErrorKind::ParseError => write!(f, "parse error"),
            ErrorKind::RateLimited => write!(f, "rate limited"),
            ErrorKind::RecordNotFound => write!(f, "record not found"),
            ErrorKind::InvalidUrn { value } => write!(f, "invalid urn {value:?}"),
            ErrorKind::VisionUnavailable => write!(f, "vision unavailable"),
            ErrorKind::InvalidParameter { name } => write!(f, "invalid parameter {name}"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Network => write!(f, "network error"),
        }
    }
}

/// A classified failure plus a human-readable detail.
///
/// Callers branch on `kind`; `message` is for logs and adapters only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ScoutError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ScoutError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, message)
    }

    /// A [`ErrorKind::ParseError`] with `reason` as the message.
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, reason)
    }

    /// Quotes `input` in the message so blank input is visible in logs.
    pub fn invalid_identifier(input: &str) -> Self {
        Self::new(
            ErrorKind::InvalidIdentifier,
            format!("cannot extract an identifier from {input:?}"),
        )
    }

    /// `name` is the argument that failed; `reason` says how.
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidParameter {
                name: name.to_string(),
            },
            reason,
        )
    }

    pub fn vision_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::VisionUnavailable, message)
    }

    /// See [`ErrorKind::is_fallback_eligible`].
    pub fn is_fallback_eligible(&self) -> bool {
        self.kind.is_fallback_eligible()
    }
}
