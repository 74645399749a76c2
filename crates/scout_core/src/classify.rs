//! Shared response classification for reads and writes.
//!
//! Path checks run before status checks: a login wall served with 200 is still
//! a login wall.
use crate::{ErrorKind, ScoutError};

/// Classifies a document response by its resolved path and status.
pub fn classify_read(resolved_path: &str, status: u16) -> Result<(), ScoutError> {
    classify_location(resolved_path)?;
    if status != 200 {
        return Err(ScoutError::new(
            ErrorKind::HttpError(status),
            format!("unexpected status {status} for {resolved_path}"),
        ));
    }
    Ok(())
}

/// Classifies a write-API response; any 2xx is success.
pub fn classify_write(resolved_path: &str, status: u16) -> Result<(), ScoutError> {
    classify_location(resolved_path)?;
    if status == 429 {
        return Err(ScoutError::new(
            ErrorKind::RateLimited,
            "write rejected by platform rate limit",
        ));
    }
    if !(200..300).contains(&status) {
        return Err(ScoutError::new(
            ErrorKind::HttpError(status),
            format!("write failed with status {status}"),
        ));
    }
    Ok(())
}

fn classify_location(resolved_path: &str) -> Result<(), ScoutError> {
    if resolved_path.contains("login") {
        return Err(ScoutError::not_authenticated(format!(
            "redirected to {resolved_path}"
        )));
    }
    if resolved_path.contains("checkpoint") {
        return Err(ScoutError::new(
            ErrorKind::SecurityChallenge,
            format!("redirected to {resolved_path}"),
        ));
    }
    Ok(())
}
