//! Enrollment-token extraction from generated install commands.

use crate::domain::error::ProvisionError;

/// Marker preceding the enrollment token in a generated install command.
pub const AUTH_MARKER: &str = "--auth ";

/// Pull the enrollment token out of the command line returned by
/// `POST /agents/installer/`.
///
/// Everything after the first [`AUTH_MARKER`] is the token. A missing marker,
/// an empty remainder, or a remainder containing whitespace (more arguments
/// after the token) are all treated as a malformed response.
///
/// # Errors
///
/// `MalformedResponse` when the command does not have the expected shape.
pub fn extract_enrollment_token(cmd: &str) -> Result<String, ProvisionError> {
    let (_, rest) = cmd.split_once(AUTH_MARKER).ok_or_else(|| {
        ProvisionError::MalformedResponse("install command has no --auth argument".to_string())
    })?;
    let token = rest.trim();
    if token.is_empty() {
        return Err(ProvisionError::MalformedResponse(
            "install command has an empty --auth argument".to_string(),
        ));
    }
    if token.contains(char::is_whitespace) {
        return Err(ProvisionError::MalformedResponse(
            "install command has arguments after --auth".to_string(),
        ));
    }
    Ok(token.to_string())
}
