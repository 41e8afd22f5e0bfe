//! Client-side checks run before any request is built.
//!
//! Messages are shown to the user verbatim.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Shortest accepted new password, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Most photos a listing may carry.
pub const MAX_PHOTOS: usize = 5;
/// Largest accepted photo, in bytes.
pub const MAX_PHOTO_BYTES: usize = 1024 * 1024;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Input rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    /// Rejection carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Text to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

type Checked<T = ()> = Result<T, ValidationError>;

/// Every value must contain something other than whitespace.
///
/// # Errors
/// Returns `message` when any value is blank.
pub fn require_filled(values: &[&str], message: &str) -> Checked {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

/// Email addresses need a local part, a host and a dot in the host.
///
/// # Errors
/// Returns an error when the address is blank or malformed.
pub fn email(value: &str) -> Checked {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new("Please enter your email address"));
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::new("Please enter a valid email address"));
    }
    Ok(())
}

/// Length check for a password being set.
///
/// # Errors
/// Returns an error when the password is shorter than [`MIN_PASSWORD_LEN`].
pub fn new_password(value: &str) -> Checked {
    if value.is_empty() {
        return Err(ValidationError::new("Please enter a new password"));
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "Password must be at least 8 characters long",
        ));
    }
    Ok(())
}

/// Checks for the signed-in password change form.
///
/// # Errors
/// Returns an error when a field is blank, the new password is too short, or
/// the confirmation does not match.
pub fn password_change(current: &str, new: &str, confirm: &str) -> Checked {
    require_filled(&[current, new, confirm], "Please fill in all fields")?;
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "New password must be at least 8 characters long",
        ));
    }
    if new != confirm {
        return Err(ValidationError::new("New passwords do not match"));
    }
    Ok(())
}

/// A strictly positive, finite amount.
///
/// # Errors
/// Returns `message` otherwise.
pub fn positive_amount(value: f64, message: &str) -> Checked<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(message))
    }
}

/// A listing needs between one and [`MAX_PHOTOS`] photos.
///
/// # Errors
/// Returns an error when no photo or more than [`MAX_PHOTOS`] are given.
pub fn photo_count(count: usize) -> Checked {
    if count == 0 {
        return Err(ValidationError::new(
            "Please add at least one photo of your car.",
        ));
    }
    if count > MAX_PHOTOS {
        return Err(ValidationError::new(format!(
            "You can only upload up to {MAX_PHOTOS} photos."
        )));
    }
    Ok(())
}

/// Accepts JPEG and PNG files up to [`MAX_PHOTO_BYTES`] and returns the MIME
/// type to upload them with.
///
/// # Errors
/// Returns an error for other file types or oversized files.
pub fn photo(file_name: &str, size: usize) -> Checked<&'static str> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let content_type = match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => return Err(ValidationError::new("Please select JPEG, PNG images only")),
    };
    if size > MAX_PHOTO_BYTES {
        return Err(ValidationError::new("Each image must be less than 1MB"));
    }
    Ok(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_filled(&["a", "b"], "Please fill in all fields").is_ok());
        let err = require_filled(&["a", "  "], "Please fill in all fields").unwrap_err();
        assert_eq!(err.message(), "Please fill in all fields");
    }

    #[test]
    fn email_shape() {
        assert!(email("buyer@automart.ng").is_ok());
        assert_eq!(
            email("").unwrap_err().message(),
            "Please enter your email address"
        );
        for bad in ["buyer", "buyer@host", "a b@c.d", "@c.d"] {
            assert_eq!(
                email(bad).unwrap_err().message(),
                "Please enter a valid email address",
                "{bad}"
            );
        }
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(new_password("12345678").is_ok());
        assert!(new_password("ñññññññ").is_err());
        assert!(new_password("").is_err());
    }

    #[test]
    fn password_change_rules() {
        assert!(password_change("old", "new-secret", "new-secret").is_ok());
        assert_eq!(
            password_change("", "new-secret", "new-secret")
                .unwrap_err()
                .message(),
            "Please fill in all fields"
        );
        assert_eq!(
            password_change("old", "short", "short")
                .unwrap_err()
                .message(),
            "New password must be at least 8 characters long"
        );
        assert_eq!(
            password_change("old", "new-secret", "new-secrets")
                .unwrap_err()
                .message(),
            "New passwords do not match"
        );
    }

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(positive_amount(10.0, "bad"), Ok(10.0));
        assert!(positive_amount(0.0, "bad").is_err());
        assert!(positive_amount(-3.0, "bad").is_err());
        assert!(positive_amount(f64::NAN, "bad").is_err());
    }

    #[test]
    fn photo_rules() {
        assert_eq!(photo("front.JPG", 10), Ok("image/jpeg"));
        assert_eq!(photo("side.png", MAX_PHOTO_BYTES), Ok("image/png"));
        assert!(photo("clip.gif", 10).is_err());
        assert!(photo("noext", 10).is_err());
        assert_eq!(
            photo("huge.jpeg", MAX_PHOTO_BYTES + 1).unwrap_err().message(),
            "Each image must be less than 1MB"
        );
    }

    #[test]
    fn photo_count_bounds() {
        assert!(photo_count(0).is_err());
        assert!(photo_count(1).is_ok());
        assert!(photo_count(MAX_PHOTOS).is_ok());
        assert_eq!(
            photo_count(MAX_PHOTOS + 1).unwrap_err().message(),
            "You can only upload up to 5 photos."
        );
    }
}
