//! Fixed error-code → human-readable message table for auth failures.
//!
//! Shown verbatim in the error alert. Unmapped codes fall back to the raw
//! error message when there is one.

use super::AuthError;

pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// The subtitle text for a failed sign-in / registration alert.
pub fn friendly_auth_message(err: &AuthError) -> String {
    match err {
        AuthError::WrongPassword => {
            "The password you entered is incorrect. Please try again.".to_string()
        }
        AuthError::UserNotFound => {
            "No account found with this email. Please check or register.".to_string()
        }
        AuthError::InvalidEmail => {
            "The email address looks invalid. Please check and try again.".to_string()
        }
        AuthError::UserDisabled => {
            "This account has been disabled. Please contact support.".to_string()
        }
        AuthError::EmailInUse => {
            "That email is already registered. Try signing in instead.".to_string()
        }
        AuthError::WeakPassword => {
            "Your password is too weak. Use at least 6 characters.".to_string()
        }
        AuthError::TooManyRequests => {
            "Too many attempts. Please wait a moment and try again.".to_string()
        }
        AuthError::Network(_) => {
            "Network error. Please check your internet connection.".to_string()
        }
        AuthError::Other { message, .. } => {
            if message.is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                message.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_codes_get_fixed_text() {
        assert_eq!(
            friendly_auth_message(&AuthError::WrongPassword),
            "The password you entered is incorrect. Please try again."
        );
        assert_eq!(
            friendly_auth_message(&AuthError::Network("timed out".into())),
            "Network error. Please check your internet connection."
        );
    }

    #[test]
    fn unmapped_falls_back_to_raw_then_generic() {
        let raw = AuthError::Other {
            code: "auth/odd".into(),
            message: "odd failure".into(),
        };
        assert_eq!(friendly_auth_message(&raw), "odd failure");

        let blank = AuthError::Other {
            code: "auth/odd".into(),
            message: String::new(),
        };
        assert_eq!(friendly_auth_message(&blank), FALLBACK_MESSAGE);
    }
}
