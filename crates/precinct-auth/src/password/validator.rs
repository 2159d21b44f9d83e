//! Password policy for new passwords.

use precinct_core::config::AuthConfig;
use precinct_core::error::AppError;

/// Checks new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    enforce_strength: bool,
}

impl PasswordValidator {
    /// Build the validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            enforce_strength: config.enforce_password_strength,
        }
    }

    /// Validate a new password. `user_inputs` (officer id, name) are
    /// penalised by the strength estimate.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !self.enforce_strength {
            return Ok(());
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less predictable password.",
            ));
        }
        Ok(())
    }

    /// Reject a new password identical to the current one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        let err = validator.validate("abc", &[]).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_weak_password_rejected_when_enforced() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("password", &[]).is_err());
        assert!(validator.validate("correct-Horse-battery-staple-42", &[]).is_ok());
    }

    #[test]
    fn test_strength_check_can_be_disabled() {
        let config = AuthConfig {
            enforce_password_strength: false,
            ..AuthConfig::default()
        };
        assert!(PasswordValidator::new(&config).validate("password", &[]).is_ok());
    }
}
