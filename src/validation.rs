use crate::error::{Error, Result};

/// Ensures the provided text is not blank.
pub fn require_text(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

/// Ensures the provided number is positive.
pub fn require_positive(number: u32, message: &str) -> Result<()> {
    if number == 0 {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

/// Ensures the provided email contains the basic `@` separator.
pub fn require_email(email: &str) -> Result<()> {
    require_text(email, "Email is required")?;
    if !email.contains('@') {
        return Err(Error::Validation("Email must contain '@'".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(require_text("  ", "name required"), Err(Error::Validation(_))));
        assert!(require_text("Ada", "name required").is_ok());
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(matches!(require_positive(0, "must be positive"), Err(Error::Validation(_))));
        assert!(require_positive(30, "must be positive").is_ok());
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(matches!(require_email("nobody"), Err(Error::Validation(_))));
        assert!(matches!(require_email(""), Err(Error::Validation(_))));
        assert!(require_email("ada@example.edu").is_ok());
    }
}
