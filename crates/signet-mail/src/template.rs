//! Verification email template.

/// Subject line for verification mails.
pub const SUBJECT: &str = "Account verification";

/// Render the HTML body of a verification mail.
pub fn verification_body(display_name: &str, code: &str, ttl_minutes: u64) -> String {
    format!(
        "<p>Dear {display_name},</p>\
         <p>Thank you for registering. Please use the following \
         verification code to activate your account:</p>\
         <h3>{code}</h3>\
         <p>This code will expire in {ttl_minutes} minutes.</p>\
         <br>\
         <p>Best regards,<br>The Team</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_contains_name_and_code() {
        let body = verification_body("Alice", "123456", 60);
        assert!(body.contains("Dear Alice,"));
        assert!(body.contains("<h3>123456</h3>"));
    }

    #[test]
    fn body_states_the_expiry_window() {
        let body = verification_body("Alice", "123456", 60);
        assert!(body.contains("expire in 60 minutes"));
    }
}
