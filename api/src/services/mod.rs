//! Outbound integrations: SMTP mail and Google reCAPTCHA.

pub mod email;
pub mod recaptcha;
