//! Server-side verification of reCAPTCHA v3 tokens.

use serde::Deserialize;

const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Lowest score accepted as human.
pub const MIN_SCORE: f64 = 0.5;

#[derive(Debug, Deserialize)]
pub struct SiteverifyResponse {
    pub success: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl SiteverifyResponse {
    pub fn is_human(&self) -> bool {
        self.success && self.score.unwrap_or(0.0) >= MIN_SCORE
    }
}

pub struct RecaptchaService;

impl RecaptchaService {
    pub async fn verify(secret: &str, token: &str) -> Result<bool, reqwest::Error> {
        let response: SiteverifyResponse = reqwest::Client::new()
            .post(SITEVERIFY_URL)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.error_codes.is_empty() {
            tracing::warn!(codes = ?response.error_codes, "reCAPTCHA verification reported errors");
        }
        Ok(response.is_human())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SiteverifyResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn score_threshold_is_inclusive() {
        assert!(parse(r#"{"success": true, "score": 0.5}"#).is_human());
        assert!(!parse(r#"{"success": true, "score": 0.49}"#).is_human());
    }

    #[test]
    fn failed_or_scoreless_responses_are_rejected() {
        assert!(!parse(r#"{"success": false, "score": 0.9}"#).is_human());
        assert!(!parse(r#"{"success": true}"#).is_human());
        let errored = parse(r#"{"success": false, "error-codes": ["invalid-input-response"]}"#);
        assert_eq!(errored.error_codes, vec!["invalid-input-response"]);
    }
}
