use std::str::FromStr;
use validator::{ValidationError, ValidationErrors};

use crate::error::ServiceError;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Parses an optional wire value into one of the model enums.
pub fn parse_enum<T: FromStr>(value: Option<&str>, field: &str) -> Result<Option<T>, ServiceError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ServiceError::validation(format!("Invalid {field} value '{raw}'"))),
    }
}

/// Case-insensitive check that `email` belongs to `domain`.
pub fn has_domain(email: &str, domain: &str) -> bool {
    email
        .trim()
        .rsplit_once('@')
        .map(|(local, host)| !local.is_empty() && host.eq_ignore_ascii_case(domain))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::tickets::TicketStatus;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank(" x ").is_ok());
    }

    #[test]
    fn enum_parsing_reports_the_field() {
        let ok: Option<TicketStatus> = parse_enum(Some("resolved"), "status").unwrap();
        assert_eq!(ok, Some(TicketStatus::Resolved));

        let none: Option<TicketStatus> = parse_enum(None, "status").unwrap();
        assert_eq!(none, None);

        let err = parse_enum::<TicketStatus>(Some("reopened"), "status").unwrap_err();
        assert_eq!(err.to_string(), "Invalid status value 'reopened'");
    }

    #[test]
    fn institutional_domain() {
        assert!(has_domain("ana@unison.mx", "unison.mx"));
        assert!(has_domain("Ana@UNISON.MX", "unison.mx"));
        assert!(!has_domain("ana@gmail.com", "unison.mx"));
        assert!(!has_domain("ana@mail.unison.mx", "unison.mx"));
        assert!(!has_domain("@unison.mx", "unison.mx"));
    }
}
