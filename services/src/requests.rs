//! Request bodies as they arrive over the wire, and the typed inputs the
//! services accept. Each `TryFrom` runs the derive validators first, then
//! parses enum fields, so a service never sees an unchecked value.

use db::models::{
    reports::{ReportStatus, ReportType},
    tickets::{TicketFilter, TicketPriority, TicketStatus},
    user::{Role, Theme},
};
use serde::Deserialize;
use util::config::AppConfig;
use validator::Validate;

use crate::error::ServiceError;
use crate::validation::{has_domain, parse_enum};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

// --- Tickets ---

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTicketRequest {
    #[validate(
        custom(function = "crate::validation::not_blank", message = "Title is required"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Category is required"))]
    pub category: String,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: TicketPriority,
}

impl TryFrom<CreateTicketRequest> for CreateTicket {
    type Error = ServiceError;

    fn try_from(req: CreateTicketRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        let priority = parse_enum(req.priority.as_deref(), "priority")?.unwrap_or_default();
        Ok(Self {
            title: req.title.trim().to_owned(),
            description: req.description.trim().to_owned(),
            category: req.category.trim().to_owned(),
            priority,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<i64>,
}

/// PATCH input: `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTicket {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee_id: Option<i64>,
}

impl TryFrom<UpdateTicketRequest> for UpdateTicket {
    type Error = ServiceError;

    fn try_from(req: UpdateTicketRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_enum(req.status.as_deref(), "status")?,
            priority: parse_enum(req.priority.as_deref(), "priority")?,
            assignee_id: req.assignee_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCommentRequest {
    #[validate(custom(function = "crate::validation::not_blank", message = "Comment content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateComment {
    pub content: String,
}

impl TryFrom<CreateCommentRequest> for CreateComment {
    type Error = ServiceError;

    fn try_from(req: CreateCommentRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(Self {
            content: req.content.trim().to_owned(),
        })
    }
}

/// Query string of `GET /tickets`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Page is at least 1; limit falls in `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl TicketListQuery {
    pub fn into_parts(self) -> Result<(TicketFilter, Pagination), ServiceError> {
        let filter = TicketFilter {
            status: parse_enum(self.status.as_deref(), "status")?,
            priority: parse_enum(self.priority.as_deref(), "priority")?,
            category: self.category.filter(|c| !c.trim().is_empty()),
            search: self.search.filter(|s| !s.trim().is_empty()),
        };
        Ok((filter, Pagination::new(self.page, self.limit)))
    }
}

// --- Accounts ---

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::validation::not_blank", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl TryFrom<RegisterRequest> for RegisterUser {
    type Error = ServiceError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        let domain = AppConfig::global().institution_email_domain.clone();
        if !has_domain(&req.email, &domain) {
            return Err(ServiceError::validation(format!(
                "Email must be an institutional address (@{domain})"
            )));
        }

        let role = parse_enum(Some(&req.role), "role")?
            .ok_or_else(|| ServiceError::validation("Role is required"))?;

        Ok(Self {
            first_name: req.first_name.trim().to_owned(),
            last_name: req.last_name.trim().to_owned(),
            email: req.email.trim().to_lowercase(),
            password: req.password,
            role,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeRequest {
    pub theme: String,
}

impl TryFrom<ThemeRequest> for Theme {
    type Error = ServiceError;

    fn try_from(req: ThemeRequest) -> Result<Self, Self::Error> {
        parse_enum(Some(&req.theme), "theme")?.ok_or_else(|| ServiceError::validation("Theme is required"))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

// --- Notifications ---

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub id: i64,
}

// --- Feedback reports ---

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateReportRequest {
    #[validate(custom(function = "crate::validation::not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub report_type: ReportType,
}

impl TryFrom<CreateReportRequest> for CreateReport {
    type Error = ServiceError;

    fn try_from(req: CreateReportRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        let report_type = parse_enum(Some(&req.report_type), "type")?
            .ok_or_else(|| ServiceError::validation("Report type is required"))?;
        Ok(Self {
            title: req.title.trim().to_owned(),
            description: req.description.trim().to_owned(),
            report_type,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateReportRequest {
    pub status: Option<String>,
}

impl UpdateReportRequest {
    pub fn parse_status(&self) -> Result<Option<ReportStatus>, ServiceError> {
        parse_enum(self.status.as_deref(), "status")
    }
}
