use db::models::tickets::TicketStatus;
use util::config::AppConfig;

use crate::error::ServiceError;

/// Which status changes `update_ticket` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// `new -> assigned -> in_progress -> resolved -> closed`, plus reopening
    /// `resolved -> in_progress`.
    Strict,
}

impl TransitionPolicy {
    pub fn from_config() -> Self {
        if AppConfig::global().strict_status_transitions {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        }
    }

    pub fn allows(self, from: TicketStatus, to: TicketStatus) -> bool {
        use TicketStatus::*;

        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (New, Assigned)
                    | (Assigned, InProgress)
                    | (InProgress, Resolved)
                    | (Resolved, Closed)
                    | (Resolved, InProgress)
            ),
        }
    }

    pub fn check(self, from: TicketStatus, to: TicketStatus) -> Result<(), ServiceError> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(ServiceError::validation(format!(
                "Cannot change status from '{from}' to '{to}'"
            )))
        }
    }
}
