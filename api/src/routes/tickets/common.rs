use services::ticket_service::TicketService;
use util::state::AppState;

/// Engine bound to the request's pool, with the configured transition policy.
pub fn ticket_service(app_state: &AppState) -> TicketService {
    TicketService::from_config(app_state.db_clone())
}
