use annalist_application::{ChangeLogService, SystemLogService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Change-log reads and lifecycle actions.
    pub change_log_service: ChangeLogService,
    /// System-log reads and lifecycle actions.
    pub system_log_service: SystemLogService,
}
