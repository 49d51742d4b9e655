//! Application services and ports.

#![forbid(unsafe_code)]

mod change_log_service;
mod log_action;
mod log_ports;
mod pagination;
mod system_log_service;

pub use change_log_service::{
    ChangeLogEntryDetail, ChangeLogPage, ChangeLogService, QueryScope,
};
pub use log_action::LogAction;
pub use log_ports::{
    ChangeLogRepository, ContentRepository, ContentTypeRegistry, EntryRange, SystemLogFilter,
    SystemLogRepository,
};
pub use pagination::{LISTING_PAGE_SIZE, PageParam, PageWindow, page_count};
pub use system_log_service::SystemLogService;
