use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by {} in chat {} - {}", command, user_id, chat_id, d),
        None => info!("CMD_START: {} by {} in chat {}", command, user_id, chat_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {} in chat {} - {}", command, user_id, chat_id, d),
        None => info!("CMD_SUCCESS: {} by {} in chat {}", command, user_id, chat_id),
    }
}

pub fn log_unauthorized(command: &str, user_id: i64, chat_id: i64) {
    warn!("UNAUTHORIZED: {} by {} in chat {}", command, user_id, chat_id);
}

/// Logs rejected user input
pub fn log_validation_error(field: &str, value: &str, error: &str) {
    warn!("VALIDATION_ERROR: {} value '{}' rejected: {}", field, value, error);
}

pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

pub fn log_database_error(operation: &str, table: &str, error: &str) {
    error!("DB_ERROR: {} on {} failed: {}", operation, table, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
