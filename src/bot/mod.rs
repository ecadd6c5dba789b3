pub mod access;
pub mod commands;
pub mod conversation;
pub mod handlers;
