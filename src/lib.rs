//! # Planner Bot
//!
//! A Telegram bot for planning events through a guided, button driven menu.
//!
//! ## Features
//! - Create events field by field: name, start/end date, start/end time
//! - Flexible date and time input (`5`, `5.3`, `5/3/24`, `930`, `9:30`)
//! - Query events for today, tomorrow or any upcoming date
//! - Access limited to users authorized by an administrator
//! - Persistent storage with SQLite

/// Chat commands, conversation state machine and update handlers
pub mod bot;
/// Configuration from environment variables
pub mod config;
/// Database connection, migrations and models
pub mod database;
/// Help texts and the health check server
pub mod services;
/// Date/time normalization, validation, feedback and logging helpers
pub mod utils;
