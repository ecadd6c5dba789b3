use std::sync::Arc;
use teloxide::prelude::*;

use super::reply::apply_transition;
use super::{HandlerResult, PlannerDialogue};
use crate::bot::access::{ensure_authorized, sender_id};
use crate::bot::commands::{help, query, start, Command};
use crate::bot::conversation::State;
use crate::database::{connection::DatabaseManager, models::QueryWindow};
use crate::services::help_texts::HelpTexts;
use crate::utils::datetime::today;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_validation_error};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: PlannerDialogue,
    state: State,
    db: DatabaseManager,
    help_texts: Arc<HelpTexts>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let user_id = sender_id(&msg).unwrap_or(0);
    log_command_start(cmd.name(), user_id, chat_id.0, None);

    match cmd {
        Command::Start => {
            start::handle_start(bot, msg, &db, &help_texts).await?;
        }
        Command::Help { topic } => {
            help::handle_help(bot, msg, &topic, &help_texts).await?;
        }
        Command::Cancel => {
            apply_transition(&bot, &dialogue, state.on_cancel(), &db).await?;
        }
        Command::Single { args } => {
            if !ensure_authorized(&bot, &msg, &db, "/single").await? {
                return Ok(());
            }
            if state.is_active() {
                tracing::debug!("Restarting event creation in chat {}", chat_id.0);
            }
            let transition = State::start(&args, today());
            apply_transition(&bot, &dialogue, transition, &db).await?;
        }
        Command::Today | Command::Tomorrow => {
            let name = cmd.name();
            if !ensure_authorized(&bot, &msg, &db, name).await? {
                return Ok(());
            }
            let keyword = name.trim_start_matches('/');
            if let Some(day) = query::resolve_day_keyword(keyword, today()) {
                query::handle_window_query(&bot, chat_id, &QueryWindow::full_day(day), &db).await?;
            }
        }
        Command::Info { args } => {
            if !ensure_authorized(&bot, &msg, &db, "/info").await? {
                return Ok(());
            }
            match query::parse_info_args(&args, today()) {
                Ok(window) => query::handle_window_query(&bot, chat_id, &window, &db).await?,
                Err(e) => {
                    log_validation_error("/info", &args, &e);
                    CommandFeedback::new(bot.clone(), chat_id)
                        .validation_error(&e, "Use /info <date> [<start_time>] [<end_time>], e.g. /info 5.3 9 17")
                        .await?;
                }
            }
        }
    }
    Ok(())
}
