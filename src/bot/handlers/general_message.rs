use teloxide::prelude::*;

use super::reply::{apply_transition, send_replies};
use super::{HandlerResult, PlannerDialogue};
use crate::bot::access::ensure_authorized;
use crate::bot::commands::query::{handle_window_query, parse_day_query, DayQuery};
use crate::bot::conversation::State;
use crate::database::{connection::DatabaseManager, models::QueryWindow};
use crate::utils::datetime::today;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;

/// Handles plain text: field values and confirmations while a conversation
/// is active, day queries otherwise.
pub async fn text_handler(
    bot: Bot,
    msg: Message,
    dialogue: PlannerDialogue,
    state: State,
    db: DatabaseManager,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let today = today();

    if state.is_active() {
        let transition = state.on_text(text, today);
        return apply_transition(&bot, &dialogue, transition, &db).await;
    }

    match parse_day_query(text, today) {
        Some(query) => {
            if !ensure_authorized(&bot, &msg, &db, "date query").await? {
                return Ok(());
            }
            match query {
                DayQuery::Day(day) => {
                    handle_window_query(&bot, chat_id, &QueryWindow::full_day(day), &db).await?;
                }
                DayQuery::InvalidDate => {
                    log_validation_error("date query", text, "not an upcoming date");
                    CommandFeedback::new(bot.clone(), chat_id)
                        .validation_error(
                            "Invalid date",
                            "Send an upcoming date such as 5.3 or 5.3.2025, or today / tomorrow",
                        )
                        .await?;
                }
            }
            Ok(())
        }
        None => send_replies(&bot, chat_id, state.on_text(text, today).replies).await,
    }
}
