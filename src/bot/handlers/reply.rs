use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::{HandlerResult, PlannerDialogue};
use crate::bot::conversation::{Reply, State, Transition};
use crate::database::{connection::DatabaseManager, models::Event};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_database_error, log_system_event};

pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> HandlerResult {
    for reply in replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, text).await?;
            }
            Reply::Markdown(text) => {
                bot.send_message(chat_id, text)
                    .parse_mode(ParseMode::MarkdownV2)
                    .await?;
            }
            Reply::Menu { text, markup } => {
                bot.send_message(chat_id, text).reply_markup(markup).await?;
            }
            Reply::Notice(kind, text) => {
                CommandFeedback::new(bot.clone(), chat_id).send(kind, &text).await?;
            }
        }
    }
    Ok(())
}

/// Stores the confirmed event if there is one, moves the dialogue to the
/// next state and sends the replies.
///
/// A storage failure aborts before the state changes, so the user can
/// confirm again.
pub async fn apply_transition(
    bot: &Bot,
    dialogue: &PlannerDialogue,
    transition: Transition,
    db: &DatabaseManager,
) -> HandlerResult {
    let Transition { next, replies, save } = transition;
    let chat_id = dialogue.chat_id();

    if let Some(event) = save {
        let stored = Event::create(&db.pool, &event).await.map_err(|e| {
            log_database_error("INSERT", "single", &e.to_string());
            e
        })?;
        log_system_event(
            "Event saved",
            Some(&format!("id={} '{}' in chat {}", stored.id, stored.name, chat_id.0)),
        );
    }

    match next {
        State::Idle => dialogue.exit().await?,
        next => dialogue.update(next).await?,
    }

    send_replies(bot, chat_id, replies).await
}
