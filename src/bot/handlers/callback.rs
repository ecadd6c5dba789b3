use teloxide::prelude::*;

use super::reply::apply_transition;
use super::{HandlerResult, PlannerDialogue};
use crate::bot::conversation::State;
use crate::database::connection::DatabaseManager;
use crate::utils::datetime::today;

/// Handles presses on the field selection menu.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: PlannerDialogue,
    state: State,
    db: DatabaseManager,
) -> HandlerResult {
    // Stops the client-side loading indicator whatever happens next.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    tracing::info!(
        "Callback received: '{}' from user {} in chat {}",
        data, q.from.id.0, dialogue.chat_id().0
    );

    let transition = state.on_button(data, today());
    apply_transition(&bot, &dialogue, transition, &db).await
}
