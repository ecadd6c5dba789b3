use teloxide::prelude::*;
use teloxide::types::UserId;

use crate::bot::handlers::HandlerError;
use crate::database::{connection::DatabaseManager, models::User};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_database_error, log_unauthorized};

/// Telegram user id of a message sender, as stored in the database.
pub fn sender_id(msg: &Message) -> Option<i64> {
    msg.from().and_then(|user| storage_user_id(user.id))
}

/// `None` for ids that do not fit the signed `user.id` column.
pub fn storage_user_id(id: UserId) -> Option<i64> {
    i64::try_from(id.0).ok()
}

/// Checks that the sender of `msg` may use the bot.
///
/// Unknown senders are recorded as unauthorized. Senders who are not
/// authorized are told so and `false` is returned.
pub async fn ensure_authorized(
    bot: &Bot,
    msg: &Message,
    db: &DatabaseManager,
    command: &str,
) -> Result<bool, HandlerError> {
    let chat_id = msg.chat.id;
    let Some(user_id) = sender_id(msg) else {
        return Ok(false);
    };

    let authorized = User::is_authorized(&db.pool, user_id).await.map_err(|e| {
        log_database_error("SELECT", "user", &e.to_string());
        e
    })?;
    if authorized {
        return Ok(true);
    }

    User::register(&db.pool, user_id).await?;
    log_unauthorized(command, user_id, chat_id.0);
    CommandFeedback::new(bot.clone(), chat_id)
        .validation_error(
            "You are not authorized to use this bot",
            &format!("Ask an administrator to authorize your user id {user_id}"),
        )
        .await?;
    Ok(false)
}
