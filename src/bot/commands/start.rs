use teloxide::prelude::*;

use crate::bot::access::sender_id;
use crate::bot::handlers::HandlerResult;
use crate::database::{connection::DatabaseManager, models::User};
use crate::services::help_texts::HelpTexts;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_success, log_system_event};

pub async fn handle_start(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    help: &HelpTexts,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    if User::is_authorized(&db.pool, user_id).await? {
        bot.send_message(chat_id, "Hello!").await?;
        bot.send_message(chat_id, help.global()).await?;
        log_command_success("/start", user_id, chat_id.0, Some("greeted"));
        return Ok(());
    }

    if User::register(&db.pool, user_id).await? {
        log_system_event("New user registered", Some(&format!("id={user_id} authorized=false")));
    }

    CommandFeedback::new(bot, chat_id)
        .validation_error(
            "Hello! You are not authorized to use this bot yet",
            &format!("Ask an administrator to authorize your user id {user_id}, then send /start again"),
        )
        .await?;
    log_command_success("/start", user_id, chat_id.0, Some("unauthorized"));
    Ok(())
}
