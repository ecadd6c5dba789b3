use teloxide::prelude::*;

use crate::bot::handlers::HandlerResult;
use crate::services::help_texts::HelpTexts;
use crate::utils::feedback::CommandFeedback;

pub const UNKNOWN_TOPIC: &str = "This command does not exist";

/// Picks the text `/help <topic>` answers with.
pub fn help_reply<'a>(help: &'a HelpTexts, topic: &str) -> Result<&'a str, &'static str> {
    let topic = topic.split_whitespace().next().unwrap_or("");
    if topic.is_empty() {
        return Ok(help.global());
    }
    help.get(topic).ok_or(UNKNOWN_TOPIC)
}

pub async fn handle_help(bot: Bot, msg: Message, topic: &str, help: &HelpTexts) -> HandlerResult {
    match help_reply(help, topic) {
        Ok(text) => {
            bot.send_message(msg.chat.id, text).await?;
        }
        Err(unknown) => {
            CommandFeedback::new(bot, msg.chat.id)
                .validation_error(unknown, "Send /help to see all commands")
                .await?;
        }
    }
    Ok(())
}
