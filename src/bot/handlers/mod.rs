pub mod callback;
pub mod general_message;
pub mod message;
pub mod reply;

use std::sync::Arc;
use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateHandler,
    },
    prelude::*,
};
use crate::bot::commands::Command;
use crate::bot::conversation::State;
use crate::database::connection::DatabaseManager;
use crate::services::help_texts::HelpTexts;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Per-chat conversation state, kept in memory.
pub type PlannerDialogue = Dialogue<State, InMemStorage<State>>;

pub struct BotHandler {
    pub db: DatabaseManager,
    pub help: Arc<HelpTexts>,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, help: Arc<HelpTexts>) -> Self {
        Self { db, help }
    }

    /// Commands are routed first and work in every state. Button presses
    /// and plain text are interpreted according to the chat's state.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let db = self.db.clone();
        let help = self.help.clone();
        let db_callback = self.db.clone();
        let db_text = self.db.clone();

        dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(
                        move |bot: Bot, msg: Message, cmd: Command, dialogue: PlannerDialogue, state: State| {
                            let db = db.clone();
                            let help = help.clone();
                            async move {
                                message::command_handler(bot, msg, cmd, dialogue, state, db, help).await
                            }
                        },
                    ),
            )
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, q: CallbackQuery, dialogue: PlannerDialogue, state: State| {
                    let db = db_callback.clone();
                    async move { callback::callback_handler(bot, q, dialogue, state, db).await }
                },
            ))
            .branch(Update::filter_message().endpoint(
                move |bot: Bot, msg: Message, dialogue: PlannerDialogue, state: State| {
                    let db = db_text.clone();
                    async move { general_message::text_handler(bot, msg, dialogue, state, db).await }
                },
            ))
    }
}
