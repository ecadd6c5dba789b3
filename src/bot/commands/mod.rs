pub mod help;
pub mod query;
pub mod start;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Planner Bot commands:")]
pub enum Command {
    #[command(description = "Register with the bot")]
    Start,
    #[command(description = "Show help, optionally for one command")]
    Help { topic: String },
    #[command(description = "Create a new event: [<date>] [<start_time>] [<end_time>]")]
    Single { args: String },
    #[command(description = "List today's events")]
    Today,
    #[command(description = "List tomorrow's events")]
    Tomorrow,
    #[command(description = "List events on a date: <date> [<start_time>] [<end_time>]")]
    Info { args: String },
    #[command(description = "Abandon the event being created")]
    Cancel,
}

impl Command {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help { .. } => "/help",
            Command::Single { .. } => "/single",
            Command::Today => "/today",
            Command::Tomorrow => "/tomorrow",
            Command::Info { .. } => "/info",
            Command::Cancel => "/cancel",
        }
    }
}
