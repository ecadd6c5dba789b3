//! The event creation dialogue.
//!
//! A conversation moves `Idle -> Menu -> Confirm -> Idle`. While in `Menu`
//! the user taps a field button, sends its value, and repeats until tapping
//! "Done". `Confirm` shows the summary and waits for a yes.
//!
//! Transitions are pure: they take the current [`State`] and an input and
//! return a [`Transition`] naming the next state, the replies to send and,
//! when the user confirmed, the event to store. The chat handlers apply it.

pub mod draft;
pub mod fields;
pub mod menu;

use chrono::NaiveDate;
use teloxide::types::InlineKeyboardMarkup;

use crate::utils::feedback::FeedbackType;
use crate::utils::logging::log_validation_error;
use crate::utils::validation::{validate_and_format_event, ValidatedEvent};
use draft::{EventDraft, FieldKind};
use menu::{field_menu, DONE_KEY};

pub const MENU_PROMPT: &str = "Select a field to fill it";
pub const CONFIRM_PROMPT: &str =
    "This is the created event. To confirm send yes, to keep editing send anything else";
pub const NO_FIELD_SELECTED: &str = "No field selected";
pub const EVENT_SAVED: &str = "Event saved";
pub const NOT_UNDERSTOOD: &str = "I do not understand this message";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum State {
    #[default]
    Idle,
    Menu {
        draft: EventDraft,
    },
    Confirm {
        draft: EventDraft,
        event: ValidatedEvent,
    },
}

/// Something to send back to the chat.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    /// Pre-escaped MarkdownV2.
    Markdown(String),
    Menu {
        text: String,
        markup: InlineKeyboardMarkup,
    },
    Notice(FeedbackType, String),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub next: State,
    pub replies: Vec<Reply>,
    /// Set when the user confirmed; must be stored before `next` applies.
    pub save: Option<ValidatedEvent>,
}

impl Transition {
    fn to(next: State, replies: Vec<Reply>) -> Self {
        Self { next, replies, save: None }
    }
}

fn menu_reply(draft: &EventDraft) -> Reply {
    Reply::Menu {
        text: MENU_PROMPT.to_string(),
        markup: field_menu(draft),
    }
}

/// True for `y` or `yes` in any letter case.
pub fn is_confirmation(text: &str) -> bool {
    text.eq_ignore_ascii_case("y") || text.eq_ignore_ascii_case("yes")
}

impl State {
    pub fn is_active(&self) -> bool {
        !matches!(self, State::Idle)
    }

    /// Starts a fresh conversation, whatever the current state.
    ///
    /// `args` may pre-fill `[<date>] [<start_time>] [<end_time>]`; the date
    /// is used for both start and end. Arguments that do not parse are
    /// reported and skipped.
    pub fn start(args: &str, today: NaiveDate) -> Transition {
        let mut draft = EventDraft::default();
        let mut replies = Vec::new();

        let slots = [FieldKind::StartDate, FieldKind::StartTime, FieldKind::EndTime];
        let mut tokens = args.split_whitespace();
        for (kind, token) in slots.into_iter().zip(tokens.by_ref()) {
            match kind.parse(token, today) {
                Ok(value) => {
                    if kind == FieldKind::StartDate {
                        draft.set(FieldKind::EndDate, value.clone());
                    }
                    draft.set(kind, value);
                }
                Err(e) => replies.push(Reply::Notice(
                    FeedbackType::Warning,
                    format!("Skipping {} '{}': {}", kind.label().to_lowercase(), token, e),
                )),
            }
        }
        let extra: Vec<&str> = tokens.collect();
        if !extra.is_empty() {
            replies.push(Reply::Notice(
                FeedbackType::Warning,
                format!("Ignoring extra arguments: {}", extra.join(" ")),
            ));
        }

        replies.push(menu_reply(&draft));
        Transition::to(State::Menu { draft }, replies)
    }

    /// Handles a menu button press.
    pub fn on_button(self, data: &str, today: NaiveDate) -> Transition {
        match self {
            State::Menu { mut draft } => {
                if data == DONE_KEY {
                    return match validate_and_format_event(&mut draft, today) {
                        Ok(event) => {
                            let replies = vec![
                                Reply::Markdown(event.summary()),
                                Reply::Text(CONFIRM_PROMPT.to_string()),
                            ];
                            Transition::to(State::Confirm { draft, event }, replies)
                        }
                        Err(e) => {
                            log_validation_error("event", "draft", &e.to_string());
                            Transition::to(
                                State::Menu { draft },
                                vec![Reply::Notice(FeedbackType::Error, e.to_string())],
                            )
                        }
                    };
                }

                match FieldKind::from_key(data) {
                    Some(kind) => {
                        draft.pending = Some(kind);
                        let prompt = format!("Enter {}", kind.label().to_lowercase());
                        Transition::to(State::Menu { draft }, vec![Reply::Text(prompt)])
                    }
                    None => Transition::to(
                        State::Menu { draft },
                        vec![Reply::Notice(FeedbackType::Error, "Unknown field".to_string())],
                    ),
                }
            }
            State::Confirm { .. } => {
                let notice = "Send yes to save the event, or anything else to keep editing";
                Transition::to(self, vec![Reply::Notice(FeedbackType::Info, notice.to_string())])
            }
            State::Idle => {
                let notice = "This menu is no longer active. Use /single to create an event";
                Transition::to(self, vec![Reply::Notice(FeedbackType::Info, notice.to_string())])
            }
        }
    }

    /// Handles a plain text message.
    pub fn on_text(self, text: &str, today: NaiveDate) -> Transition {
        match self {
            State::Menu { mut draft } => {
                let Some(kind) = draft.pending else {
                    return Transition::to(
                        State::Menu { draft },
                        vec![Reply::Notice(FeedbackType::Warning, NO_FIELD_SELECTED.to_string())],
                    );
                };
                match kind.parse(text, today) {
                    Ok(value) => {
                        draft.set(kind, value);
                        draft.pending = None;
                        let replies = vec![menu_reply(&draft)];
                        Transition::to(State::Menu { draft }, replies)
                    }
                    Err(e) => {
                        log_validation_error(kind.label(), text, &e.to_string());
                        Transition::to(
                            State::Menu { draft },
                            vec![Reply::Notice(FeedbackType::Error, e.to_string())],
                        )
                    }
                }
            }
            State::Confirm { draft, event } => {
                if is_confirmation(text) {
                    Transition {
                        next: State::Idle,
                        replies: vec![Reply::Notice(FeedbackType::Success, EVENT_SAVED.to_string())],
                        save: Some(event),
                    }
                } else {
                    let replies = vec![menu_reply(&draft)];
                    Transition::to(State::Menu { draft }, replies)
                }
            }
            State::Idle => Transition::to(
                State::Idle,
                vec![Reply::Notice(FeedbackType::Info, NOT_UNDERSTOOD.to_string())],
            ),
        }
    }

    /// Abandons the conversation without saving.
    pub fn on_cancel(self) -> Transition {
        let notice = if self.is_active() {
            Reply::Notice(FeedbackType::Info, "Event creation cancelled".to_string())
        } else {
            Reply::Notice(FeedbackType::Info, "Nothing to cancel".to_string())
        };
        Transition::to(State::Idle, vec![notice])
    }
}
