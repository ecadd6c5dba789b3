pub mod health;
pub mod help_texts;
