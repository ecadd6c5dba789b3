//! Help texts shown by `/start` and `/help`.
//!
//! The texts come from a plain file made of blocks separated by blank lines.
//! The first word of a block names it, so a block starting with
//! `single [<date>] ...` is shown for `/help single`. The `global` section is
//! built in and lists every command.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

pub const GLOBAL_TOPIC: &str = "global";

pub const GLOBAL_HELP: &str = "Here's what you can do:\n\
    * /start\n\
    * /help [<command>]\n\
    * /single [<date>] [<start_time>] [<end_time>]\n\
    * /info <date> [<start_time>] [<end_time>]\n\
    * /today\n\
    * /tomorrow\n\
    * /cancel\n";

/// Read-only after construction; shared between handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HelpTexts {
    sections: HashMap<String, String>,
}

impl Default for HelpTexts {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HelpTexts {
    /// Only the built-in `global` section.
    pub fn builtin() -> Self {
        let mut sections = HashMap::new();
        sections.insert(GLOBAL_TOPIC.to_string(), GLOBAL_HELP.to_string());
        Self { sections }
    }

    pub fn parse(source: &str) -> Self {
        let mut texts = Self::builtin();
        let mut current = String::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                texts.push_section(std::mem::take(&mut current));
            } else {
                current.push_str(line);
                current.push('\n');
            }
        }
        texts.push_section(current);

        texts
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read help texts from {}", path.display()))?;
        Ok(Self::parse(&source))
    }

    fn push_section(&mut self, text: String) {
        let Some(key) = text.split_whitespace().next() else {
            return;
        };
        let key = key.trim_start_matches('/').to_string();
        self.sections.insert(key, text);
    }

    pub fn global(&self) -> &str {
        self.sections
            .get(GLOBAL_TOPIC)
            .map(String::as_str)
            .unwrap_or(GLOBAL_HELP)
    }

    /// Looks up a topic; `single` and `/single` are the same topic.
    pub fn get(&self, topic: &str) -> Option<&str> {
        self.sections
            .get(topic.trim().trim_start_matches('/'))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
