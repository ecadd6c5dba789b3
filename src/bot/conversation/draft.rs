use serde::{Deserialize, Serialize};

/// The five fields an event is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Name,
    StartDate,
    EndDate,
    StartTime,
    EndTime,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Name,
        FieldKind::StartDate,
        FieldKind::EndDate,
        FieldKind::StartTime,
        FieldKind::EndTime,
    ];

    /// Short key used as inline button callback data.
    pub fn key(self) -> &'static str {
        match self {
            FieldKind::Name => "n",
            FieldKind::StartDate => "sd",
            FieldKind::EndDate => "ed",
            FieldKind::StartTime => "st",
            FieldKind::EndTime => "et",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Name => "Name",
            FieldKind::StartDate => "Start date",
            FieldKind::EndDate => "End date",
            FieldKind::StartTime => "Start time",
            FieldKind::EndTime => "End time",
        }
    }
}

/// Field values collected so far in one conversation, in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Field whose value the next text message provides.
    pub pending: Option<FieldKind>,
}

impl EventDraft {
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    pub fn set(&mut self, kind: FieldKind, value: String) {
        *self.slot_mut(kind) = Some(value);
    }

    /// Sets the field only if it has no value yet.
    pub fn set_default(&mut self, kind: FieldKind, value: String) {
        self.slot_mut(kind).get_or_insert(value);
    }

    fn slot(&self, kind: FieldKind) -> &Option<String> {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::StartDate => &self.start_date,
            FieldKind::EndDate => &self.end_date,
            FieldKind::StartTime => &self.start_time,
            FieldKind::EndTime => &self.end_time,
        }
    }

    fn slot_mut(&mut self, kind: FieldKind) -> &mut Option<String> {
        match kind {
            FieldKind::Name => &mut self.name,
            FieldKind::StartDate => &mut self.start_date,
            FieldKind::EndDate => &mut self.end_date,
            FieldKind::StartTime => &mut self.start_time,
            FieldKind::EndTime => &mut self.end_time,
        }
    }
}
