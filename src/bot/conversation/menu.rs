use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::draft::{EventDraft, FieldKind};

/// Callback data of the button that finishes editing.
pub const DONE_KEY: &str = "d";

/// Lays buttons out in rows of `n_cols`, with optional single-button header
/// and footer rows.
pub fn build_menu(
    buttons: Vec<InlineKeyboardButton>,
    n_cols: usize,
    header: Option<InlineKeyboardButton>,
    footer: Option<InlineKeyboardButton>,
) -> Vec<Vec<InlineKeyboardButton>> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .chunks(n_cols.max(1))
        .map(|chunk| chunk.to_vec())
        .collect();
    if let Some(header) = header {
        rows.insert(0, vec![header]);
    }
    if let Some(footer) = footer {
        rows.push(vec![footer]);
    }
    rows
}

/// The field selection keyboard. Buttons show the current value of a field,
/// or its label while it is empty.
pub fn field_menu(draft: &EventDraft) -> InlineKeyboardMarkup {
    let button = |kind: FieldKind| {
        let text = draft.get(kind).unwrap_or(kind.label());
        InlineKeyboardButton::callback(text.to_string(), kind.key().to_string())
    };

    let buttons = vec![
        button(FieldKind::StartDate),
        button(FieldKind::StartTime),
        button(FieldKind::EndDate),
        button(FieldKind::EndTime),
        InlineKeyboardButton::callback("Done".to_string(), DONE_KEY.to_string()),
    ];

    InlineKeyboardMarkup::new(build_menu(buttons, 2, Some(button(FieldKind::Name)), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            _ => "",
        }
    }

    #[test]
    fn test_build_menu_layout() {
        let buttons = (0..5)
            .map(|i| InlineKeyboardButton::callback(i.to_string(), i.to_string()))
            .collect();
        let header = InlineKeyboardButton::callback("h".to_string(), "h".to_string());
        let footer = InlineKeyboardButton::callback("f".to_string(), "f".to_string());

        let rows = build_menu(buttons, 2, Some(header), Some(footer));
        let sizes: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 2, 1, 1]);
        assert_eq!(rows[0][0].text, "h");
        assert_eq!(rows[4][0].text, "f");
    }

    #[test]
    fn test_field_menu_labels_and_values() {
        let mut draft = EventDraft::default();
        draft.set(FieldKind::StartTime, "09:30".to_string());

        let markup = field_menu(&draft);
        let rows = &markup.inline_keyboard;
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0].text, "Name");
        assert_eq!(callback_data(&rows[0][0]), "n");
        assert_eq!(rows[1][0].text, "Start date");
        assert_eq!(rows[1][1].text, "09:30");
        assert_eq!(callback_data(&rows[1][1]), "st");
        assert_eq!(rows[2][1].text, "End time");
        assert_eq!(rows[3][0].text, "Done");
        assert_eq!(callback_data(&rows[3][0]), DONE_KEY);
    }
}
