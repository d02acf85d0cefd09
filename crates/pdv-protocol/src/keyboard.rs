//! Channel-agnostic inline keyboards

use crate::token::CallbackAction;

/// A single labeled button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Text shown on the button
    pub label: String,
    /// Action sent back when pressed
    pub action: CallbackAction,
}

impl Button {
    /// Create a new button
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of buttons, rendered top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Create an empty keyboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay buttons out in a grid, `per_row` buttons per row
    pub fn grid(buttons: impl IntoIterator<Item = Button>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let mut rows: Vec<Vec<Button>> = Vec::new();
        for (i, button) in buttons.into_iter().enumerate() {
            if i % per_row == 0 {
                rows.push(Vec::with_capacity(per_row));
            }
            if let Some(row) = rows.last_mut() {
                row.push(button);
            }
        }
        Self { rows }
    }

    /// Append a row holding a single button
    pub fn push_row(mut self, button: Button) -> Self {
        self.rows.push(vec![button]);
        self
    }

    /// The rows of this keyboard
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Iterate over every button, row by row
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Total number of buttons
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
