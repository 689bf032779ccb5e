use crate::domain::models::{EscapeBehavior, KeybindCommand, MenuItem};
use std::time::Instant;

/// The single server-driven menu. Items are only ever replaced wholesale;
/// `selection` stays inside `[0, items.len())` whenever items exist and is
/// pinned to 0 when they do not.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub menu_id: String,
    pub items: Vec<MenuItem>,
    pub selection: usize,
    pub escape_behavior: EscapeBehavior,
    pub multiletter: bool,

    // --- Type-ahead ---
    pub search_buffer: String,
    pub last_keystroke: Option<Instant>,
}

impl MenuState {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selection)
    }

    #[must_use]
    pub fn current_item_text(&self) -> &str {
        self.current_item().map_or("", |item| item.text.as_str())
    }

    #[must_use]
    pub fn current_item_id(&self) -> Option<String> {
        self.current_item().and_then(|item| item.id.clone())
    }

    /// 1-based index for the wire; `None` exactly when the menu is empty.
    #[must_use]
    pub fn menu_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.selection + 1)
        }
    }

    #[must_use]
    pub fn wire_id(&self) -> Option<String> {
        if self.menu_id.is_empty() {
            None
        } else {
            Some(self.menu_id.clone())
        }
    }

    /// Snapshot of the menu context at press time, attached to every
    /// outbound key press.
    #[must_use]
    pub fn keybind(&self, key: impl Into<String>, control: bool, alt: bool, shift: bool) -> KeybindCommand {
        KeybindCommand {
            key: key.into(),
            control,
            alt,
            shift,
            menu_id: self.wire_id(),
            menu_index: self.menu_index(),
            menu_item_id: self.current_item_id(),
        }
    }

    /// Wholesale replacement from a server menu push. Selection resolves to
    /// the item matching `selection_id` first, then to `position` clamped,
    /// then to 0. The type-ahead buffer never survives a replacement.
    pub fn replace(
        &mut self,
        menu_id: String,
        items: Vec<MenuItem>,
        selection_id: Option<&str>,
        position: usize,
        escape_behavior: EscapeBehavior,
        multiletter: bool,
    ) {
        let by_id = selection_id.and_then(|wanted| {
            items
                .iter()
                .position(|item| item.id.as_deref() == Some(wanted))
        });
        self.selection = match by_id {
            Some(idx) => idx,
            None if items.is_empty() => 0,
            None => position.min(items.len() - 1),
        };
        self.menu_id = menu_id;
        self.items = items;
        self.escape_behavior = escape_behavior;
        self.multiletter = multiletter;
        self.search_buffer.clear();
        self.last_keystroke = None;
    }

    pub fn clear(&mut self) {
        self.replace(
            String::new(),
            Vec::new(),
            None,
            0,
            EscapeBehavior::default(),
            true,
        );
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            menu_id: String::new(),
            items: Vec::new(),
            selection: 0,
            escape_behavior: EscapeBehavior::default(),
            multiletter: true,
            search_buffer: String::new(),
            last_keystroke: None,
        }
    }
}
