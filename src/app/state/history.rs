use chrono::{DateTime, Local};

pub const AGGREGATE_BUFFER: &str = "all";

const DEFAULT_BUFFERS: [&str; 5] = [AGGREGATE_BUFFER, "table", "chats", "activity", "misc"];

const REVIEW_PAGE: isize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub text: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    pub name: String,
    pub entries: Vec<HistoryEntry>,
    pub muted: bool,
    // Review cursor; None while following the newest entry.
    pub cursor: Option<usize>,
}

impl HistoryBuffer {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            muted: false,
            cursor: None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let n = self.entries.len();
        let noun = if n == 1 { "item" } else { "items" };
        format!("{}: {} {}", self.name, n, noun)
    }
}

/// Named log buffers. Every entry lands in its own buffer and in `all`;
/// muting a buffer silences its announcements without dropping its text.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    pub buffers: Vec<HistoryBuffer>,
    pub current: usize,
}

impl HistoryState {
    #[must_use]
    pub fn current_buffer(&self) -> &HistoryBuffer {
        &self.buffers[self.current]
    }

    fn current_buffer_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.buffers[self.current]
    }

    fn ensure(&mut self, name: &str) -> usize {
        if let Some(idx) = self.buffers.iter().position(|b| b.name == name) {
            return idx;
        }
        self.buffers.push(HistoryBuffer::named(name));
        self.buffers.len() - 1
    }

    /// Appends to the named buffer (created on first use) and to the
    /// aggregate. Returns true when the named buffer is unmuted, i.e. the
    /// text should be announced.
    pub fn add(&mut self, buffer: &str, text: &str, timestamp: DateTime<Local>) -> bool {
        let entry = HistoryEntry {
            text: text.to_string(),
            timestamp,
        };
        let idx = self.ensure(buffer);
        self.buffers[idx].entries.push(entry.clone());
        let audible = !self.buffers[idx].muted;
        if buffer != AGGREGATE_BUFFER {
            let all = self.ensure(AGGREGATE_BUFFER);
            self.buffers[all].entries.push(entry);
        }
        audible
    }

    pub fn toggle_mute(&mut self, name: &str) -> Option<bool> {
        let buffer = self.buffers.iter_mut().find(|b| b.name == name)?;
        buffer.muted = !buffer.muted;
        Some(buffer.muted)
    }

    pub fn clear(&mut self, name: &str) -> bool {
        let Some(buffer) = self.buffers.iter_mut().find(|b| b.name == name) else {
            return false;
        };
        buffer.entries.clear();
        buffer.cursor = None;
        true
    }

    pub fn clear_all(&mut self) {
        for buffer in &mut self.buffers {
            buffer.entries.clear();
            buffer.cursor = None;
        }
    }

    // --- Buffer switching (no wrap) ---

    pub fn switch(&mut self, delta: isize) -> Option<&HistoryBuffer> {
        let target = self.current.saturating_add_signed(delta);
        let target = target.min(self.buffers.len() - 1);
        if target == self.current {
            return None;
        }
        self.current = target;
        Some(self.current_buffer())
    }

    // --- Review navigation (no wrap) ---
    // The first backward step enters review at the newest entry; further
    // steps clamp at the ends and re-surface the boundary entry.

    pub fn review_move(&mut self, delta: isize) -> Option<&HistoryEntry> {
        let len = self.current_buffer().entries.len();
        if len == 0 {
            return None;
        }
        let buffer = self.current_buffer_mut();
        let cursor = match buffer.cursor {
            Some(cursor) => cursor
                .saturating_add_signed(delta)
                .min(len - 1),
            // Not yet reviewing: land on the newest entry first.
            None => len - 1,
        };
        buffer.cursor = Some(cursor);
        buffer.entries.get(cursor)
    }

    pub fn review_page(&mut self, backward: bool) -> Option<&HistoryEntry> {
        self.review_move(if backward { -REVIEW_PAGE } else { REVIEW_PAGE })
    }

    pub fn review_edge(&mut self, oldest: bool) -> Option<&HistoryEntry> {
        let len = self.current_buffer().entries.len();
        if len == 0 {
            return None;
        }
        let cursor = if oldest { 0 } else { len - 1 };
        let buffer = self.current_buffer_mut();
        buffer.cursor = Some(cursor);
        buffer.entries.get(cursor)
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            buffers: DEFAULT_BUFFERS.iter().map(|n| HistoryBuffer::named(n)).collect(),
            current: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn starts_with_default_buffers() {
        let history = HistoryState::default();
        let names: Vec<_> = history.buffers.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["all", "table", "chats", "activity", "misc"]);
        assert_eq!(history.current_buffer().name, "all");
    }

    #[test]
    fn add_reaches_named_buffer_and_aggregate() {
        let mut history = HistoryState::default();
        assert!(history.add("chats", "hello", now()));
        let chats = history.buffers.iter().find(|b| b.name == "chats").unwrap();
        let all = history.buffers.iter().find(|b| b.name == "all").unwrap();
        assert_eq!(chats.entries.len(), 1);
        assert_eq!(all.entries.len(), 1);
        assert_eq!(all.entries[0].text, "hello");
    }

    #[test]
    fn add_to_aggregate_does_not_double() {
        let mut history = HistoryState::default();
        history.add("all", "direct", now());
        let all = history.buffers.iter().find(|b| b.name == "all").unwrap();
        assert_eq!(all.entries.len(), 1);
    }

    #[test]
    fn unknown_buffer_is_created_on_first_use() {
        let mut history = HistoryState::default();
        history.add("spades", "dealt", now());
        assert!(history.buffers.iter().any(|b| b.name == "spades"));
    }

    #[test]
    fn muted_buffer_still_records_but_reports_inaudible() {
        let mut history = HistoryState::default();
        assert_eq!(history.toggle_mute("chats"), Some(true));
        assert!(!history.add("chats", "psst", now()));
        let chats = history.buffers.iter().find(|b| b.name == "chats").unwrap();
        assert_eq!(chats.entries.len(), 1);
        assert_eq!(history.toggle_mute("chats"), Some(false));
        assert_eq!(history.toggle_mute("nope"), None);
    }

    #[test]
    fn review_enters_at_newest_and_does_not_wrap() {
        let mut history = HistoryState::default();
        for text in ["one", "two", "three"] {
            history.add("all", text, now());
        }
        assert_eq!(history.review_move(-1).unwrap().text, "three");
        assert_eq!(history.review_move(-1).unwrap().text, "two");
        assert_eq!(history.review_move(-1).unwrap().text, "one");
        // Clamped at the oldest entry.
        assert_eq!(history.review_move(-1).unwrap().text, "one");
        assert_eq!(history.review_move(1).unwrap().text, "two");
        assert_eq!(history.review_edge(false).unwrap().text, "three");
        // Clamped at the newest entry.
        assert_eq!(history.review_move(1).unwrap().text, "three");
    }

    #[test]
    fn review_on_empty_buffer_is_inert() {
        let mut history = HistoryState::default();
        assert_eq!(history.review_move(-1), None);
        assert_eq!(history.review_edge(true), None);
    }

    #[test]
    fn buffer_switching_clamps_at_ends() {
        let mut history = HistoryState::default();
        assert!(history.switch(-1).is_none());
        assert_eq!(history.switch(1).unwrap().name, "table");
        assert_eq!(history.switch(10).unwrap().name, "misc");
        assert!(history.switch(1).is_none());
    }

    #[test]
    fn clear_resets_entries_and_cursor() {
        let mut history = HistoryState::default();
        history.add("table", "bid", now());
        history.review_move(-1);
        assert!(history.clear("all"));
        assert!(history.clear("table"));
        assert!(!history.clear("ghost"));
        assert!(history.current_buffer().entries.is_empty());
        assert_eq!(history.current_buffer().cursor, None);
    }

    #[test]
    fn summary_counts_items() {
        let mut history = HistoryState::default();
        history.add("table", "bid", now());
        let table = history.buffers.iter().find(|b| b.name == "table").unwrap();
        assert_eq!(table.summary(), "table: 1 item");
        let misc = history.buffers.iter().find(|b| b.name == "misc").unwrap();
        assert_eq!(misc.summary(), "misc: 0 items");
    }
}
