use crossterm::event::{KeyCode, KeyModifiers};

/// Keys the server treats as commands even while type-ahead search owns the
/// printable characters.
const FUNCTION_LIKE: [&str; 13] = [
    "escape", "space", "backspace", "enter", "up", "down", "left", "right", "f1", "f2", "f3",
    "f4", "f5",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mods {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Mods {
    #[must_use]
    pub fn from_event(modifiers: KeyModifiers) -> Self {
        Self {
            control: modifiers.contains(KeyModifiers::CONTROL),
            alt: modifiers.contains(KeyModifiers::ALT),
            shift: modifiers.contains(KeyModifiers::SHIFT),
        }
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.control || self.alt || self.shift
    }
}

/// Logical key name for the wire. Keys outside the recognized set return
/// `None` and never leave the client.
#[must_use]
pub fn normalize(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase().to_string()),
        KeyCode::Esc => Some("escape".to_string()),
        KeyCode::Backspace => Some("backspace".to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Up => Some("up".to_string()),
        KeyCode::Down => Some("down".to_string()),
        KeyCode::Left => Some("left".to_string()),
        KeyCode::Right => Some("right".to_string()),
        KeyCode::F(n) => Some(format!("f{n}")),
        _ => None,
    }
}

#[must_use]
pub fn is_function_like(key: &str) -> bool {
    FUNCTION_LIKE.contains(&key)
}

/// Candidate for the type-ahead branch: a lone printable character. Wider
/// than the wire set on purpose; search matches item text, not key names.
#[must_use]
pub fn printable(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) if !c.is_control() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_letters_digits_and_space() {
        assert_eq!(normalize(KeyCode::Char('A')).as_deref(), Some("a"));
        assert_eq!(normalize(KeyCode::Char('7')).as_deref(), Some("7"));
        assert_eq!(normalize(KeyCode::Char(' ')).as_deref(), Some("space"));
    }

    #[test]
    fn normalizes_named_keys() {
        assert_eq!(normalize(KeyCode::Esc).as_deref(), Some("escape"));
        assert_eq!(normalize(KeyCode::Backspace).as_deref(), Some("backspace"));
        assert_eq!(normalize(KeyCode::Left).as_deref(), Some("left"));
        assert_eq!(normalize(KeyCode::F(9)).as_deref(), Some("f9"));
    }

    #[test]
    fn rejects_unrecognized_keys() {
        assert_eq!(normalize(KeyCode::Tab), None);
        assert_eq!(normalize(KeyCode::Home), None);
        assert_eq!(normalize(KeyCode::Char('?')), None);
        assert_eq!(normalize(KeyCode::Insert), None);
    }

    #[test]
    fn function_like_covers_f1_through_f5_only() {
        assert!(is_function_like("escape"));
        assert!(is_function_like("space"));
        assert!(is_function_like("f5"));
        assert!(!is_function_like("f6"));
        assert!(!is_function_like("a"));
    }
}
