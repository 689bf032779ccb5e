use crate::app::command::Command;
use crate::domain::protocol::ServerEvent;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Quit,

    // --- Menu Navigation ---
    MoveSelection(isize),  // Arrow up/down, clamped at the edges
    SelectIndex(usize),    // Click or Home/End jump
    SelectLast,            // End key
    TypeAhead(char),       // Printable char routed to type-ahead search
    ActivateSelection,     // Enter or double-click

    // --- Escape Dispatch ---
    // Escape (or menu-focused Backspace) resolved against the active
    // menu's escape behavior by the reducer.
    EscapePressed { control: bool, alt: bool, shift: bool },

    // --- Outbound Key Presses ---
    SendKeybind {
        key: String,
        control: bool,
        alt: bool,
        shift: bool,
    },

    // --- Focus & Overlays ---
    CycleFocus,
    FocusInput,
    FocusHistory,
    ToggleHelp,
    ScrollHelp(i16),

    // --- Compose Line ---
    EditorInput(crossterm::event::KeyEvent), // Key forwarded to the editor
    SubmitInput,                             // Enter on the compose line

    // --- History Review ---
    HistoryReview(isize), // One entry older/newer (negative = older)
    HistoryPage(bool),    // Page older/newer (true = older)
    HistoryEdge(bool),    // Oldest/newest (true = oldest)
    HistoryBuffer(isize), // Switch buffer left/right

    // --- Session Events (from the link reader task) ---
    Server(ServerEvent),
    ConnectionLost(String),

    // --- Async Results ---
    LinkError(String), // A send failed; surfaced on the status line
}
