pub mod compose;
pub mod history;
pub mod menu;
pub mod session;
pub mod ui;
