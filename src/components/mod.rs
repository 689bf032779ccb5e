pub mod footer;
pub mod header;
pub mod history_panel;
pub mod input_line;
pub mod menu_list;
pub mod modals;
