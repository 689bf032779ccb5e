pub mod announcer;

pub use announcer::{Announcer, Channel, Committed};
