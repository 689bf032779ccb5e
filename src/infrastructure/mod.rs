pub mod null_link;
pub mod tcp_link;

pub use null_link::NullLink;
pub use tcp_link::{spawn_reader, TcpLink};
