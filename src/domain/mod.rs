pub mod feedback;
pub mod link;
pub mod models;
pub mod protocol;
