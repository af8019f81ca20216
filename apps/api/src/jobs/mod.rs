pub mod handlers;
pub mod reader;
