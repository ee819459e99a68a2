pub mod commentary;
pub mod constants;
pub mod engine;
pub mod grid;
pub mod motion;
pub mod server_protocol;
pub mod types;
