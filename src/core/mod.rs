pub mod engine;
pub mod import;
pub mod notify;
pub mod projection;
pub mod sync;
