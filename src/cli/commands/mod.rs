pub mod checkin;
pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod ping;
pub mod scan;
pub mod status;
pub mod sync;
pub mod undo;
