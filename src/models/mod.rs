pub mod activity;
pub mod attendee;
pub mod sync_info;
