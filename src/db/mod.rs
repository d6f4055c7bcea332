pub mod activity;
pub mod initialize;
pub mod roster;
pub mod store;
