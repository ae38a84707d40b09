pub mod day_key;
pub mod event;
pub mod platform;
pub mod post;
pub mod store;
pub mod timefmt;
