pub mod breed;
pub mod calendar_event;
pub mod client;
pub mod schedule;
