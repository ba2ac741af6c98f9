pub mod breed_service;
pub mod calendar_feed;
pub mod client_search;
pub mod clinic_filter;
pub mod preview_service;
pub mod sidebar;
