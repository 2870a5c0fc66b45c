pub mod actions;
pub mod api;
pub mod app;
pub mod category;
