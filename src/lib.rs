pub mod app;
pub mod budget;
pub mod category;
pub mod data;
pub mod filter_state;
pub mod history;
pub mod query;
pub mod records;
pub mod render;
pub mod route;
pub mod text;
pub mod view;
