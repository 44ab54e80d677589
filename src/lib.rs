pub mod actors;
pub mod debounce;
pub mod dom;
pub mod driver;
pub mod error;
pub mod github;
pub mod models;
pub mod render;
pub mod types;
