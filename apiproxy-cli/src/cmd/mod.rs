pub mod api;
pub mod config;
pub mod render;
pub mod run;
pub mod template;
pub mod validate;
