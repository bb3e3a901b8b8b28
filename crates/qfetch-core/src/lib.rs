pub mod config;
pub mod logging;

pub mod content_store;
pub(crate) mod http;
pub mod mirror;
pub mod origin;
pub mod playlist;
pub mod progress_db;
pub mod resource_list;
pub mod url_model;
