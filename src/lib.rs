pub mod cluster;
pub mod config;
pub mod db;
pub mod feeds;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod similarity;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_DB: &str = "db_query";
