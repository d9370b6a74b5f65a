pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod http;
pub mod icon;
pub mod model;
pub mod providers;
pub mod render;
pub mod service;
