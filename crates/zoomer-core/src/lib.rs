pub mod config;
pub mod logging;

// Core modules
pub mod capacity;
pub mod matcher;
pub mod service;
pub mod specificity;
pub mod store;
pub mod transfer;
pub mod url_parts;
