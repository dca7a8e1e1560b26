pub mod console;
pub mod domain;
pub mod error;
pub mod ids;
pub mod logger;
pub mod service;
pub mod store;
pub mod validation;
