pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;
pub mod users;
