pub mod collector;
pub mod filter;
pub mod metrics;
pub mod platform;
pub mod process;
pub mod procfs;
pub mod snapshot;
pub mod store;
pub mod table;
pub mod users;
