pub mod fetcher;
pub mod store;
