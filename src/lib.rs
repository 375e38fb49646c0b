pub mod client;
pub mod controller;
pub mod extract;
pub mod normalize;
pub mod runtime;
pub mod types;
pub mod versions;
