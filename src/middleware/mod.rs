pub mod cors;

pub use cors::cors_policy;
