// Common types shared by the routes and the domain pipelines

pub mod error;

pub use error::{ApiError, ErrorBody};
