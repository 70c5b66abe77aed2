// Business domains
pub mod audit;
pub mod content;
