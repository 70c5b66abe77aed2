// HTTP routes
pub mod audit;
pub mod content;
pub mod health;

pub use audit::*;
pub use content::*;
pub use health::*;
