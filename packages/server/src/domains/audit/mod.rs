//! Audit domain - accessibility audits of a URL or HTML snippet via Gemini

pub mod activities;
pub mod cleanup;
pub mod models;
pub mod prompts;
pub mod validation;

pub use activities::run_audit;
pub use cleanup::{clean_model_json, parse_audit_result};
pub use models::{AuditRequest, AuditResult, AuditSettings, AuditSubject};
pub use validation::is_valid_url;
