// Core knowledge base and code validation for the Malgn framework

pub mod context;
pub mod error;
pub mod knowledge;
pub mod rules;
pub mod types;
pub mod validation;

pub use context::{build_context, ContextRequest, TaskContext};
pub use error::{CoreError, CoreResult};
pub use knowledge::KnowledgeBase;
pub use rules::{Rule, RuleCatalog, RuleSpec};
pub use types::*;
pub use validation::ValidationEngine;
