// Typed tool arguments

use serde::Deserialize;

pub use malgn_core::ContextRequest as GetContextArgs;

const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateCodeArgs {
    pub code: String,
    pub file_type: String,
    #[serde(default)]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetClassArgs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub method_filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetRulesArgs {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rule_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetPatternArgs {
    #[serde(rename = "type", default)]
    pub pattern_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetDocArgs {
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDocsArgs {
    pub query: String,
    #[serde(default)]
    pub limit: Option<f64>,
}

impl SearchDocsArgs {
    /// Positive limits are truncated to whole numbers; anything else means the default
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit.is_finite() && limit >= 1.0 => limit as usize,
            _ => DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Treat empty strings like absent values
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_limit_defaults() {
        let args = |limit: Option<f64>| SearchDocsArgs {
            query: "db".to_string(),
            limit,
        };
        assert_eq!(args(None).effective_limit(), 10);
        assert_eq!(args(Some(0.0)).effective_limit(), 10);
        assert_eq!(args(Some(-3.0)).effective_limit(), 10);
        assert_eq!(args(Some(3.7)).effective_limit(), 3);
        assert_eq!(args(Some(25.0)).effective_limit(), 25);
    }

    #[test]
    fn test_pattern_type_uses_wire_name() {
        let args: GetPatternArgs = serde_json::from_value(json!({"type": "jsp-list"})).unwrap();
        assert_eq!(args.pattern_type.as_deref(), Some("jsp-list"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        assert!(serde_json::from_value::<ValidateCodeArgs>(json!({"code": "x"})).is_err());
        assert!(serde_json::from_value::<SearchDocsArgs>(json!({})).is_err());
    }

    #[test]
    fn test_present_filters_empty() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("a".to_string())), Some("a"));
        assert_eq!(present(&None), None);
    }
}
