// Tool execution against the knowledge base and validation engine

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use malgn_core::knowledge::ALL_RULES;
use malgn_core::{
    build_context, Checklist, ClassIndex, ClassInfo, ClassListing, DocIndex, DocRecord,
    DocSearchResult, FileType, KnowledgeBase, PatternIndex, PatternRecord, RuleSet, TaskContext,
    ValidationEngine, ValidationResult,
};

use super::args::{
    present, GetClassArgs, GetContextArgs, GetDocArgs, GetPatternArgs, GetRulesArgs,
    SearchDocsArgs, ValidateCodeArgs,
};
use super::registry::ToolKind;
use crate::error::ToolCallError;

const CHECKLIST_CATEGORY: &str = "checklist";

/// Structured result of a tool call
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Context(TaskContext),
    Validation(ValidationResult),
    ClassIndex(ClassIndex),
    ClassListing(ClassListing),
    Class(ClassInfo),
    Rules(RuleSet),
    Checklist(Checklist),
    PatternIndex(PatternIndex),
    Pattern(PatternRecord),
    DocIndex(DocIndex),
    Doc(DocRecord),
    DocSearch(DocSearchResult),
    NotFound(NotFound),
}

/// Lookup that matched nothing; a successful call, not a protocol error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub error: String,
}

impl ToolOutput {
    fn not_found(what: &str, key: &str) -> Self {
        ToolOutput::NotFound(NotFound {
            error: format!("{what} '{key}' not found."),
        })
    }
}

/// Runs tool calls; cheap to clone and safe to share between requests
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    knowledge: Arc<KnowledgeBase>,
    engine: Arc<ValidationEngine>,
}

impl ToolExecutor {
    pub fn new(knowledge: Arc<KnowledgeBase>, engine: Arc<ValidationEngine>) -> Self {
        Self { knowledge, engine }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Decode `arguments` for `kind` and run the tool
    pub fn execute(
        &self,
        kind: ToolKind,
        arguments: Map<String, Value>,
    ) -> Result<ToolOutput, ToolCallError> {
        let arguments = Value::Object(arguments);
        match kind {
            ToolKind::GetContext => Ok(self.get_context(&decode(kind, arguments)?)),
            ToolKind::ValidateCode => self.validate_code(&decode(kind, arguments)?),
            ToolKind::GetClass => Ok(self.get_class(&decode(kind, arguments)?)),
            ToolKind::GetRules => Ok(self.get_rules(&decode(kind, arguments)?)),
            ToolKind::GetPattern => Ok(self.get_pattern(&decode(kind, arguments)?)),
            ToolKind::GetDoc => Ok(self.get_doc(&decode(kind, arguments)?)),
            ToolKind::SearchDocs => Ok(self.search_docs(&decode(kind, arguments)?)),
        }
    }

    pub fn get_context(&self, args: &GetContextArgs) -> ToolOutput {
        ToolOutput::Context(build_context(&self.knowledge, args))
    }

    pub fn validate_code(&self, args: &ValidateCodeArgs) -> Result<ToolOutput, ToolCallError> {
        let file_type: FileType =
            args.file_type
                .parse()
                .map_err(|err: malgn_core::CoreError| ToolCallError::InvalidArguments {
                    tool: ToolKind::ValidateCode.name().to_string(),
                    message: err.to_string(),
                })?;

        let result = self
            .engine
            .validate(&args.code, file_type, args.strict.unwrap_or(false));
        Ok(ToolOutput::Validation(result))
    }

    pub fn get_class(&self, args: &GetClassArgs) -> ToolOutput {
        let Some(name) = present(&args.name) else {
            let listing = present(&args.category).and_then(|c| self.knowledge.class_listing(c));
            return match listing {
                Some(listing) => ToolOutput::ClassListing(listing),
                None => ToolOutput::ClassIndex(self.knowledge.class_index().clone()),
            };
        };

        let class = match present(&args.method_filter) {
            Some(filter) => self.knowledge.get_class_filtered(name, filter),
            None => self.knowledge.get_class(name).cloned(),
        };

        match class {
            Some(class) => ToolOutput::Class(class),
            None => ToolOutput::not_found("Class", name),
        }
    }

    pub fn get_rules(&self, args: &GetRulesArgs) -> ToolOutput {
        if let Some(rule_id) = present(&args.rule_id) {
            return match self.knowledge.get_rule(rule_id) {
                Some(rule) => ToolOutput::Rules(RuleSet {
                    total: 1,
                    rules: vec![rule.clone()],
                }),
                None => ToolOutput::not_found("Rule", rule_id),
            };
        }

        let category = present(&args.category).unwrap_or(ALL_RULES);
        if category == CHECKLIST_CATEGORY {
            return ToolOutput::Checklist(self.knowledge.checklist().clone());
        }

        match self.knowledge.get_rules(category) {
            Some(rules) => ToolOutput::Rules(rules),
            None => ToolOutput::not_found("Category", category),
        }
    }

    pub fn get_pattern(&self, args: &GetPatternArgs) -> ToolOutput {
        let Some(pattern_type) = present(&args.pattern_type) else {
            return ToolOutput::PatternIndex(self.knowledge.pattern_index().clone());
        };

        match self.knowledge.get_pattern(pattern_type) {
            Some(pattern) => ToolOutput::Pattern(pattern.clone()),
            None => ToolOutput::not_found("Pattern", pattern_type),
        }
    }

    pub fn get_doc(&self, args: &GetDocArgs) -> ToolOutput {
        let Some(slug) = present(&args.slug) else {
            return ToolOutput::DocIndex(self.knowledge.doc_index().clone());
        };

        match self.knowledge.get_doc(slug) {
            Some(doc) => ToolOutput::Doc(doc.clone()),
            None => ToolOutput::not_found("Document", slug),
        }
    }

    pub fn search_docs(&self, args: &SearchDocsArgs) -> ToolOutput {
        ToolOutput::DocSearch(
            self.knowledge
                .search_docs(&args.query, args.effective_limit()),
        )
    }
}

fn decode<T: DeserializeOwned>(kind: ToolKind, arguments: Value) -> Result<T, ToolCallError> {
    serde_json::from_value(arguments).map_err(|err| ToolCallError::InvalidArguments {
        tool: kind.name().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn executor() -> ToolExecutor {
        ToolExecutor::new(
            Arc::new(KnowledgeBase::load().unwrap()),
            Arc::new(ValidationEngine::builtin().unwrap()),
        )
    }

    fn run(kind: ToolKind, arguments: Value) -> Result<ToolOutput, ToolCallError> {
        let Value::Object(map) = arguments else {
            panic!("arguments must be an object");
        };
        executor().execute(kind, map)
    }

    #[test]
    fn test_get_class_without_name_lists_classes() {
        let output = run(ToolKind::GetClass, json!({})).unwrap();
        assert!(matches!(output, ToolOutput::ClassIndex(_)));

        let output = run(ToolKind::GetClass, json!({"category": "web"})).unwrap();
        let ToolOutput::ClassListing(listing) = output else {
            panic!("expected listing");
        };
        assert!(listing.classes.iter().all(|c| c.category == "web"));
    }

    #[test]
    fn test_unknown_class_is_a_payload_error() {
        let output = run(ToolKind::GetClass, json!({"name": "Nope"})).unwrap();
        assert!(matches!(output, ToolOutput::NotFound(_)));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value, json!({"error": "Class 'Nope' not found."}));
    }

    #[test]
    fn test_get_rules_variants() {
        let ToolOutput::Rules(one) = run(ToolKind::GetRules, json!({"rule_id": "naming-dao"})).unwrap()
        else {
            panic!("expected rules");
        };
        assert_eq!(one.total, 1);
        assert_eq!(one.rules[0].id, "naming-dao");

        let checklist = run(ToolKind::GetRules, json!({"category": "checklist"})).unwrap();
        assert!(matches!(checklist, ToolOutput::Checklist(_)));

        let all = run(ToolKind::GetRules, json!({})).unwrap();
        assert!(matches!(all, ToolOutput::Rules(ref set) if set.total > 1));

        let missing = run(ToolKind::GetRules, json!({"category": "bogus"})).unwrap();
        assert!(matches!(missing, ToolOutput::NotFound(_)));
    }

    #[test]
    fn test_get_pattern_and_doc() {
        assert!(matches!(
            run(ToolKind::GetPattern, json!({})).unwrap(),
            ToolOutput::PatternIndex(_)
        ));
        assert!(matches!(
            run(ToolKind::GetPattern, json!({"type": "dao-basic"})).unwrap(),
            ToolOutput::Pattern(_)
        ));
        assert!(matches!(
            run(ToolKind::GetDoc, json!({"slug": ""})).unwrap(),
            ToolOutput::DocIndex(_)
        ));
        assert!(matches!(
            run(ToolKind::GetDoc, json!({"slug": "missing"})).unwrap(),
            ToolOutput::NotFound(_)
        ));
    }

    #[test]
    fn test_validate_code_runs_engine() {
        let output = run(
            ToolKind::ValidateCode,
            json!({"code": "request.getParameter(\"id\")", "file_type": "jsp"}),
        )
        .unwrap();
        let ToolOutput::Validation(result) = output else {
            panic!("expected validation");
        };
        assert_eq!(result.total_issues, 1);
        assert_eq!(result.issues[0].code, "RAW_PARAMETER");
    }

    #[test]
    fn test_invalid_arguments() {
        let err = run(ToolKind::ValidateCode, json!({"code": "x", "file_type": "php"})).unwrap_err();
        assert!(matches!(err, ToolCallError::InvalidArguments { .. }));

        let err = run(ToolKind::SearchDocs, json!({"limit": 3})).unwrap_err();
        assert!(err.to_string().contains("search_docs"));
    }

    #[test]
    fn test_search_docs_limit() {
        let ToolOutput::DocSearch(result) =
            run(ToolKind::SearchDocs, json!({"query": "", "limit": 1})).unwrap()
        else {
            panic!("expected search result");
        };
        assert_eq!(result.results.len(), 1);
        assert!(result.total > 1);
    }
}
