// Task context assembly for code generation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::knowledge::{KnowledgeBase, ALL_RULES};
use crate::types::{PatternRecord, RuleRecord, Severity};

const CRITICAL_RULES: usize = 10;
const RELEVANT_RULES: usize = 5;

/// What the caller is about to build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextRequest {
    pub task: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub include_class_info: Vec<String>,
    #[serde(default)]
    pub include_patterns: Option<bool>,
    #[serde(default)]
    pub include_rules: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskContext {
    pub task: String,
    pub context: ContextBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleDigest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<BTreeMap<String, PatternRecord>>,
    pub class_info: BTreeMap<String, ClassDigest>,
    pub checklist: Vec<String>,
}

/// Error-level rules first, then a few warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDigest {
    pub critical: Vec<RuleRecord>,
    pub relevant: Vec<RuleRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDigest {
    pub description: String,
    pub key_methods: Vec<String>,
}

/// Classes and patterns a feature needs
fn feature_requirements(feature: &str) -> (&'static [&'static str], &'static [&'static str]) {
    match feature {
        "list" => (&["ListManager", "DataObject", "Form"], &["jsp-list", "html-list"]),
        "insert" => (
            &["DataObject", "Form", "Page"],
            &["jsp-insert", "html-form", "dao-basic"],
        ),
        "modify" => (&["DataObject", "Form", "Page"], &["jsp-modify", "html-form"]),
        "delete" => (&["DataObject"], &["jsp-delete"]),
        "view" => (&["DataObject", "Page"], &["jsp-view", "html-view"]),
        "search" => (&["ListManager", "Form"], &["jsp-list", "html-list"]),
        "paging" => (&["ListManager"], &["jsp-list"]),
        "ajax" => (&["Json", "Form"], &["jsp-ajax"]),
        "restapi" => (&["RestAPI", "Json"], &["jsp-restapi"]),
        "upload" => (&["Form", "FileManager"], &["jsp-insert"]),
        "auth" => (&["Auth"], &[]),
        _ => (&[], &[]),
    }
}

/// Collect the rules, patterns, class reference and checklist for a task
///
/// Unknown features and class names are skipped.
pub fn build_context(kb: &KnowledgeBase, request: &ContextRequest) -> TaskContext {
    let mut classes: BTreeSet<&str> = BTreeSet::new();
    let mut patterns: BTreeSet<&str> = BTreeSet::new();

    for feature in &request.features {
        let (needed_classes, needed_patterns) = feature_requirements(feature);
        classes.extend(needed_classes.iter().copied());
        patterns.extend(needed_patterns.iter().copied());
    }
    classes.extend(request.include_class_info.iter().map(String::as_str));

    let class_info = classes
        .into_iter()
        .filter_map(|name| kb.get_class(name))
        .map(|class| {
            let digest = ClassDigest {
                description: class.description.clone(),
                key_methods: class
                    .methods
                    .iter()
                    .map(|m| format!("{} - {}", m.signature, m.description))
                    .collect(),
            };
            (class.name.clone(), digest)
        })
        .collect();

    let patterns = request.include_patterns.unwrap_or(true).then(|| {
        patterns
            .into_iter()
            .filter_map(|t| kb.get_pattern(t))
            .map(|p| (p.pattern_type.clone(), p.clone()))
            .collect()
    });

    let rules = if request.include_rules.unwrap_or(true) {
        kb.get_rules(ALL_RULES).map(|set| digest_rules(&set.rules))
    } else {
        None
    };

    TaskContext {
        task: request.task.clone(),
        context: ContextBundle {
            rules,
            patterns,
            class_info,
            checklist: checklist(request.table_name.as_deref()),
        },
    }
}

fn digest_rules(rules: &[RuleRecord]) -> RuleDigest {
    let pick = |severity: Severity, limit: usize| {
        rules
            .iter()
            .filter(|r| r.severity == severity)
            .take(limit)
            .cloned()
            .collect()
    };

    RuleDigest {
        critical: pick(Severity::Error, CRITICAL_RULES),
        relevant: pick(Severity::Warning, RELEVANT_RULES),
    }
}

fn checklist(table_name: Option<&str>) -> Vec<String> {
    let mut items = Vec::with_capacity(4);

    if let Some(table) = table_name.filter(|t| !t.is_empty()) {
        let (class, var) = dao_names(table);
        items.push(format!("DAO variable name: {class} {var}"));
    }

    items.push(
        r#"JSP start: <%@ page contentType="text/html; charset=utf-8" %><%@ include file="/init.jsp" %><%"#
            .to_string(),
    );
    items.push("Complete JSP/HTML separation: no HTML inside JSP".to_string());
    items.push("Page order: setLayout -> setBody -> setVar -> setLoop -> display".to_string());
    items
}

/// `tb_board` -> (`BoardDao`, `board`)
fn dao_names(table: &str) -> (String, String) {
    let var = table.replacen("tb_", "", 1);
    let mut chars = var.chars();
    let class = match chars.next() {
        Some(first) => format!("{}{}Dao", first.to_uppercase(), chars.as_str()),
        None => "Dao".to_string(),
    };
    (class, var)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::load().unwrap()
    }

    fn request(features: &[&str]) -> ContextRequest {
        ContextRequest {
            task: "Board list page".to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_feature_pulls_classes_and_patterns() {
        let ctx = build_context(&kb(), &request(&["list"]));

        let classes: Vec<_> = ctx.context.class_info.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["DataObject", "Form", "ListManager"]);

        let patterns = ctx.context.patterns.unwrap();
        assert!(patterns.contains_key("jsp-list"));
        assert!(patterns.contains_key("html-list"));
        assert_eq!(ctx.task, "Board list page");
    }

    #[test]
    fn test_key_methods_render_signature_and_description() {
        let ctx = build_context(&kb(), &request(&["auth"]));
        let auth = &ctx.context.class_info["Auth"];
        assert!(!auth.key_methods.is_empty());
        assert!(auth.key_methods.iter().all(|m| m.contains(" - ")));
    }

    #[test]
    fn test_rules_digest_respects_limits() {
        let ctx = build_context(&kb(), &request(&[]));
        let rules = ctx.context.rules.unwrap();
        assert!(rules.critical.len() <= CRITICAL_RULES);
        assert!(rules.relevant.len() <= RELEVANT_RULES);
        assert!(rules.critical.iter().all(|r| r.severity == Severity::Error));
        assert!(rules.relevant.iter().all(|r| r.severity == Severity::Warning));
    }

    #[test]
    fn test_sections_can_be_excluded() {
        let mut req = request(&["list"]);
        req.include_rules = Some(false);
        req.include_patterns = Some(false);
        let ctx = build_context(&kb(), &req);

        assert!(ctx.context.rules.is_none());
        assert!(ctx.context.patterns.is_none());
        assert!(!ctx.context.class_info.is_empty());

        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json["context"].get("rules").is_none());
    }

    #[test]
    fn test_unknown_features_and_classes_are_skipped() {
        let mut req = request(&["teleport"]);
        req.include_class_info = vec!["Ghost".to_string(), "Json".to_string()];
        let ctx = build_context(&kb(), &req);

        let classes: Vec<_> = ctx.context.class_info.keys().collect();
        assert_eq!(classes, vec!["Json"]);
        assert!(ctx.context.patterns.unwrap().is_empty());
    }

    #[test]
    fn test_checklist_leads_with_dao_naming() {
        let mut req = request(&["list"]);
        req.table_name = Some("tb_board".to_string());
        let ctx = build_context(&kb(), &req);

        assert_eq!(ctx.context.checklist.len(), 4);
        assert_eq!(ctx.context.checklist[0], "DAO variable name: BoardDao board");

        let plain = build_context(&kb(), &request(&["list"]));
        assert_eq!(plain.context.checklist.len(), 3);
    }

    #[test]
    fn test_dao_names() {
        assert_eq!(dao_names("tb_user"), ("UserDao".to_string(), "user".to_string()));
        assert_eq!(dao_names("notice"), ("NoticeDao".to_string(), "notice".to_string()));
    }
}
