// Built-in tool definitions

use super::registry::{
    json_schema_array, json_schema_boolean, json_schema_enum, json_schema_number,
    json_schema_string, ToolDefinition, ToolKind,
};

pub const FEATURES: &[&str] = &[
    "list", "insert", "modify", "delete", "view", "search", "paging", "ajax", "restapi", "upload",
    "auth",
];

pub const FILE_TYPES: &[&str] = &["jsp", "html", "dao"];

pub const CLASS_CATEGORIES: &[&str] = &["core", "data", "web", "util", "security"];

pub const RULE_CATEGORIES: &[&str] = &[
    "all",
    "naming",
    "structure",
    "template",
    "parameter",
    "data",
    "postback",
    "message",
    "ajax",
    "security",
    "style",
    "checklist",
];

pub const PATTERN_TYPES: &[&str] = &[
    "jsp-list",
    "jsp-insert",
    "jsp-modify",
    "jsp-delete",
    "jsp-view",
    "jsp-restapi",
    "jsp-ajax",
    "dao-basic",
    "dao-custom",
    "html-list",
    "html-form",
    "html-view",
    "html-layout",
];

pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            kind: ToolKind::GetContext,
            description: "Fetch the rules, patterns and class reference needed for a Malgn \
                          framework coding task in one call. Call this first when starting work.",
            properties: vec![
                (
                    "task",
                    json_schema_string("Task description (e.g. \"board list page\")"),
                ),
                (
                    "features",
                    json_schema_array(json_schema_enum(FEATURES, None), "Features the task needs"),
                ),
                ("table_name", json_schema_string("Table name (e.g. tb_board)")),
                (
                    "include_class_info",
                    json_schema_array(
                        json_schema_string("Class name"),
                        "Additional classes to include",
                    ),
                ),
                (
                    "include_patterns",
                    json_schema_boolean("Include code patterns (default: true)"),
                ),
                (
                    "include_rules",
                    json_schema_boolean("Include coding rules (default: true)"),
                ),
            ],
            required: &["task"],
        },
        ToolDefinition {
            kind: ToolKind::ValidateCode,
            description: "Check JSP/HTML/DAO code for Malgn framework rule violations.",
            properties: vec![
                ("code", json_schema_string("Code to validate")),
                ("file_type", json_schema_enum(FILE_TYPES, Some("File type"))),
                ("strict", json_schema_boolean("Strict mode (default: false)")),
            ],
            required: &["code", "file_type"],
        },
        ToolDefinition {
            kind: ToolKind::GetClass,
            description: "Look up the methods and usage of a Malgn framework class. \
                          Omit name to list every class.",
            properties: vec![
                (
                    "name",
                    json_schema_string(
                        "Class name (e.g. Malgn, Form, DataObject). Omit to list classes.",
                    ),
                ),
                (
                    "category",
                    json_schema_enum(CLASS_CATEGORIES, Some("Category filter for the class list")),
                ),
                ("method_filter", json_schema_string("Method name filter")),
            ],
            required: &[],
        },
        ToolDefinition {
            kind: ToolKind::GetRules,
            description: "Look up Malgn framework coding rules. A single rule can be fetched \
                          by rule_id.",
            properties: vec![
                (
                    "category",
                    json_schema_enum(
                        RULE_CATEGORIES,
                        Some("Rule category (default: all). checklist returns the code review checklist."),
                    ),
                ),
                (
                    "rule_id",
                    json_schema_string("Rule ID (e.g. naming-dao, param-invalid-method)"),
                ),
            ],
            required: &[],
        },
        ToolDefinition {
            kind: ToolKind::GetPattern,
            description: "Fetch a Malgn framework JSP/HTML/DAO code template. \
                          Omit type to list every pattern.",
            properties: vec![(
                "type",
                json_schema_enum(PATTERN_TYPES, Some("Pattern type. Omit to list patterns.")),
            )],
            required: &[],
        },
        ToolDefinition {
            kind: ToolKind::GetDoc,
            description: "Read a Malgn framework document. Omit slug to list every document.",
            properties: vec![(
                "slug",
                json_schema_string("Document slug (e.g. database, template). Omit to list documents."),
            )],
            required: &[],
        },
        ToolDefinition {
            kind: ToolKind::SearchDocs,
            description: "Search the Malgn framework documentation.",
            properties: vec![
                ("query", json_schema_string("Search term")),
                ("limit", json_schema_number("Maximum number of results (default: 10)")),
            ],
            required: &["query"],
        },
    ]
}
