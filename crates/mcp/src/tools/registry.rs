// Tool registry: the fixed set of tools and their argument contracts

use crate::protocol::{InputSchema, PropertySchema, ToolSchema};

/// The tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetContext,
    ValidateCode,
    GetClass,
    GetRules,
    GetPattern,
    GetDoc,
    SearchDocs,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::GetContext => "get_context",
            ToolKind::ValidateCode => "validate_code",
            ToolKind::GetClass => "get_class",
            ToolKind::GetRules => "get_rules",
            ToolKind::GetPattern => "get_pattern",
            ToolKind::GetDoc => "get_doc",
            ToolKind::SearchDocs => "search_docs",
        }
    }
}

/// A tool's description and argument contract
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub kind: ToolKind,
    pub description: &'static str,
    pub properties: Vec<(&'static str, PropertySchema)>,
    pub required: &'static [&'static str],
}

impl ToolDefinition {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Declared parameter names, in declaration order
    pub fn parameter_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|(name, _)| *name)
    }

    pub fn accepts(&self, parameter: &str) -> bool {
        self.parameter_names().any(|name| name == parameter)
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name(),
            description: self.description,
            input_schema: InputSchema {
                properties: self.properties.clone(),
                required: self.required,
            },
        }
    }
}

/// Tool registry, built once and shared read-only
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<ToolDefinition>) -> Self {
        Self { tools }
    }

    /// Registry holding every built-in tool
    pub fn builtin() -> Self {
        Self::new(super::definitions::builtin_tools())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(ToolDefinition::schema).collect()
    }

    /// Check if a tool exists
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_string(description: &'static str) -> PropertySchema {
    PropertySchema {
        kind: "string",
        items: None,
        allowed: None,
        description: Some(description),
    }
}

pub fn json_schema_enum(
    values: &'static [&'static str],
    description: Option<&'static str>,
) -> PropertySchema {
    PropertySchema {
        kind: "string",
        items: None,
        allowed: Some(values),
        description,
    }
}

pub fn json_schema_number(description: &'static str) -> PropertySchema {
    PropertySchema {
        kind: "number",
        items: None,
        allowed: None,
        description: Some(description),
    }
}

pub fn json_schema_boolean(description: &'static str) -> PropertySchema {
    PropertySchema {
        kind: "boolean",
        items: None,
        allowed: None,
        description: Some(description),
    }
}

pub fn json_schema_array(items: PropertySchema, description: &'static str) -> PropertySchema {
    PropertySchema {
        kind: "array",
        items: Some(Box::new(items)),
        allowed: None,
        description: Some(description),
    }
}
