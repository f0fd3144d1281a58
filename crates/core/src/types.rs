// Shared types for the Malgn knowledge base and the code validation engine

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Severity of a rule or diagnostic
///
/// Only `Error` blocks acceptance of analysed code; `Warning` and `Info` are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of source file submitted for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Jsp,
    Html,
    Dao,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Jsp => "jsp",
            FileType::Html => "html",
            FileType::Dao => "dao",
        }
    }
}

impl FromStr for FileType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jsp" => Ok(FileType::Jsp),
            "html" => Ok(FileType::Html),
            "dao" => Ok(FileType::Dao),
            other => Err(CoreError::UnknownFileType(other.to_string())),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Validation output

/// One reported rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line of the match start
    pub line: usize,
    pub severity: Severity,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Verdict for analysed code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Ok,
    Error,
}

/// Diagnostic counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Summary {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub total_issues: usize,
    pub issues: Vec<Diagnostic>,
    pub summary: Summary,
}

// Knowledge records

/// A framework class with its method reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(rename = "fullClassName")]
    pub full_class_name: String,
    pub category: String,
    pub description: String,
    pub variable_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialized_in: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub signature: String,
    pub description: String,
    #[serde(rename = "returnType", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// Summary row in the class index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub name: String,
    pub category: String,
    pub description: String,
    pub variable_name: String,
    pub method_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassIndex {
    pub total: usize,
    pub categories: IndexMap<String, Vec<String>>,
    pub classes: Vec<ClassSummary>,
}

/// Class index narrowed to one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassListing {
    pub total: usize,
    pub classes: Vec<ClassSummary>,
}

/// A prose documentation page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRecord {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub sections: Vec<DocSection>,
    #[serde(default)]
    pub related_docs: Vec<String>,
    #[serde(default)]
    pub related_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocIndex {
    pub total: usize,
    pub categories: IndexMap<String, Vec<DocEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSearchHit {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSearchResult {
    pub query: String,
    pub total: usize,
    pub results: Vec<DocSearchHit>,
}

/// A human-readable coding rule (not a validation matcher)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: String,
    pub category: String,
    pub severity: Severity,
    pub title: String,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub total: usize,
    pub rules: Vec<RuleRecord>,
}

/// Code-review checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub sections: Vec<ChecklistSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub severity: Severity,
}

/// A code-generation template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRecord {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub variables: BTreeMap<String, PatternVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsp_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternVariable {
    pub description: String,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEntry {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternIndex {
    pub total: usize,
    pub categories: IndexMap<String, Vec<PatternEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        let parsed: Severity = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(parsed, Severity::Info);
    }

    #[test]
    fn test_file_type_parsing() {
        assert_eq!("dao".parse::<FileType>().unwrap(), FileType::Dao);
        assert!("php".parse::<FileType>().is_err());
    }

    #[test]
    fn test_summary_record() {
        let mut summary = Summary::default();
        summary.record(Severity::Error);
        summary.record(Severity::Info);
        summary.record(Severity::Info);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 0);
        assert_eq!(summary.info, 2);
        assert_eq!(summary.total(), 3);
    }
}
