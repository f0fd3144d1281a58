// Pattern-based code validation engine

use crate::error::CoreResult;
use crate::rules::{Rule, RuleCatalog};
use crate::types::{
    Diagnostic, FileType, Severity, Summary, ValidationResult, ValidationStatus,
};

/// Scans source text against a rule catalog
///
/// Every rule is evaluated independently over the full text. The engine keeps no
/// state between calls, so a single instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    catalog: RuleCatalog,
}

impl ValidationEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn builtin() -> CoreResult<Self> {
        Ok(Self::new(RuleCatalog::builtin()?))
    }

    /// Validate `code`. All file types currently share one catalog.
    ///
    /// Info-level rules are skipped entirely unless `strict` is set.
    pub fn validate(&self, code: &str, file_type: FileType, strict: bool) -> ValidationResult {
        let mut issues = Vec::new();

        let active = self
            .catalog
            .rules()
            .iter()
            .filter(|rule| strict || rule.severity != Severity::Info);

        for rule in active {
            for offset in rule.match_offsets(code) {
                issues.push(diagnostic(rule, line_at(code, offset)));
            }
        }

        // Stable: diagnostics on the same line keep catalog order
        issues.sort_by_key(|d| d.line);

        let mut summary = Summary::default();
        for issue in &issues {
            summary.record(issue.severity);
        }

        let status = if summary.errors > 0 {
            ValidationStatus::Error
        } else {
            ValidationStatus::Ok
        };

        tracing::debug!(
            file_type = %file_type,
            strict,
            issues = issues.len(),
            "Validated code"
        );

        ValidationResult {
            status,
            total_issues: issues.len(),
            issues,
            summary,
        }
    }
}

fn diagnostic(rule: &Rule, line: usize) -> Diagnostic {
    Diagnostic {
        line,
        severity: rule.severity,
        code: rule.code.to_string(),
        message: rule.message.to_string(),
        suggestion: rule.suggestion.map(str::to_string),
    }
}

/// 1-based line number of a byte offset
fn line_at(text: &str, offset: usize) -> usize {
    1 + text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSpec;

    fn engine() -> ValidationEngine {
        ValidationEngine::builtin().unwrap()
    }

    #[test]
    fn test_raw_parameter_is_single_error() {
        let result = engine().validate(r#"request.getParameter("id")"#, FileType::Jsp, false);

        assert_eq!(result.status, ValidationStatus::Error);
        assert_eq!(result.total_issues, 1);
        assert_eq!(result.issues[0].code, "RAW_PARAMETER");
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.issues[0].line, 1);
    }

    #[test]
    fn test_info_rules_only_in_strict_mode() {
        let code = "if(info.s(\"name\") == null) { }";

        let relaxed = engine().validate(code, FileType::Jsp, false);
        assert_eq!(relaxed.total_issues, 0);
        assert_eq!(relaxed.status, ValidationStatus::Ok);

        let strict = engine().validate(code, FileType::Jsp, true);
        assert_eq!(strict.total_issues, 1);
        assert_eq!(strict.issues[0].severity, Severity::Info);
        assert_eq!(strict.summary.info, 1);
        assert_eq!(strict.status, ValidationStatus::Ok);
    }

    #[test]
    fn test_one_diagnostic_per_match() {
        let code = "int a = m.getInt(\"a\");\nint b = m.getInt(\"b\");\n";
        let result = engine().validate(code, FileType::Jsp, false);

        let lines: Vec<_> = result.issues.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(result.issues.iter().all(|d| d.code == "INVALID_METHOD"));
    }

    #[test]
    fn test_line_numbers_count_preceding_newlines() {
        let code = "<%\n\n\nString id = request.getParameter(\"id\");\n%>";
        let result = engine().validate(code, FileType::Jsp, false);
        assert_eq!(result.issues[0].line, 4);
    }

    #[test]
    fn test_warnings_do_not_escalate_status() {
        let code = "if(m.rs(\"name\") != null) { }";
        let result = engine().validate(code, FileType::Jsp, false);

        assert_eq!(result.summary.warnings, 1);
        assert_eq!(result.summary.errors, 0);
        assert_eq!(result.status, ValidationStatus::Ok);
    }

    #[test]
    fn test_overlapping_rules_both_fire() {
        let specs = [
            RuleSpec {
                pattern: r"foo",
                code: "FIRST",
                severity: Severity::Warning,
                message: "first",
                suggestion: None,
            },
            RuleSpec {
                pattern: r"fo+",
                code: "SECOND",
                severity: Severity::Error,
                message: "second",
                suggestion: Some("fix"),
            },
        ];
        let engine = ValidationEngine::new(RuleCatalog::from_specs(&specs).unwrap());
        let result = engine.validate("bar\nfoo", FileType::Html, false);

        let codes: Vec<_> = result.issues.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["FIRST", "SECOND"]);
        assert!(result.issues.iter().all(|d| d.line == 2));
    }

    #[test]
    fn test_issues_sorted_by_line() {
        let code = "<%= title %>\nUserDao userDao = new UserDao();\nString x = m.getString(\"x\");\n<%@ page import=\"java.util.*\" %>";
        let result = engine().validate(code, FileType::Jsp, true);

        assert!(result.issues.windows(2).all(|w| w[0].line <= w[1].line));
        assert_eq!(
            result.summary.errors + result.summary.warnings + result.summary.info,
            result.total_issues
        );
        assert_eq!(result.total_issues, result.issues.len());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let code = "try { user.insert(); } catch (Exception e) { }\nDataSet ds = user.find(\"id = ?\");";
        let engine = engine();
        let first = engine.validate(code, FileType::Dao, true);
        let second = engine.validate(code, FileType::Dao, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clean_code_passes() {
        let code = "DataSet info = user.find(\"id = ?\", new Object[]{id});\nif(info.next()) {\n  p.setVar(info);\n}";
        let result = engine().validate(code, FileType::Jsp, true);
        assert_eq!(result.total_issues, 0);
        assert_eq!(result.status, ValidationStatus::Ok);
    }
}
