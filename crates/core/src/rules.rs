// Anti-pattern rule catalog used by the validation engine

use crate::error::{CoreError, CoreResult};
use crate::types::Severity;
use regex::Regex;

/// Static description of a rule before its pattern is compiled
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub pattern: &'static str,
    pub code: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: Option<&'static str>,
}

/// A compiled detection rule
#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Regex,
    pub code: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: Option<&'static str>,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> CoreResult<Self> {
        let matcher = Regex::new(spec.pattern).map_err(|source| CoreError::InvalidPattern {
            code: spec.code.to_string(),
            source,
        })?;

        Ok(Self {
            matcher,
            code: spec.code,
            severity: spec.severity,
            message: spec.message,
            suggestion: spec.suggestion,
        })
    }

    /// Byte offsets of every non-overlapping match in `text`
    pub fn match_offsets<'a>(&'a self, text: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.matcher.find_iter(text).map(|m| m.start())
    }
}

/// Ordered list of rules; order only breaks ties between diagnostics on the same line
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn from_specs(specs: &[RuleSpec]) -> CoreResult<Self> {
        let rules = specs.iter().map(Rule::compile).collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The framework's built-in anti-pattern catalog
    pub fn builtin() -> CoreResult<Self> {
        let catalog = Self::from_specs(BUILTIN_RULES)?;
        tracing::debug!("Compiled {} validation rules", catalog.len());
        Ok(catalog)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

const BUILTIN_RULES: &[RuleSpec] = &[
    // Methods that do not exist on Malgn
    RuleSpec {
        pattern: r"\bm\.getInt\s*\(",
        code: "INVALID_METHOD",
        severity: Severity::Error,
        message: "m.getInt() does not exist.",
        suggestion: Some("Use m.ri()."),
    },
    RuleSpec {
        pattern: r"\bm\.getString\s*\(",
        code: "INVALID_METHOD",
        severity: Severity::Error,
        message: "m.getString() does not exist.",
        suggestion: Some("Use m.rs()."),
    },
    RuleSpec {
        pattern: r"\bm\.isSet\s*\(",
        code: "INVALID_METHOD",
        severity: Severity::Error,
        message: "m.isSet() does not exist.",
        suggestion: Some("Read the value with m.rs() and check !\"\".equals(value)."),
    },
    RuleSpec {
        pattern: r"\bm\.getParameter\s*\(",
        code: "INVALID_METHOD",
        severity: Severity::Error,
        message: "Do not use m.getParameter().",
        suggestion: Some("Use m.rs() or m.ri()."),
    },
    RuleSpec {
        pattern: r"\brequest\.getParameter\s*\(",
        code: "RAW_PARAMETER",
        severity: Severity::Error,
        message: "Direct use of request.getParameter() is forbidden.",
        suggestion: Some("GET: m.rs()/m.ri(), POST: f.get()/f.getInt()."),
    },
    // Naming
    RuleSpec {
        pattern: r"\b[A-Z]\w*Dao\s+[a-z]\w*Dao\s*=",
        code: "NAMING_VIOLATION",
        severity: Severity::Error,
        message: "Do not add a 'Dao' suffix to DAO variable names.",
        suggestion: Some("Write UserDao user = new UserDao();"),
    },
    RuleSpec {
        pattern: r"\bDataSet\s+ds\s*=",
        code: "NAMING_VIOLATION",
        severity: Severity::Error,
        message: "Do not name a DataSet variable 'ds'.",
        suggestion: Some("Single row: info/data, multiple rows: list or xxxList."),
    },
    // Security
    RuleSpec {
        pattern: r#"query\s*\(\s*"[^"]*'\s*\+"#,
        code: "SQL_INJECTION",
        severity: Severity::Error,
        message: "Concatenating values into SQL strings risks SQL injection.",
        suggestion: Some("Bind parameters: query(\"WHERE id = ?\", new Object[]{id})."),
    },
    // Structure
    RuleSpec {
        pattern: r"<%@\s*page\s+import\s*=",
        code: "FORBIDDEN_IMPORT",
        severity: Severity::Error,
        message: "Per-page imports are forbidden in JSP.",
        suggestion: Some("Only use the imports provided by init.jsp."),
    },
    RuleSpec {
        pattern: r"(?s)\btry\s*\{.*?catch\s*\(",
        code: "TRY_CATCH",
        severity: Severity::Error,
        message: "try-catch is forbidden; failures are reported through boolean returns.",
        suggestion: Some("if(user.insert()) { ... } else { m.jsError(user.getErrMsg()); }"),
    },
    // Templates
    RuleSpec {
        pattern: r"<%=",
        code: "SCRIPTLET_OUTPUT",
        severity: Severity::Error,
        message: "JSP expression tags are forbidden.",
        suggestion: Some("Use {{variable}} in the HTML template."),
    },
    // Page call order
    RuleSpec {
        pattern: r"(?s)\bp\.setVar\([^)]*\).*?\bp\.setBody\(",
        code: "PAGE_ORDER",
        severity: Severity::Error,
        message: "p.setVar() is called before p.setBody().",
        suggestion: Some("Order: setLayout() -> setBody() -> setVar() -> setLoop() -> display()"),
    },
    // Null checks on values that are never null
    RuleSpec {
        pattern: r"\binfo\.s\([^)]+\)\s*!=\s*null",
        code: "UNNECESSARY_NULL_CHECK",
        severity: Severity::Warning,
        message: "DataSet.s() never returns null.",
        suggestion: Some("Use the value directly without a condition."),
    },
    RuleSpec {
        pattern: r"\bm\.rs\([^)]+\)\s*!=\s*null",
        code: "UNNECESSARY_NULL_CHECK",
        severity: Severity::Warning,
        message: "m.rs() never returns null.",
        suggestion: Some("An empty-string check is not needed either."),
    },
    // DataSet read without next()
    RuleSpec {
        pattern: r"=\s*\w+\.(find|get|query)\([^)]*\)\s*;\s*\n[^\n]*\w+\.s\(",
        code: "MISSING_NEXT",
        severity: Severity::Error,
        message: "DataSet data is read without calling next().",
        suggestion: Some("if(info.next()) { ... } or while(list.next()) { ... }"),
    },
    // AJAX
    RuleSpec {
        pattern: r#"(?s)data-ajax\s*=\s*"true".*?m\.jsReplace"#,
        code: "AJAX_REDIRECT",
        severity: Severity::Error,
        message: "m.jsReplace() has no effect in an AJAX form.",
        suggestion: Some("Respond with j.success() / j.error()."),
    },
    RuleSpec {
        pattern: r"\.moveRow\s*\(",
        code: "INVALID_METHOD",
        severity: Severity::Error,
        message: "moveRow() does not exist.",
        suggestion: Some("setLoop() resets the cursor automatically."),
    },
    // Strict mode only
    RuleSpec {
        pattern: r"\b\w+\.s\([^)]*\)\s*==\s*null",
        code: "REDUNDANT_NULL_CHECK",
        severity: Severity::Info,
        message: "DataSet.s() returns an empty string instead of null; this comparison is always false.",
        suggestion: Some("Compare with \"\".equals(...) or drop the check."),
    },
];
