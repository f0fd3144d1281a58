// Markdown rendering of tool results for LLM clients

use malgn_core::{
    Checklist, ClassIndex, ClassInfo, ClassListing, ClassSummary, Diagnostic, DocIndex, DocRecord,
    DocSearchResult, PatternIndex, PatternRecord, RuleRecord, RuleSet, Severity, TaskContext,
    ValidationResult, ValidationStatus,
};

use crate::tools::ToolOutput;

/// Render a tool result as markdown text
pub fn render(output: &ToolOutput) -> String {
    let mut out = Lines::default();
    match output {
        ToolOutput::NotFound(not_found) => return format!("[ERROR] {}", not_found.error),
        ToolOutput::Context(ctx) => context(&mut out, ctx),
        ToolOutput::Validation(result) => validation(&mut out, result),
        ToolOutput::ClassIndex(index) => class_index(&mut out, index),
        ToolOutput::ClassListing(listing) => class_listing(&mut out, listing),
        ToolOutput::Class(class) => class_detail(&mut out, class),
        ToolOutput::Rules(rules) => rule_list(&mut out, rules),
        ToolOutput::Checklist(checklist) => checklist_sections(&mut out, checklist),
        ToolOutput::PatternIndex(index) => pattern_index(&mut out, index),
        ToolOutput::Pattern(pattern) => pattern_detail(&mut out, pattern, "##"),
        ToolOutput::DocIndex(index) => doc_index(&mut out, index),
        ToolOutput::Doc(doc) => doc_detail(&mut out, doc),
        ToolOutput::DocSearch(result) => doc_search(&mut out, result),
    }
    out.finish()
}

#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    /// Blank line followed by `line`
    fn section(&mut self, line: impl Into<String>) {
        self.0.push(String::new());
        self.0.push(line.into());
    }

    fn code_block(&mut self, label: &str, lang: &str, body: &str) {
        self.section(label);
        self.push(format!("```{lang}"));
        self.push(body);
        self.push("```");
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

// get_context

fn context(out: &mut Lines, ctx: &TaskContext) {
    out.push(format!("# Task context: {}", ctx.task));
    let bundle = &ctx.context;

    if let Some(rules) = &bundle.rules {
        if !rules.critical.is_empty() {
            out.section("## Required rules (error)");
            rules.critical.iter().for_each(|r| rule_bullet(out, r));
        }
        if !rules.relevant.is_empty() {
            out.section("## Related rules (warning)");
            rules.relevant.iter().for_each(|r| rule_bullet(out, r));
        }
    }

    if !bundle.class_info.is_empty() {
        out.section("## Class reference");
        for (name, info) in &bundle.class_info {
            out.section(format!("### {name}"));
            out.push(format!("> {}", info.description));
            if !info.key_methods.is_empty() {
                out.push("");
                for method in &info.key_methods {
                    out.push(format!("- `{method}`"));
                }
            }
        }
    }

    if let Some(patterns) = bundle.patterns.as_ref().filter(|p| !p.is_empty()) {
        out.section("## Code patterns");
        for pattern in patterns.values() {
            pattern_detail(out, pattern, "###");
        }
    }

    if !bundle.checklist.is_empty() {
        out.section("## Checklist");
        for item in &bundle.checklist {
            out.push(format!("- [ ] {item}"));
        }
    }
}

fn rule_bullet(out: &mut Lines, rule: &RuleRecord) {
    out.push(format!("- **[{}]** {}", rule.id, rule.rule));
    if let Some(correct) = &rule.correct {
        out.push(format!("  - O: `{correct}`"));
    }
    if let Some(incorrect) = &rule.incorrect {
        out.push(format!("  - X: `{incorrect}`"));
    }
}

// validate_code

fn validation(out: &mut Lines, result: &ValidationResult) {
    let status = match result.status {
        ValidationStatus::Ok => "OK",
        ValidationStatus::Error => "ERROR",
    };
    out.push(format!("# Validation result: {status}"));

    let summary = &result.summary;
    let counts: Vec<String> = [
        ("errors", summary.errors),
        ("warnings", summary.warnings),
        ("info", summary.info),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .map(|(label, n)| format!("{label}: {n}"))
    .collect();

    if counts.is_empty() {
        out.push(format!("{} issue(s)", result.total_issues));
    } else {
        out.push(format!("{} issue(s) ({})", result.total_issues, counts.join(", ")));
    }

    if result.issues.is_empty() {
        out.section("No violations found.");
        return;
    }

    for (severity, heading) in [
        (Severity::Error, "## ERRORS"),
        (Severity::Warning, "## WARNINGS"),
        (Severity::Info, "## INFO"),
    ] {
        let group: Vec<&Diagnostic> = result
            .issues
            .iter()
            .filter(|d| d.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.section(heading);
        for diagnostic in group {
            out.push(format!(
                "- Line {} [{}] {}",
                diagnostic.line, diagnostic.code, diagnostic.message
            ));
            if let Some(suggestion) = &diagnostic.suggestion {
                out.push(format!("  -> {suggestion}"));
            }
        }
    }
}

// get_class

fn class_index(out: &mut Lines, index: &ClassIndex) {
    out.push(format!("# Malgn framework classes ({})", index.total));
    for (category, names) in &index.categories {
        out.section(format!("## {category} ({})", names.len()));
        for class in index.classes.iter().filter(|c| &c.category == category) {
            class_line(out, class);
        }
    }
    out.section("Details: get_class(name: \"ClassName\")");
}

fn class_listing(out: &mut Lines, listing: &ClassListing) {
    out.push(format!("# Malgn framework classes ({})", listing.total));
    for class in &listing.classes {
        class_line(out, class);
    }
    out.section("Details: get_class(name: \"ClassName\")");
}

fn class_line(out: &mut Lines, class: &ClassSummary) {
    out.push(format!(
        "- `{}` ({}) - {} [{} methods]",
        class.name, class.variable_name, class.description, class.method_count
    ));
}

fn class_detail(out: &mut Lines, class: &ClassInfo) {
    out.push(format!("# {} ({})", class.name, class.full_class_name));
    out.push(format!("> {}", class.description));
    out.push("");

    let mut meta = vec![format!("Variable: `{}`", class.variable_name)];
    if let Some(init) = &class.initialization {
        meta.push(format!("Initialization: `{init}`"));
    }
    if let Some(location) = &class.initialized_in {
        meta.push(format!("Initialized in: {location}"));
    }
    out.push(meta.join(" | "));

    if class.methods.is_empty() {
        return;
    }

    out.section(format!("## Methods ({})", class.methods.len()));
    for method in &class.methods {
        out.section(format!("### {}", method.signature));
        out.push(method.description.as_str());
        if let Some(usage) = &method.usage {
            out.push(format!("- Usage: `{usage}`"));
        }
        if let Some(notes) = &method.notes {
            out.push(format!("- Note: {notes}"));
        }
        if !method.related.is_empty() {
            out.push(format!("- Related: {}", method.related.join(", ")));
        }
    }
}

// get_rules

fn checklist_sections(out: &mut Lines, checklist: &Checklist) {
    out.push("# Code review checklist");
    for section in &checklist.sections {
        out.section(format!("## {}", section.title));
        for item in &section.items {
            let tag = match item.severity {
                Severity::Error => "MUST",
                Severity::Warning => "SHOULD",
                Severity::Info => "TIP",
            };
            out.push(format!("- [{tag}] {}", item.text));
        }
    }
}

fn rule_list(out: &mut Lines, rules: &RuleSet) {
    out.push(format!("# Coding rules ({})", rules.total));
    if rules.rules.is_empty() {
        out.section("No rules.");
        return;
    }

    for rule in &rules.rules {
        let tag = match rule.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        out.section(format!("## [{tag}] {} ({})", rule.title, rule.id));
        out.push(format!("- Rule: {}", rule.rule));
        if let Some(correct) = &rule.correct {
            out.push(format!("- Correct: `{correct}`"));
        }
        if let Some(incorrect) = &rule.incorrect {
            out.push(format!("- Incorrect: `{incorrect}`"));
        }
    }
}

// get_pattern

fn pattern_index(out: &mut Lines, index: &PatternIndex) {
    out.push(format!("# Code patterns ({})", index.total));
    for (category, entries) in &index.categories {
        out.section(format!("## {}", category.to_uppercase()));
        for entry in entries {
            out.push(format!(
                "- `{}` - {}: {}",
                entry.pattern_type, entry.title, entry.description
            ));
        }
    }
    out.section("Details: get_pattern(type: \"pattern-type\")");
}

/// `level` is the heading level of the pattern title; sub-headings go one deeper
fn pattern_detail(out: &mut Lines, pattern: &PatternRecord, level: &str) {
    let sub = format!("{level}#");
    if level == "##" {
        out.push(format!("# Pattern: {} ({})", pattern.pattern_type, pattern.title));
    } else {
        out.section(format!("{level} {}: {}", pattern.pattern_type, pattern.title));
    }

    if !pattern.variables.is_empty() {
        out.section(format!("{sub} Variables"));
        for (name, var) in &pattern.variables {
            out.push(format!("- `{name}`: {} (e.g. {})", var.description, var.example));
        }
    }
    if let Some(jsp) = &pattern.jsp_template {
        out.code_block(&format!("{sub} JSP template"), "jsp", jsp);
    }
    if let Some(html) = &pattern.html_template {
        out.code_block(&format!("{sub} HTML template"), "html", html);
    }
    if let Some(code) = &pattern.code {
        out.code_block(&format!("{sub} Code"), "java", code);
    }
    if !pattern.notes.is_empty() {
        out.section(format!("{sub} Notes"));
        for note in &pattern.notes {
            out.push(format!("- {note}"));
        }
    }
}

// get_doc / search_docs

fn doc_index(out: &mut Lines, index: &DocIndex) {
    out.push(format!("# Malgn framework documents ({})", index.total));
    for (category, docs) in &index.categories {
        out.section(format!("## {category}"));
        for doc in docs {
            out.push(format!("- `{}` - {}", doc.slug, doc.title));
        }
    }
    out.section("Details: get_doc(slug: \"doc-slug\")");
}

fn doc_detail(out: &mut Lines, doc: &DocRecord) {
    out.push(format!("[slug: {} | category: {}]", doc.slug, doc.category));

    if !doc.content.is_empty() {
        out.section(doc.content.as_str());
        return;
    }

    out.section(format!("# {}", doc.title));
    for section in &doc.sections {
        out.section(format!("## {}", section.heading));
        out.push(section.content.as_str());
    }
}

fn doc_search(out: &mut Lines, result: &DocSearchResult) {
    out.push(format!(
        "# Document search: \"{}\" ({} shown / {} total)",
        result.query,
        result.results.len(),
        result.total
    ));

    if result.results.is_empty() {
        out.section("No results.");
        return;
    }

    for (i, hit) in result.results.iter().enumerate() {
        out.section(format!(
            "{}. **{}** [slug: `{}`, category: {}]",
            i + 1,
            hit.title,
            hit.slug,
            hit.category
        ));
        if !hit.excerpt.is_empty() {
            out.push(format!("   > {}", hit.excerpt));
        }
    }
    out.section("Details: get_doc(slug: \"slug\")");
}
