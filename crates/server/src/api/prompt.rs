// Plain-text API guide for LLM agents that talk to the REST mirrors

use super::ApiResult;
use crate::config::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use std::fmt::Write;
use std::sync::Arc;

/// GET /prompt
pub async fn usage_prompt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    let pattern_types: Vec<&str> = state
        .mcp
        .executor()
        .knowledge()
        .pattern_index()
        .categories
        .values()
        .flatten()
        .map(|entry| entry.pattern_type.as_str())
        .collect();

    let text = render(&format!("http://{host}"), &pattern_types)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

fn render(base_url: &str, pattern_types: &[&str]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# Malgn Framework MCP API")?;
    writeln!(out)?;
    writeln!(out, "This project uses the Malgn framework (malgnsoft).")?;
    writeln!(
        out,
        "Call the endpoints below to look up rules, class reference and code patterns while coding."
    )?;
    writeln!(out)?;
    writeln!(out, "Base URL: {base_url}")?;
    writeln!(out)?;

    writeln!(out, "## Recommended workflow")?;
    writeln!(out)?;
    writeln!(out, "1. Start every task with `POST /context` to fetch rules, patterns and classes at once")?;
    writeln!(out, "2. Use `GET /classes/{{name}}` when you need a class's methods")?;
    writeln!(out, "3. Check finished code with `POST /validate`")?;
    writeln!(out)?;

    writeln!(out, "## POST /context")?;
    writeln!(out, "Rules, patterns and class reference for a task. **Call this first.**")?;
    writeln!(out, "```json")?;
    writeln!(
        out,
        r#"{{ "task": "required", "features": ["list","insert","modify","delete","view","search","paging","ajax","restapi","upload","auth"], "table_name": "tb_board", "include_class_info": ["DataObject"], "include_patterns": true, "include_rules": true }}"#
    )?;
    writeln!(out, "```")?;
    writeln!(out)?;

    writeln!(out, "## GET /classes")?;
    writeln!(out, "Class list. Filter with `?category=core|data|web|util|security`.")?;
    writeln!(out)?;
    writeln!(out, "## GET /classes/{{name}}")?;
    writeln!(out, "Class detail. Filter methods with `?method=keyword`.")?;
    writeln!(out)?;

    writeln!(out, "## GET /rules")?;
    writeln!(
        out,
        "Coding rules. Filter with `?category=naming|structure|template|parameter|data|postback|message|ajax|security|style`."
    )?;
    writeln!(out)?;
    writeln!(out, "## GET /rules/checklist")?;
    writeln!(out, "Code review checklist.")?;
    writeln!(out)?;

    writeln!(out, "## GET /patterns")?;
    writeln!(out, "Code pattern list. Available types: {}", pattern_types.join(", "))?;
    writeln!(out)?;
    writeln!(out, "## GET /patterns/{{type}}")?;
    writeln!(out, "Pattern detail with JSP, HTML or DAO template code.")?;
    writeln!(out)?;

    writeln!(out, "## GET /docs")?;
    writeln!(out, "Document list.")?;
    writeln!(out)?;
    writeln!(out, "## GET /docs/{{slug}}")?;
    writeln!(out, "Full document.")?;
    writeln!(out)?;
    writeln!(out, "## POST /docs/search")?;
    writeln!(out, "```json")?;
    writeln!(out, r#"{{ "query": "required", "limit": 10 }}"#)?;
    writeln!(out, "```")?;
    writeln!(out)?;

    writeln!(out, "## POST /validate")?;
    writeln!(out, "```json")?;
    writeln!(
        out,
        r#"{{ "code": "required", "file_type": "jsp|html|dao", "strict": false }}"#
    )?;
    writeln!(out, "```")?;
    writeln!(out, "`status` is `error` when any error-level rule fires; warnings and info are advisory.")?;
    writeln!(out)?;

    writeln!(out, "## MCP")?;
    writeln!(out, "MCP clients can use the same data through JSON-RPC 2.0 at `POST /mcp`.")?;

    Ok(out)
}
