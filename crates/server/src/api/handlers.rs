use super::{ApiError, ApiResult};
use crate::config::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use malgn_core::ContextRequest;
use malgn_mcp::tools::args::{
    GetClassArgs, GetDocArgs, GetPatternArgs, GetRulesArgs, SearchDocsArgs, ValidateCodeArgs,
};
use malgn_mcp::tools::ToolOutput;
use malgn_mcp::ToolCallError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Map a not-found payload to 404
fn found(output: ToolOutput) -> ApiResult<Json<ToolOutput>> {
    match output {
        ToolOutput::NotFound(not_found) => Err(ApiError::not_found(not_found.error)),
        output => Ok(Json(output)),
    }
}

fn required_text(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
pub struct ClassQuery {
    pub category: Option<String>,
}

/// List classes, optionally narrowed to one category
pub async fn list_classes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClassQuery>,
) -> Json<ToolOutput> {
    Json(state.mcp.executor().get_class(&GetClassArgs {
        category: query.category,
        ..Default::default()
    }))
}

#[derive(Debug, Deserialize)]
pub struct MethodQuery {
    pub method: Option<String>,
}

/// Get a class, optionally filtering its methods by name
pub async fn get_class(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<MethodQuery>,
) -> ApiResult<Json<ToolOutput>> {
    found(state.mcp.executor().get_class(&GetClassArgs {
        name: Some(name),
        method_filter: query.method,
        ..Default::default()
    }))
}

pub async fn list_docs(State(state): State<Arc<AppState>>) -> Json<ToolOutput> {
    Json(state.mcp.executor().get_doc(&GetDocArgs::default()))
}

pub async fn get_doc(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ToolOutput>> {
    found(state.mcp.executor().get_doc(&GetDocArgs { slug: Some(slug) }))
}

/// Search docs by title or slug
pub async fn search_docs(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ToolOutput>> {
    let query = required_text(&body, "query").ok_or_else(|| ApiError::bad_request("query is required"))?;
    let args = SearchDocsArgs {
        query,
        limit: body.get("limit").and_then(Value::as_f64),
    };
    Ok(Json(state.mcp.executor().search_docs(&args)))
}

#[derive(Debug, Deserialize)]
pub struct RuleQuery {
    pub category: Option<String>,
}

pub async fn list_rules(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RuleQuery>,
) -> ApiResult<Json<ToolOutput>> {
    found(state.mcp.executor().get_rules(&GetRulesArgs {
        category: query.category,
        rule_id: None,
    }))
}

pub async fn get_checklist(State(state): State<Arc<AppState>>) -> Json<ToolOutput> {
    Json(state.mcp.executor().get_rules(&GetRulesArgs {
        category: Some("checklist".to_string()),
        rule_id: None,
    }))
}

pub async fn list_patterns(State(state): State<Arc<AppState>>) -> Json<ToolOutput> {
    Json(state.mcp.executor().get_pattern(&GetPatternArgs::default()))
}

pub async fn get_pattern(
    State(state): State<Arc<AppState>>,
    Path(pattern_type): Path<String>,
) -> ApiResult<Json<ToolOutput>> {
    found(state.mcp.executor().get_pattern(&GetPatternArgs {
        pattern_type: Some(pattern_type),
    }))
}

/// Assemble the context for a coding task
pub async fn build_context(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ToolOutput>> {
    if required_text(&body, "task").is_none() {
        return Err(ApiError::bad_request("task is required"));
    }

    let request: ContextRequest =
        serde_json::from_value(body).map_err(|err| ApiError::bad_request(err.to_string()))?;
    Ok(Json(state.mcp.executor().get_context(&request)))
}

/// Validate a code snippet
pub async fn validate_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ToolOutput>> {
    let (Some(code), Some(file_type)) = (
        required_text(&body, "code"),
        required_text(&body, "file_type"),
    ) else {
        return Err(ApiError::bad_request("code and file_type are required"));
    };

    let args = ValidateCodeArgs {
        code,
        file_type,
        strict: body.get("strict").and_then(Value::as_bool),
    };

    state
        .mcp
        .executor()
        .validate_code(&args)
        .map(Json)
        .map_err(|err| match err {
            ToolCallError::Internal(_) => ApiError::from(anyhow::Error::new(err)),
            other => ApiError::bad_request(other.to_string()),
        })
}
