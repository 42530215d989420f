//! Component read handlers. Every route funnels into `dispatch`, which applies the
//! method gate and the id > category+brand > category > all precedence.

use crate::error::AppError;
use crate::model::{Category, ComponentPathParams, RequestShape};
use crate::response::{success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::Method,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

type PageParams = Query<HashMap<String, String>>;

fn page_token(params: &HashMap<String, String>) -> &str {
    params.get("page").map(String::as_str).unwrap_or("")
}

fn parse_id(id: &str) -> Result<i64, AppError> {
    match id.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::BadRequest(format!("invalid component id '{}'", id))),
    }
}

fn parse_category(tag: &str) -> Result<Category, AppError> {
    tag.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown category '{}'", tag)))
}

pub async fn dispatch(
    state: &AppState,
    method: Method,
    params: ComponentPathParams,
    page: &str,
) -> Result<Response, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method));
    }
    let shape = RequestShape::resolve(params);
    tracing::info!(shape = shape.name(), filter = %shape, page, "components request");
    let service = &state.components;
    let response = match shape {
        RequestShape::ById { id } => {
            let id = parse_id(&id)?;
            success_one(service.get_by_id(id).await?).into_response()
        }
        RequestShape::ByCategoryAndBrand { category, brand } => {
            let category = parse_category(&category)?;
            success_many(service.get_by_category_and_brand(category, &brand, page).await?).into_response()
        }
        RequestShape::ByCategory { category } => {
            let category = parse_category(&category)?;
            success_many(service.get_by_category(category, page).await?).into_response()
        }
        RequestShape::All => success_many(service.get_all(page).await?).into_response(),
    };
    Ok(response)
}

pub async fn list_all(State(state): State<AppState>, method: Method, Query(params): PageParams) -> Result<Response, AppError> {
    dispatch(&state, method, ComponentPathParams::default(), page_token(&params)).await
}

pub async fn list_by_category(
    State(state): State<AppState>,
    method: Method,
    Path(category): Path<String>,
    Query(params): PageParams,
) -> Result<Response, AppError> {
    let path = ComponentPathParams {
        category,
        ..Default::default()
    };
    dispatch(&state, method, path, page_token(&params)).await
}

pub async fn list_by_category_and_brand(
    State(state): State<AppState>,
    method: Method,
    Path((category, brand)): Path<(String, String)>,
    Query(params): PageParams,
) -> Result<Response, AppError> {
    let path = ComponentPathParams {
        category,
        brand,
        ..Default::default()
    };
    dispatch(&state, method, path, page_token(&params)).await
}

/// The page token is accepted but has no effect on a by-id lookup.
pub async fn get_by_id(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    Query(params): PageParams,
) -> Result<Response, AppError> {
    let path = ComponentPathParams {
        id,
        ..Default::default()
    };
    dispatch(&state, method, path, page_token(&params)).await
}
