//! Document CRUD and query endpoints.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::infra::db::require_db;
use crate::repos::documents::{Document, DocumentFilter, DocumentPatch, NewDocument};
use crate::services::documents as document_service;
use crate::state::app_state::AppState;

const MAX_TYPE_LEN: usize = 100;
const MAX_OWNER_LEN: usize = 100;
const MAX_NUMBER_LEN: usize = 50;

const DEFAULT_LIST_LIMIT: u64 = 100;
const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub document_type: String,
    pub document_owner: String,
    pub document_number: String,
    #[serde(with = "crate::http::dates")]
    pub expiry_date: Date,
    #[serde(with = "crate::http::dates")]
    pub action_due_date: Date,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_owner: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default, with = "crate::http::dates::option")]
    pub expiry_date: Option<Date>,
    #[serde(default, with = "crate::http::dates::option")]
    pub action_due_date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: i64,
    pub document_type: String,
    pub document_owner: String,
    pub document_number: String,
    #[serde(with = "crate::http::dates")]
    pub expiry_date: Date,
    #[serde(with = "crate::http::dates")]
    pub action_due_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            document_type: doc.document_type,
            document_owner: doc.document_owner,
            document_number: doc.document_number,
            expiry_date: doc.expiry_date,
            action_due_date: doc.action_due_date,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_list_limit")]
    pub limit: u64,
    pub document_type: Option<String>,
    pub document_owner: Option<String>,
}

fn default_list_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    #[serde(default = "default_expiry_window")]
    pub days: i64,
}

fn default_expiry_window() -> i64 {
    DEFAULT_EXPIRY_WINDOW_DAYS
}

#[derive(Debug, Serialize)]
pub struct ExpiringResponse {
    pub expiring_documents: Vec<DocumentResponse>,
    pub count: usize,
    pub days_ahead: i64,
}

fn check_field(name: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(
            "FIELD_REQUIRED",
            format!("{name} must not be empty"),
        ));
    }
    if value.chars().count() > max_len {
        return Err(AppError::invalid(
            "FIELD_TOO_LONG",
            format!("{name} must be at most {max_len} characters"),
        ));
    }
    Ok(())
}

async fn create_document(
    state: web::Data<AppState>,
    _user: CurrentUser,
    body: web::Json<CreateDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    check_field("document_type", &body.document_type, MAX_TYPE_LEN)?;
    check_field("document_owner", &body.document_owner, MAX_OWNER_LEN)?;
    check_field("document_number", &body.document_number, MAX_NUMBER_LEN)?;

    let db = require_db(&state)?;
    let created = document_service::create_document(
        db,
        NewDocument {
            document_type: body.document_type,
            document_owner: body.document_owner,
            document_number: body.document_number,
            expiry_date: body.expiry_date,
            action_due_date: body.action_due_date,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(DocumentResponse::from(created)))
}

async fn list_documents(
    state: web::Data<AppState>,
    _user: CurrentUser,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let db = require_db(&state)?;

    let docs = document_service::list_documents(
        db,
        DocumentFilter {
            document_type: query.document_type,
            document_owner: query.document_owner,
            skip: query.skip,
            limit: query.limit,
        },
    )
    .await?;

    let docs: Vec<DocumentResponse> = docs.into_iter().map(DocumentResponse::from).collect();
    Ok(HttpResponse::Ok().json(docs))
}

/// GET /documents/expiring/soon
///
/// Registered on its own path segment, so it never collides with /{id}.
async fn expiring_soon(
    state: web::Data<AppState>,
    _user: CurrentUser,
    query: web::Query<ExpiringQuery>,
) -> Result<HttpResponse, AppError> {
    let days = query.into_inner().days;
    let db = require_db(&state)?;

    let docs = document_service::find_expiring_within(db, days).await?;
    let docs: Vec<DocumentResponse> = docs.into_iter().map(DocumentResponse::from).collect();

    Ok(HttpResponse::Ok().json(ExpiringResponse {
        count: docs.len(),
        expiring_documents: docs,
        days_ahead: days,
    }))
}

async fn get_document(
    state: web::Data<AppState>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let doc = document_service::get_document(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DocumentResponse::from(doc)))
}

async fn update_document(
    state: web::Data<AppState>,
    _user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<UpdateDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    if let Some(v) = &body.document_type {
        check_field("document_type", v, MAX_TYPE_LEN)?;
    }
    if let Some(v) = &body.document_owner {
        check_field("document_owner", v, MAX_OWNER_LEN)?;
    }
    if let Some(v) = &body.document_number {
        check_field("document_number", v, MAX_NUMBER_LEN)?;
    }

    let db = require_db(&state)?;
    let updated = document_service::update_document(
        db,
        path.into_inner(),
        DocumentPatch {
            document_type: body.document_type,
            document_owner: body.document_owner,
            document_number: body.document_number,
            expiry_date: body.expiry_date,
            action_due_date: body.action_due_date,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(DocumentResponse::from(updated)))
}

async fn delete_document(
    state: web::Data<AppState>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let deleted = document_service::delete_document(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DocumentResponse::from(deleted)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_document));
    cfg.route("", web::get().to(list_documents));
    cfg.route("/expiring/soon", web::get().to(expiring_soon));
    cfg.route("/{id}", web::get().to(get_document));
    cfg.route("/{id}", web::put().to(update_document));
    cfg.route("/{id}", web::delete().to(delete_document));
}
