//! Document repository (generic over ConnectionTrait).

use sea_orm::sea_query::{Expr, Func, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::{Date, OffsetDateTime};

use crate::entities::documents;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

/// Document domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i64,
    pub document_type: String,
    pub document_owner: String,
    pub document_number: String,
    pub expiry_date: Date,
    pub action_due_date: Date,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<documents::Model> for Document {
    fn from(model: documents::Model) -> Self {
        Self {
            id: model.id,
            document_type: model.document_type,
            document_owner: model.document_owner,
            document_number: model.document_number,
            expiry_date: model.expiry_date,
            action_due_date: model.action_due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields for a new document; timestamps are set at insert time.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub document_type: String,
    pub document_owner: String,
    pub document_number: String,
    pub expiry_date: Date,
    pub action_due_date: Date,
}

/// Partial update: only Some fields are written.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub document_type: Option<String>,
    pub document_owner: Option<String>,
    pub document_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub action_due_date: Option<Date>,
}

impl DocumentPatch {
    pub fn is_empty(&self) -> bool {
        self.document_type.is_none()
            && self.document_owner.is_none()
            && self.document_number.is_none()
            && self.expiry_date.is_none()
            && self.action_due_date.is_none()
    }
}

/// Listing filters and pagination.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Case-insensitive substring match on document type
    pub document_type: Option<String>,
    /// Case-insensitive substring match on document owner
    pub document_owner: Option<String>,
    pub skip: u64,
    pub limit: u64,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Document>, DomainError> {
    let model = documents::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(Document::from))
}

/// Whether `number` is already used by a document other than `exclude_id`.
pub async fn number_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    number: &str,
    exclude_id: Option<i64>,
) -> Result<bool, DomainError> {
    let mut query =
        documents::Entity::find().filter(documents::Column::DocumentNumber.eq(number));
    if let Some(id) = exclude_id {
        query = query.filter(documents::Column::Id.ne(id));
    }
    let existing = query.one(conn).await.map_err(map_db_err)?;
    Ok(existing.is_some())
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewDocument,
) -> Result<Document, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = documents::ActiveModel {
        id: NotSet,
        document_type: Set(new.document_type),
        document_owner: Set(new.document_owner),
        document_number: Set(new.document_number),
        expiry_date: Set(new.expiry_date),
        action_due_date: Set(new.action_due_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active.insert(conn).await.map_err(map_db_err)?;
    Ok(Document::from(model))
}

/// Write only the supplied fields, refreshing `updated_at`.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: DocumentPatch,
) -> Result<Document, DomainError> {
    let mut active = documents::ActiveModel {
        id: Set(id),
        ..Default::default()
    };

    if let Some(v) = patch.document_type {
        active.document_type = Set(v);
    }
    if let Some(v) = patch.document_owner {
        active.document_owner = Set(v);
    }
    if let Some(v) = patch.document_number {
        active.document_number = Set(v);
    }
    if let Some(v) = patch.expiry_date {
        active.expiry_date = Set(v);
    }
    if let Some(v) = patch.action_due_date {
        active.action_due_date = Set(v);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active.update(conn).await.map_err(|e| match e {
        sea_orm::DbErr::RecordNotUpdated => DomainError::not_found(
            NotFoundKind::Document,
            format!("Document {id} not found"),
        ),
        other => map_db_err(other),
    })?;
    Ok(Document::from(model))
}

/// Delete by id, returning a snapshot of the removed row (None if absent).
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Document>, DomainError> {
    let Some(model) = documents::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?
    else {
        return Ok(None);
    };

    documents::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(Some(Document::from(model)))
}

/// List documents ordered by expiry date ascending (nulls last), tie-broken
/// by action-due date ascending (nulls last).
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: DocumentFilter,
) -> Result<Vec<Document>, DomainError> {
    let mut query = documents::Entity::find();

    if let Some(t) = &filter.document_type {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(documents::Column::DocumentType)))
                .like(format!("%{}%", t.to_lowercase())),
        );
    }
    if let Some(o) = &filter.document_owner {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(documents::Column::DocumentOwner)))
                .like(format!("%{}%", o.to_lowercase())),
        );
    }

    let models = query
        .order_by_with_nulls(documents::Column::ExpiryDate, Order::Asc, NullOrdering::Last)
        .order_by_with_nulls(
            documents::Column::ActionDueDate,
            Order::Asc,
            NullOrdering::Last,
        )
        .offset(filter.skip)
        .limit(filter.limit)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(models.into_iter().map(Document::from).collect())
}

/// All documents whose expiry date falls in the inclusive range [from, to].
pub async fn find_expiring<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    from: Date,
    to: Date,
) -> Result<Vec<Document>, DomainError> {
    let models = documents::Entity::find()
        .filter(documents::Column::ExpiryDate.gte(from))
        .filter(documents::Column::ExpiryDate.lte(to))
        .order_by_asc(documents::Column::ExpiryDate)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(models.into_iter().map(Document::from).collect())
}
