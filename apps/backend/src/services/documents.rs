//! Document operations: validation plus transactional create/update so the
//! uniqueness check and the write commit together (the unique index backs
//! the check against races).

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use time::{Date, Duration, OffsetDateTime};
use tracing::info;

use crate::error::AppError;
use crate::repos::documents::{self, Document, DocumentFilter, DocumentPatch, NewDocument};

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Date-ordering invariants: expiry must not be in the past, action-due
/// must not be later than expiry.
fn validate_dates(expiry_date: Date, action_due_date: Date, today: Date) -> Result<(), AppError> {
    if expiry_date < today {
        return Err(AppError::invalid(
            "EXPIRY_DATE_IN_PAST",
            format!("Expiry date {expiry_date} is in the past"),
        ));
    }
    if action_due_date > expiry_date {
        return Err(AppError::invalid(
            "ACTION_DUE_AFTER_EXPIRY",
            format!(
                "Action due date {action_due_date} is later than expiry date {expiry_date}"
            ),
        ));
    }
    Ok(())
}

pub async fn create_document(
    db: &DatabaseConnection,
    new: NewDocument,
) -> Result<Document, AppError> {
    validate_dates(new.expiry_date, new.action_due_date, today_utc())?;

    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::db(format!("failed to begin transaction: {e}")))?;

    if documents::number_taken(&txn, &new.document_number, None).await? {
        return Err(AppError::conflict(
            "DOCUMENT_NUMBER_EXISTS",
            format!("Document number {} already exists", new.document_number),
        ));
    }

    let document = documents::insert(&txn, new).await?;

    txn.commit()
        .await
        .map_err(|e| AppError::db(format!("failed to commit document creation: {e}")))?;

    info!(
        document_id = document.id,
        document_number = %document.document_number,
        "document created"
    );
    Ok(document)
}

pub async fn get_document<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Document, AppError> {
    documents::find_by_id(conn, id)
        .await?
        .ok_or_else(|| document_not_found(id))
}

pub async fn list_documents<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: DocumentFilter,
) -> Result<Vec<Document>, AppError> {
    Ok(documents::list(conn, filter).await?)
}

/// Partial update. Only supplied fields change; the merged record must
/// still satisfy the date invariants, and a supplied number must remain
/// globally unique (excluding this document).
pub async fn update_document(
    db: &DatabaseConnection,
    id: i64,
    patch: DocumentPatch,
) -> Result<Document, AppError> {
    let today = today_utc();

    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::db(format!("failed to begin transaction: {e}")))?;

    let current = documents::find_by_id(&txn, id)
        .await?
        .ok_or_else(|| document_not_found(id))?;

    if let Some(number) = &patch.document_number {
        if number != &current.document_number
            && documents::number_taken(&txn, number, Some(id)).await?
        {
            return Err(AppError::conflict(
                "DOCUMENT_NUMBER_EXISTS",
                format!("Document number {number} already exists"),
            ));
        }
    }

    let effective_expiry = patch.expiry_date.unwrap_or(current.expiry_date);
    let effective_due = patch.action_due_date.unwrap_or(current.action_due_date);

    if patch.expiry_date.is_some() && effective_expiry < today {
        return Err(AppError::invalid(
            "EXPIRY_DATE_IN_PAST",
            format!("Expiry date {effective_expiry} is in the past"),
        ));
    }
    if effective_due > effective_expiry {
        return Err(AppError::invalid(
            "ACTION_DUE_AFTER_EXPIRY",
            format!(
                "Action due date {effective_due} is later than expiry date {effective_expiry}"
            ),
        ));
    }

    let updated = if patch.is_empty() {
        current
    } else {
        documents::update(&txn, id, patch).await?
    };

    txn.commit()
        .await
        .map_err(|e| AppError::db(format!("failed to commit document update: {e}")))?;

    info!(document_id = id, "document updated");
    Ok(updated)
}

/// Delete by id, returning a snapshot of what was removed.
pub async fn delete_document<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Document, AppError> {
    let deleted = documents::delete(conn, id)
        .await?
        .ok_or_else(|| document_not_found(id))?;

    info!(
        document_id = id,
        document_number = %deleted.document_number,
        "document deleted"
    );
    Ok(deleted)
}

/// Documents expiring in the inclusive window [today, today + days].
pub async fn find_expiring_within<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    days: i64,
) -> Result<Vec<Document>, AppError> {
    if days < 0 {
        return Err(AppError::invalid(
            "INVALID_WINDOW",
            format!("days must be non-negative, got {days}"),
        ));
    }

    let today = today_utc();
    let to = today
        .checked_add(Duration::days(days))
        .ok_or_else(|| AppError::invalid("INVALID_WINDOW", format!("days out of range: {days}")))?;

    Ok(documents::find_expiring(conn, today, to).await?)
}

fn document_not_found(id: i64) -> AppError {
    AppError::not_found("DOCUMENT_NOT_FOUND", format!("Document {id} not found"))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::validate_dates;
    use crate::AppError;

    const TODAY: time::Date = date!(2026 - 08 - 23);

    #[test]
    fn test_dates_valid_when_ordered_and_future() {
        assert!(validate_dates(date!(2026 - 10 - 22), date!(2026 - 10 - 07), TODAY).is_ok());
    }

    #[test]
    fn test_expiry_today_is_allowed() {
        // Inclusive boundary: expiring today is not "in the past"
        assert!(validate_dates(TODAY, TODAY, TODAY).is_ok());
    }

    #[test]
    fn test_expiry_in_past_rejected() {
        let result = validate_dates(date!(2026 - 08 - 22), date!(2026 - 08 - 20), TODAY);
        match result {
            Err(AppError::Validation { code, .. }) => assert_eq!(code, "EXPIRY_DATE_IN_PAST"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_due_after_expiry_rejected() {
        let result = validate_dates(date!(2026 - 09 - 01), date!(2026 - 09 - 02), TODAY);
        match result {
            Err(AppError::Validation { code, .. }) => assert_eq!(code, "ACTION_DUE_AFTER_EXPIRY"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_due_equal_to_expiry_allowed() {
        assert!(validate_dates(date!(2026 - 09 - 01), date!(2026 - 09 - 01), TODAY).is_ok());
    }
}
