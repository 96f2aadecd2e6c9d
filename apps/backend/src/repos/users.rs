//! User repository. Users are reference data here: the reminder job reads
//! recipients and the token endpoint can optionally check that a username
//! exists. There are no user-management endpoints.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::auth::role::Role;
use crate::entities::users;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let role = model.role.parse::<Role>().map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("BadRole".into()),
                format!("user {} has invalid role: {e}", model.id),
            )
        })?;
        Ok(Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role,
            created_at: model.created_at,
        })
    }
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let model = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    model.map(User::try_from).transpose()
}

/// Users entitled to receive expiry reminders (admins and owners).
pub async fn reminder_recipients<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let models = users::Entity::find()
        .filter(users::Column::Role.is_in([Role::Admin.as_str(), Role::Owner.as_str()]))
        .all(conn)
        .await
        .map_err(map_db_err)?;
    models.into_iter().map(User::try_from).collect()
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
    role: Role,
) -> Result<User, DomainError> {
    let active = users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        role: Set(role.as_str().to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    let model = active.insert(conn).await.map_err(map_db_err)?;
    User::try_from(model)
}
