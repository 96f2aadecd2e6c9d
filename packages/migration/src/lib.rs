pub use sea_orm_migration::prelude::*;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20260823_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260823_000001_init::Migration)]
    }
}

/// Apply all pending migrations, logging the applied count before and after.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = count_applied_migrations(db).await.unwrap_or(0);
    tracing::info!(
        applied = before,
        defined = Migrator::migrations().len(),
        "running migrations"
    );

    Migrator::up(db, None).await?;

    let after = count_applied_migrations(db).await.unwrap_or(0);
    tracing::info!(applied = after, "migrations up to date");
    Ok(())
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}

/// Get the version string of the latest applied migration.
/// Returns None if no migrations have been applied or the migration table doesn't exist.
pub async fn get_latest_migration_version(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}
