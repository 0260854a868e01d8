//! Schema bootstrap
//!
//! Tables are derived from the SeaORM entities and created if missing, parents
//! before children so foreign keys resolve.

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{companies, employees, roles, sessions, user_roles, users};
use crate::error::DomainError;

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let stmt = schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned();

    db.execute(backend.build(&stmt)).await?;
    tracing::debug!("Ensured table {}", entity.table_name());

    Ok(())
}

/// Create every table the adapters use
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, companies::Entity).await?;
    create_table(db, &schema, employees::Entity).await?;
    create_table(db, &schema, roles::Entity).await?;
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, user_roles::Entity).await?;
    create_table(db, &schema, sessions::Entity).await?;

    Ok(())
}
