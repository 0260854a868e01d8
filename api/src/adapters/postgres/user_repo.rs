//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{NewSession, NewUser, Role, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::{roles, sessions, user_roles, users};
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load a user row together with its role names
    async fn hydrate<C: ConnectionTrait>(
        conn: &C,
        model: users::Model,
    ) -> Result<User, DomainError> {
        let links = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(model.id))
            .find_also_related(roles::Entity)
            .all(conn)
            .await?;

        let roles = links
            .into_iter()
            .filter_map(|(_, role)| role.and_then(|r| r.name.parse().ok()))
            .collect();

        Ok(User {
            id: UserId(model.id),
            username: model.username,
            full_name: model.full_name,
            email: model.email,
            age: model.age,
            password_hash: model.password_hash,
            roles,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }

    async fn find_one(
        &self,
        column: users::Column,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await?;

        match result {
            Some(model) => Ok(Some(Self::hydrate(&self.db, model).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(model) => Ok(Some(Self::hydrate(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::Username, username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::Email, email).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(users::Entity::find().count(&self.db).await?)
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let txn = self.db.begin().await?;

        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username.clone()),
            full_name: Set(user.full_name.clone()),
            email: Set(user.email.clone()),
            age: Set(user.age),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "User '{}' or email '{}' is already registered",
                user.username, user.email
            )),
            _ => DomainError::Database(e.to_string()),
        })?;

        for role in &user.roles {
            let role_row = roles::Entity::find()
                .filter(roles::Column::Name.eq(role.to_string()))
                .one(&txn)
                .await?
                .ok_or_else(|| DomainError::Internal(format!("Role {} is not seeded", role)))?;

            user_roles::ActiveModel {
                user_id: Set(model.id),
                role_id: Set(role_row.id),
            }
            .insert(&txn)
            .await?;
        }

        let created = Self::hydrate(&txn, model).await?;
        txn.commit().await?;

        Ok(created)
    }

    async fn seed_roles(&self, roles: &[Role]) -> Result<u64, DomainError> {
        let mut inserted = 0;

        for role in roles {
            let exists = roles::Entity::find()
                .filter(roles::Column::Name.eq(role.to_string()))
                .count(&self.db)
                .await?
                > 0;

            if !exists {
                roles::ActiveModel {
                    name: Set(role.to_string()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    async fn create_session(&self, session: &NewSession) -> Result<(), DomainError> {
        sessions::ActiveModel {
            token_hash: Set(session.token_hash.clone()),
            user_id: Set(session.user_id.0),
            expires_at: Set(session.expires_at.fixed_offset()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let result = sessions::Entity::find_by_id(token_hash.to_string())
            .filter(sessions::Column::ExpiresAt.gt(now.fixed_offset()))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        match result {
            Some((_, Some(model))) => Ok(Some(Self::hydrate(&self.db, model).await?)),
            _ => Ok(None),
        }
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sessions::Entity::delete_by_id(token_hash.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(now.fixed_offset()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
