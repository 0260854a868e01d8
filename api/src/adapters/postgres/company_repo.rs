//! PostgreSQL adapter for CompanyRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    Company, CompanyId, CompanySortField, NewCompany, Page, PageRequest,
};
use crate::domain::ports::CompanyRepository;
use crate::entity::{companies, employees};
use crate::error::DomainError;

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    db: DatabaseConnection,
}

impl PostgresCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: CompanySortField) -> companies::Column {
    match field {
        CompanySortField::Name => companies::Column::Name,
        CompanySortField::Town => companies::Column::Town,
        CompanySortField::Budget => companies::Column::Budget,
        CompanySortField::Description => companies::Column::Description,
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find()
            .filter(companies::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let count = companies::Entity::find()
            .filter(companies::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        let results = companies::Entity::find()
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Company>, DomainError> {
        let paginator = companies::Entity::find()
            .order_by_asc(sort_column(request.sort_by))
            .order_by_asc(companies::Column::Id)
            .paginate(&self.db, request.size);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(request.page).await?;

        Ok(Page::new(
            items.into_iter().map(|m| m.into()).collect(),
            request,
            totals.number_of_items,
        ))
    }

    async fn find_by_town(&self, town: &str) -> Result<Vec<Company>, DomainError> {
        let results = companies::Entity::find()
            .filter(companies::Column::Town.eq(town))
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_budget_greater_than(
        &self,
        min_budget: f64,
    ) -> Result<Vec<Company>, DomainError> {
        let results = companies::Entity::find()
            .filter(companies::Column::Budget.gt(min_budget))
            .order_by_desc(companies::Column::Budget)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Company>, DomainError> {
        // strpos is a literal substring match: % and _ in the term are plain characters
        let needle = term.to_lowercase();

        let results = companies::Entity::find()
            .filter(
                Condition::any()
                    .add(Expr::cust_with_values(
                        "strpos(LOWER(companies.name), $1) > 0",
                        [needle.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        "strpos(LOWER(companies.description), $1) > 0",
                        [needle],
                    )),
            )
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(companies::Entity::find().count(&self.db).await?)
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        let model = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(company.name.clone()),
            town: Set(company.town.clone()),
            description: Set(company.description.clone()),
            budget: Set(company.budget),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &company.name))?;

        Ok(result.into())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, DomainError> {
        let txn = self.db.begin().await?;

        let company = companies::Entity::find()
            .filter(companies::Column::Name.eq(name))
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::company_not_found(name))?;

        let staff = employees::Entity::delete_many()
            .filter(employees::Column::CompanyId.eq(company.id))
            .exec(&txn)
            .await?;

        companies::Entity::delete_by_id(company.id).exec(&txn).await?;

        txn.commit().await?;

        Ok(staff.rows_affected)
    }
}

/// A violation of the unique index on `companies.name` becomes `DuplicateCompanyName`
fn map_insert_error(e: DbErr, name: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::DuplicateCompanyName(format!("Company '{}' already exists", name))
        }
        _ => DomainError::Database(e.to_string()),
    }
}

/// Convert SeaORM model to domain entity
impl From<companies::Model> for Company {
    fn from(model: companies::Model) -> Self {
        Company {
            id: CompanyId(model.id),
            name: model.name,
            town: model.town,
            description: model.description,
            budget: model.budget,
        }
    }
}
