//! PostgreSQL adapter for EmployeeRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    full_name_key, Company, CompanyId, CompanyRef, EducationLevel, Employee, EmployeeId,
    NewEmployee,
};
use crate::domain::ports::EmployeeRepository;
use crate::entity::{companies, employees};
use crate::error::DomainError;

/// PostgreSQL implementation of EmployeeRepository
pub struct PostgresEmployeeRepository {
    db: DatabaseConnection,
}

impl PostgresEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        let result = employees::Entity::find_by_id(id.0)
            .find_also_related(companies::Entity)
            .one(&self.db)
            .await?;

        result.map(to_domain).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        let results = employees::Entity::find()
            .find_also_related(companies::Entity)
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await?;

        results.into_iter().map(to_domain).collect()
    }

    async fn find_by_full_name(&self, full_name: &str) -> Result<Vec<Employee>, DomainError> {
        let key = full_name_key(full_name);

        let results = employees::Entity::find()
            .filter(Expr::cust_with_values(
                "regexp_replace(employees.first_name || employees.last_name, '\\s', '', 'g') = $1",
                [key],
            ))
            .find_also_related(companies::Entity)
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;

        results.into_iter().map(to_domain).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(employees::Entity::find().count(&self.db).await?)
    }

    async fn create(
        &self,
        employee: &NewEmployee,
        company: Option<&Company>,
    ) -> Result<Employee, DomainError> {
        let model = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(employee.first_name.clone()),
            last_name: Set(employee.last_name.clone()),
            birth_date: Set(employee.birth_date),
            education_level: Set(employee.education_level.to_string()),
            job_title: Set(employee.job_title.clone()),
            salary: Set(employee.salary),
            company_id: Set(company.map(|c| c.id.0)),
        };

        let result = model.insert(&self.db).await?;

        Ok(Employee {
            company: company.map(|c| CompanyRef {
                id: c.id,
                name: c.name.clone(),
            }),
            ..to_domain((result, None))?
        })
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        let result = employees::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            Err(DomainError::employee_not_found(&id.to_string()))
        } else {
            Ok(())
        }
    }

    async fn reassign_company(
        &self,
        id: &EmployeeId,
        company_id: &CompanyId,
    ) -> Result<Employee, DomainError> {
        let txn = self.db.begin().await?;

        let employee = employees::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::employee_not_found(&id.to_string()))?;

        // Shared lock keeps the destination from being deleted before commit
        let company = companies::Entity::find_by_id(company_id.0)
            .lock_shared()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                DomainError::CompanyNotFound(format!("Company {} not found", company_id))
            })?;

        let mut active_model = employee.into_active_model();
        active_model.company_id = Set(Some(company.id));
        let updated = active_model.update(&txn).await?;

        txn.commit().await?;

        to_domain((updated, Some(company)))
    }
}

/// Convert a SeaORM employee row (and its optional company) to the domain entity.
///
/// An unknown education level is a corrupt row and fails the read.
fn to_domain(
    (model, company): (employees::Model, Option<companies::Model>),
) -> Result<Employee, DomainError> {
    let education_level = model
        .education_level
        .parse::<EducationLevel>()
        .map_err(|e| {
            tracing::error!(employee = %model.id, "Corrupt employee row: {}", e);
            DomainError::Internal(format!("Employee {} has {}", model.id, e.to_lowercase()))
        })?;

    Ok(Employee {
        id: EmployeeId(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        birth_date: model.birth_date,
        education_level,
        job_title: model.job_title,
        salary: model.salary,
        company: company.map(|c| CompanyRef {
            id: CompanyId(c.id),
            name: c.name,
        }),
    })
}
