//! Component reads against PostgreSQL.

use crate::error::AppError;
use crate::model::{Category, Component, COMPONENTS_TABLE, COMPONENT_COLUMNS};
use crate::sql::{select, Filter, QueryBuf, SelectQuery};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::future::Future;
use std::time::Duration;

/// Read-only access to the catalog. Categories arrive already validated.
#[async_trait]
pub trait ComponentRepository: Send + Sync {
    async fn get_all(&self, page: &str) -> Result<Vec<Component>, AppError>;

    async fn get_by_category(&self, category: Category, page: &str) -> Result<Vec<Component>, AppError>;

    /// Brand comparison is exact (case-sensitive) against the stored value.
    async fn get_by_category_and_brand(
        &self,
        category: Category,
        brand: &str,
        page: &str,
    ) -> Result<Vec<Component>, AppError>;

    /// `AppError::NotFound` when no row has this id.
    async fn get_by_id(&self, id: i64) -> Result<Component, AppError>;

    /// Cheap liveness round trip for readiness checks.
    async fn ping(&self) -> bool;
}

#[derive(Clone)]
pub struct PgComponentRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgComponentRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    fn build(filter: &Filter, page: &str) -> Result<QueryBuf, AppError> {
        select(&SelectQuery {
            table: COMPONENTS_TABLE,
            columns: COMPONENT_COLUMNS,
            filter,
            page,
        })
    }

    /// Dropping the timed-out future cancels the in-flight query.
    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res.map_err(AppError::from),
            Err(_) => Err(AppError::Timeout(self.query_timeout)),
        }
    }

    async fn query_many(&self, op: &'static str, q: &QueryBuf) -> Result<Vec<Component>, AppError> {
        tracing::debug!(op, sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = self.with_deadline(query.fetch_all(&self.pool)).await?;
        let components = rows.iter().map(component_from_row).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(op, rows = components.len(), "query ok");
        Ok(components)
    }

    async fn query_optional(&self, op: &'static str, q: &QueryBuf) -> Result<Option<Component>, AppError> {
        tracing::debug!(op, sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = self.with_deadline(query.fetch_optional(&self.pool)).await?;
        row.as_ref().map(component_from_row).transpose()
    }
}

#[async_trait]
impl ComponentRepository for PgComponentRepository {
    async fn get_all(&self, page: &str) -> Result<Vec<Component>, AppError> {
        let q = Self::build(&Filter::none(), page)?;
        self.query_many("get_all", &q).await.inspect_err(|e| {
            tracing::error!(op = "get_all", page, error = %e, "repository read failed");
        })
    }

    async fn get_by_category(&self, category: Category, page: &str) -> Result<Vec<Component>, AppError> {
        let filter = Filter::none().eq("category", category.as_str());
        let q = Self::build(&filter, page)?;
        self.query_many("get_by_category", &q).await.inspect_err(|e| {
            tracing::error!(op = "get_by_category", %category, page, error = %e, "repository read failed");
        })
    }

    async fn get_by_category_and_brand(
        &self,
        category: Category,
        brand: &str,
        page: &str,
    ) -> Result<Vec<Component>, AppError> {
        let filter = Filter::none().eq("category", category.as_str()).eq("brand", brand);
        let q = Self::build(&filter, page)?;
        self.query_many("get_by_category_and_brand", &q).await.inspect_err(|e| {
            tracing::error!(
                op = "get_by_category_and_brand",
                %category,
                brand,
                page,
                error = %e,
                "repository read failed"
            );
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Component, AppError> {
        let q = Self::build(&Filter::none().eq("id", id), "")?;
        let found = self.query_optional("get_by_id", &q).await.inspect_err(|e| {
            tracing::error!(op = "get_by_id", id, error = %e, "repository read failed");
        })?;
        found.ok_or_else(|| AppError::NotFound(format!("component {}", id)))
    }

    async fn ping(&self) -> bool {
        crate::store::ping(&self.pool).await
    }
}

/// Decode one row; a category outside the closed set fails the read.
fn component_from_row(row: &PgRow) -> Result<Component, AppError> {
    let category: String = row.try_get("category")?;
    Ok(Component {
        id: row.try_get("id")?,
        category: category.parse()?,
        brand: row.try_get("brand")?,
        model: row.try_get("model")?,
        sku: row.try_get("sku")?,
        upc: row.try_get("upc")?,
        specs: row.try_get("specs")?,
        created_at: row.try_get("created_at")?,
    })
}
