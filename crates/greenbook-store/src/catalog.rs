use async_trait::async_trait;
use greenbook_types::{Business, Category};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::Path;
use std::time::Duration;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to the business directory.
///
/// Order of the returned lists is whatever the backing store yields;
/// callers rely on it being stable between calls.
#[async_trait]
pub trait BusinessCatalog: Send + Sync {
    /// Every business joined with its category.
    async fn list_with_category(&self) -> Result<Vec<Business>, CatalogError>;

    /// The first `limit` businesses in store order.
    async fn list_first(&self, limit: usize) -> Result<Vec<Business>, CatalogError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// One business with its category, `None` if the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Business>, CatalogError>;

    async fn counts(&self) -> Result<CatalogCounts, CatalogError>;
}

/// Row totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub business_count: u64,
    pub category_count: u64,
}

const BUSINESS_SELECT: &str = r#"
SELECT b.id, b.name, b.description, b.address, b.phone, b.email,
       b.website, b.timetable, c.id AS category_id, c.name AS category_name
FROM "Business" b
JOIN "Category" c ON c.id = b."categoryId"
"#;

#[derive(sqlx::FromRow)]
struct BusinessRow {
    id: String,
    name: String,
    description: String,
    address: String,
    phone: String,
    email: String,
    website: Option<String>,
    timetable: Option<String>,
    category_id: String,
    category_name: String,
}

impl From<BusinessRow> for Business {
    fn from(row: BusinessRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            address: row.address,
            phone: row.phone,
            email: row.email,
            website: row.website,
            timetable: row.timetable,
            category: Category {
                id: row.category_id,
                name: row.category_name,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
}

/// Postgres catalog over the `"Business"` / `"Category"` tables.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl BusinessCatalog for PgCatalog {
    async fn list_with_category(&self) -> Result<Vec<Business>, CatalogError> {
        let rows = sqlx::query_as::<_, BusinessRow>(BUSINESS_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Business::from).collect())
    }

    async fn list_first(&self, limit: usize) -> Result<Vec<Business>, CatalogError> {
        let sql = format!("{BUSINESS_SELECT} LIMIT $1");
        let rows = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Business::from).collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let rows = sqlx::query_as::<_, CategoryRow>(r#"SELECT id, name FROM "Category""#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Business>, CatalogError> {
        let sql = format!("{BUSINESS_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Business::from))
    }

    async fn counts(&self) -> Result<CatalogCounts, CatalogError> {
        let (business_count, category_count): (i64, i64) = sqlx::query_as(
            r#"SELECT (SELECT COUNT(*) FROM "Business"), (SELECT COUNT(*) FROM "Category")"#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CatalogCounts {
            business_count: business_count as u64,
            category_count: category_count as u64,
        })
    }
}

/// Fixed in-memory corpus, loaded from JSON or built directly.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    businesses: Vec<Business>,
}

impl StaticCatalog {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self { businesses }
    }

    /// Load a JSON array of businesses (each with a nested `category`).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let businesses: Vec<Business> = serde_json::from_str(&raw)?;
        Ok(Self { businesses })
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }
}

#[async_trait]
impl BusinessCatalog for StaticCatalog {
    async fn list_with_category(&self) -> Result<Vec<Business>, CatalogError> {
        Ok(self.businesses.clone())
    }

    async fn list_first(&self, limit: usize) -> Result<Vec<Business>, CatalogError> {
        Ok(self.businesses.iter().take(limit).cloned().collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut categories: Vec<Category> = Vec::new();
        for b in &self.businesses {
            if !categories.iter().any(|c| c.id == b.category.id) {
                categories.push(b.category.clone());
            }
        }
        Ok(categories)
    }

    async fn get(&self, id: &str) -> Result<Option<Business>, CatalogError> {
        Ok(self.businesses.iter().find(|b| b.id == id).cloned())
    }

    async fn counts(&self) -> Result<CatalogCounts, CatalogError> {
        let categories = self.list_categories().await?;
        Ok(CatalogCounts {
            business_count: self.businesses.len() as u64,
            category_count: categories.len() as u64,
        })
    }
}
