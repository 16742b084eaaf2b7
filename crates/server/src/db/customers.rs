//! `PostgreSQL`-backed customer store.
//!
//! Every operation is a single statement, so each one is atomic on its own.
//! No operation spans a transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crm_core::{Customer, CustomerId, CustomerUpdate, NewCustomer};

use super::{CustomerStore, StoreError};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    age: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
        }
    }
}

/// Customer store over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Create a new store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    #[instrument(skip(self, customer), fields(name = %customer.name()))]
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO customers (name, age)
            VALUES ($1, $2)
            RETURNING id, name, age
            ",
        )
        .bind(customer.name())
        .bind(customer.age())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, age
            FROM customers
            ORDER BY created_at
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE customers
            SET name = COALESCE($2, name),
                age = COALESCE($3, age)
            WHERE id = $1
            RETURNING id, name, age
            ",
        )
        .bind(id)
        .bind(update.name)
        .bind(update.age)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, name, age
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
