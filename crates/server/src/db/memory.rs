//! In-memory customer store for tests.
//!
//! Keeps insertion order. Can be switched into an unavailable state to
//! exercise the error paths of both interfaces.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crm_core::{Customer, CustomerId, CustomerUpdate, NewCustomer};

use super::{CustomerStore, StoreError};

/// Customer store backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    customers: RwLock<Vec<Customer>>,
    unavailable: AtomicBool,
}

impl MemoryCustomerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following operation fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored customers, ignoring availability.
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    /// Whether the store holds no customers, ignoring availability.
    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        self.check()?;
        let customer = customer.into_customer(CustomerId::generate());
        self.customers.write().await.push(customer.clone());
        Ok(customer)
    }

    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        self.check()?;
        Ok(self.customers.read().await.clone())
    }

    async fn update(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Option<Customer>, StoreError> {
        self.check()?;
        let mut customers = self.customers.write().await;
        Ok(customers.iter_mut().find(|c| c.id == id).map(|customer| {
            update.apply(customer);
            customer.clone()
        }))
    }

    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        self.check()?;
        let mut customers = self.customers.write().await;
        Ok(customers
            .iter()
            .position(|c| c.id == id)
            .map(|index| customers.remove(index)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
