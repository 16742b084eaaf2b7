//! Customer entity and its input shapes.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::CustomerId;

/// Errors raised before any I/O when a required field is missing.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name was absent or blank.
    #[error("Name and age are required (name is missing)")]
    MissingName,
    /// Age was absent or blank.
    #[error("Name and age are required (age is missing)")]
    MissingAge,
}

/// A persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// Age as entered. May be any text, typically digits.
    pub age: String,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Name: {}, Age: {}", self.id, self.name, self.age)
    }
}

/// Validated input for creating a customer.
///
/// Both fields are trimmed and guaranteed non-empty.
///
/// ```
/// use crm_core::{NewCustomer, ValidationError};
///
/// let customer = NewCustomer::parse(Some(" Ada ".into()), Some("30".into())).unwrap();
/// assert_eq!(customer.name(), "Ada");
///
/// assert_eq!(
///     NewCustomer::parse(Some("Ada".into()), None),
///     Err(ValidationError::MissingAge)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    name: String,
    age: String,
}

impl NewCustomer {
    /// Build a new customer from optional raw fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if either field is absent or blank. Name is
    /// checked first.
    pub fn parse(name: Option<String>, age: Option<String>) -> Result<Self, ValidationError> {
        let name = non_blank(name).ok_or(ValidationError::MissingName)?;
        let age = non_blank(age).ok_or(ValidationError::MissingAge)?;
        Ok(Self { name, age })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    /// Attach a store-assigned id, producing the persisted record.
    #[must_use]
    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

/// Replacement values for an existing customer.
///
/// `None` leaves the stored field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
}

impl CustomerUpdate {
    /// Build an update from raw console input, treating blank text as "keep".
    #[must_use]
    pub fn from_input(name: &str, age: &str) -> Self {
        Self {
            name: non_blank(Some(name.to_owned())),
            age: non_blank(Some(age.to_owned())),
        }
    }

    /// Whether this update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Apply the update to a record in place.
    pub fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name.clone_from(name);
        }
        if let Some(age) = &self.age {
            customer.age.clone_from(age);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_owned();
    (!trimmed.is_empty()).then_some(trimmed)
}
