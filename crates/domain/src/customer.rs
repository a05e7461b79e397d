//! Customer identity entity.

use chrono::{DateTime, Utc};
use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require_non_blank};

/// A registered customer.
///
/// Email and CPF uniqueness across customers is enforced by the service
/// layer; the entity only guarantees they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    cpf: String,
    phone: String,
    registered_at: DateTime<Utc>,
    active: bool,
}

impl Customer {
    /// Creates an active customer registered now.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        cpf: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: require_non_blank("name", name.into())?,
            email: require_non_blank("email", email.into())?,
            cpf: require_non_blank("cpf", cpf.into())?,
            phone: String::new(),
            registered_at: Utc::now(),
            active: true,
        })
    }

    /// Sets the phone number, builder style.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = require_non_blank("name", name.into())?;
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), DomainError> {
        self.email = require_non_blank("email", email.into())?;
        Ok(())
    }

    pub fn set_cpf(&mut self, cpf: impl Into<String>) -> Result<(), DomainError> {
        self.cpf = require_non_blank("cpf", cpf.into())?;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer() {
        let customer = Customer::new(CustomerId::new(1), "Ana", "ana@example.com", "123")
            .unwrap()
            .with_phone("555-0100");
        assert_eq!(customer.name(), "Ana");
        assert_eq!(customer.phone(), "555-0100");
        assert!(customer.is_active());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(
            Customer::new(CustomerId::new(1), "", "a@b.c", "1"),
            Err(DomainError::InvalidArgument { field: "name", .. })
        ));
        assert!(matches!(
            Customer::new(CustomerId::new(1), "Ana", " ", "1"),
            Err(DomainError::InvalidArgument { field: "email", .. })
        ));
        assert!(matches!(
            Customer::new(CustomerId::new(1), "Ana", "a@b.c", ""),
            Err(DomainError::InvalidArgument { field: "cpf", .. })
        ));
    }

    #[test]
    fn test_setters_validate_and_keep_previous_value() {
        let mut customer =
            Customer::new(CustomerId::new(1), "Ana", "ana@example.com", "123").unwrap();
        assert!(customer.set_email("").is_err());
        assert_eq!(customer.email(), "ana@example.com");
        customer.set_email("ana@new.com").unwrap();
        assert_eq!(customer.email(), "ana@new.com");
    }
}
