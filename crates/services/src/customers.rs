//! Customer registry service.

use common::CustomerId;
use domain::Customer;

use crate::error::{Result, ServiceError};
use crate::repositories::Repositories;
use crate::requests::{CustomerUpdate, NewCustomer};

/// Service for managing customers.
///
/// Email addresses are unique ignoring case; CPFs are unique as written.
#[derive(Clone)]
pub struct CustomerService {
    repos: Repositories,
}

impl CustomerService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create(&self, req: NewCustomer) -> Result<Customer> {
        let _guard = self.repos.write().await;

        if self.repos.customers.exists_by_email(&req.email).await? {
            return Err(ServiceError::Conflict(format!(
                "email {} is already registered",
                req.email
            )));
        }
        if self.repos.customers.exists_by_cpf(&req.cpf).await? {
            return Err(ServiceError::Conflict(format!(
                "CPF {} is already registered",
                req.cpf
            )));
        }

        let customer = Customer::new(
            self.repos.customers.next_id(),
            req.name,
            req.email,
            req.cpf,
        )?
        .with_phone(req.phone);
        self.repos.customers.add(customer.clone()).await?;

        tracing::info!(customer_id = %customer.id(), "customer registered");
        Ok(customer)
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer> {
        self.repos
            .customers
            .get(id)
            .await?
            .ok_or(ServiceError::CustomerNotFound(id))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self.repos.customers.get_by_email(email).await?)
    }

    pub async fn get_by_cpf(&self, cpf: &str) -> Result<Option<Customer>> {
        Ok(self.repos.customers.get_by_cpf(cpf).await?)
    }

    /// Lists active customers.
    pub async fn list(&self) -> Result<Vec<Customer>> {
        Ok(self.repos.customers.list(true).await?)
    }

    /// Applies the fields present in `update`, re-checking uniqueness of a
    /// changed email or CPF against every other customer.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, id: CustomerId, update: CustomerUpdate) -> Result<Customer> {
        let _guard = self.repos.write().await;
        let mut customer = self.get(id).await?;

        if let Some(email) = update.email {
            if let Some(other) = self.repos.customers.get_by_email(&email).await?
                && other.id() != id
            {
                return Err(ServiceError::Conflict(format!(
                    "email {email} is already registered"
                )));
            }
            customer.set_email(email)?;
        }
        if let Some(cpf) = update.cpf {
            if let Some(other) = self.repos.customers.get_by_cpf(&cpf).await?
                && other.id() != id
            {
                return Err(ServiceError::Conflict(format!(
                    "CPF {cpf} is already registered"
                )));
            }
            customer.set_cpf(cpf)?;
        }
        if let Some(name) = update.name {
            customer.set_name(name)?;
        }
        if let Some(phone) = update.phone {
            customer.set_phone(phone);
        }
        if let Some(active) = update.active {
            customer.set_active(active);
        }

        self.repos.customers.update(customer.clone()).await?;
        Ok(customer)
    }

    /// Soft-deletes a customer.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: CustomerId) -> Result<()> {
        let _guard = self.repos.write().await;
        if !self.repos.customers.exists(id).await? {
            return Err(ServiceError::CustomerNotFound(id));
        }
        self.repos.customers.remove(id).await?;
        Ok(())
    }
}
