use std::sync::Arc;

use async_trait::async_trait;
use common::CustomerId;
use domain::Customer;

use super::Table;
use crate::{CustomerRepository, IdSequence, Result};

/// In-memory customer registry.
#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    table: Table<CustomerId, Customer>,
    ids: Arc<IdSequence>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Customer"),
            ids: Arc::new(IdSequence::new()),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    fn next_id(&self) -> CustomerId {
        self.ids.next_id()
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let email = email.to_lowercase();
        Ok(self
            .table
            .find(|c| c.email().to_lowercase() == email)
            .await)
    }

    async fn get_by_cpf(&self, cpf: &str) -> Result<Option<Customer>> {
        Ok(self.table.find(|c| c.cpf() == cpf).await)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Customer>> {
        Ok(self.table.select(|c| !active_only || c.is_active()).await)
    }

    async fn add(&self, customer: Customer) -> Result<()> {
        self.table.insert(customer.id(), customer).await
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        self.table.replace(customer.id(), customer).await
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        self.table.modify(id, |c| c.set_active(false)).await
    }

    async fn exists(&self, id: CustomerId) -> Result<bool> {
        Ok(self.table.contains(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn with_customer() -> InMemoryCustomerRepository {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new(
            repo.next_id(),
            "Maria Lima",
            "Maria.Lima@Example.com",
            "123.456.789-00",
        )
        .unwrap();
        repo.add(customer).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let repo = with_customer().await;
        let found = repo.get_by_email("maria.lima@example.com").await.unwrap();
        assert_eq!(found.unwrap().id(), CustomerId::new(1));
        assert!(repo.exists_by_email("MARIA.LIMA@EXAMPLE.COM").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn cpf_lookup_is_exact() {
        let repo = with_customer().await;
        assert!(repo.exists_by_cpf("123.456.789-00").await.unwrap());
        assert!(!repo.exists_by_cpf("12345678900").await.unwrap());
    }

    #[tokio::test]
    async fn remove_is_soft() {
        let repo = with_customer().await;
        repo.remove(CustomerId::new(1)).await.unwrap();
        assert!(repo.list(true).await.unwrap().is_empty());
        assert_eq!(repo.list(false).await.unwrap().len(), 1);
        assert!(repo.exists(CustomerId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn update_replaces_row() {
        let repo = with_customer().await;
        let mut customer = repo.get(CustomerId::new(1)).await.unwrap().unwrap();
        customer.set_phone("+55 11 99999-0000");
        repo.update(customer).await.unwrap();

        let stored = repo.get(CustomerId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.phone(), "+55 11 99999-0000");
    }
}
