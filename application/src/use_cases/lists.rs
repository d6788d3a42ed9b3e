//! List management use case
//!
//! Sequential plumbing over the list store: no ordering hazards, errors
//! surface directly to the caller as advisory text.

use std::sync::Arc;

use randomizer_domain::{MovieList, ShareCode};

use crate::ports::list_store::{ListStore, StoreError};

pub struct ListsUseCase {
    store: Arc<dyn ListStore>,
}

impl ListsUseCase {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    /// Lists the caller belongs to, newest first
    pub async fn my_lists(&self) -> Result<Vec<MovieList>, StoreError> {
        self.store.my_lists().await
    }

    /// Create a list and return its id
    pub async fn create_list(&self, name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Rejected("list name is empty".to_string()));
        }
        self.store.create_list(name).await
    }

    /// Join a list by pasted share code and return its id
    pub async fn join_by_code(&self, raw_code: &str) -> Result<String, StoreError> {
        let code = ShareCode::new(raw_code).map_err(|e| StoreError::Rejected(e.to_string()))?;
        self.store.join_by_code(&code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubLists {
        joined: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ListStore for StubLists {
        async fn my_lists(&self) -> Result<Vec<MovieList>, StoreError> {
            Ok(Vec::new())
        }

        async fn create_list(&self, _name: &str) -> Result<String, StoreError> {
            Ok("list-1".to_string())
        }

        async fn join_by_code(&self, code: &ShareCode) -> Result<String, StoreError> {
            self.joined.lock().unwrap().push(code.as_str().to_string());
            Ok("list-2".to_string())
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let lists = ListsUseCase::new(Arc::new(StubLists::default()));
        assert!(lists.create_list("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_join_normalizes_code() {
        let store = Arc::new(StubLists::default());
        let lists = ListsUseCase::new(store.clone());

        let id = lists.join_by_code(" ab12cd34 ").await.unwrap();
        assert_eq!(id, "list-2");
        assert_eq!(*store.joined.lock().unwrap(), vec!["AB12CD34".to_string()]);
    }

    #[tokio::test]
    async fn test_join_rejects_invalid_code() {
        let lists = ListsUseCase::new(Arc::new(StubLists::default()));
        assert!(lists.join_by_code("not a code!").await.is_err());
    }
}
