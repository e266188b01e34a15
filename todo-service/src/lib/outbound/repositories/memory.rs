use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoRepository;

/// Process-local identity and todo tables behind a single lock.
///
/// Uniqueness checks and inserts happen under one write guard, and deleting an
/// identity removes its todos in the same critical section.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    identities: BTreeMap<i64, Identity>,
    todos: BTreeMap<i64, Todo>,
    last_identity_id: i64,
    last_todo_id: i64,
}

impl Tables {
    /// Check username/email uniqueness, ignoring the row being replaced.
    fn check_unique(
        &self,
        username: &Username,
        email: &str,
        except: Option<IdentityId>,
    ) -> Result<(), IdentityError> {
        for existing in self.identities.values() {
            if Some(existing.id) == except {
                continue;
            }
            if existing.username == *username {
                return Err(IdentityError::UsernameAlreadyExists(username.to_string()));
            }
            if existing.email.as_str() == email {
                return Err(IdentityError::EmailAlreadyExists(email.to_string()));
            }
        }
        Ok(())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryStore {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let mut tables = self.tables.write().await;

        tables.check_unique(&identity.username, identity.email.as_str(), None)?;

        tables.last_identity_id += 1;
        let identity = identity.with_id(IdentityId(tables.last_identity_id));
        tables.identities.insert(identity.id.0, identity.clone());

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.tables.read().await.identities.get(&id.0).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .tables
            .read()
            .await
            .identities
            .values()
            .find(|identity| identity.username == *username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Identity>, IdentityError> {
        Ok(self.tables.read().await.identities.values().cloned().collect())
    }

    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut tables = self.tables.write().await;

        if !tables.identities.contains_key(&identity.id.0) {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }
        tables.check_unique(&identity.username, identity.email.as_str(), Some(identity.id))?;

        tables.identities.insert(identity.id.0, identity.clone());

        Ok(identity)
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        let mut tables = self.tables.write().await;

        if tables.identities.remove(&id.0).is_none() {
            return Err(IdentityError::NotFound(id.to_string()));
        }
        tables.todos.retain(|_, todo| todo.owner_id != *id);

        Ok(())
    }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut tables = self.tables.write().await;

        if !tables.identities.contains_key(&todo.owner_id.0) {
            return Err(TodoError::OwnerNotFound(todo.owner_id.to_string()));
        }

        tables.last_todo_id += 1;
        let todo = todo.with_id(TodoId::new(tables.last_todo_id)?);
        tables.todos.insert(todo.id.value(), todo.clone());

        Ok(todo)
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        Ok(self
            .tables
            .read()
            .await
            .todos
            .values()
            .filter(|todo| todo.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn find_by_id_for_owner(
        &self,
        id: &TodoId,
        owner: &IdentityId,
    ) -> Result<Option<Todo>, TodoError> {
        Ok(self
            .tables
            .read()
            .await
            .todos
            .get(&id.value())
            .filter(|todo| todo.owner_id == *owner)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.tables.read().await.todos.values().cloned().collect())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut tables = self.tables.write().await;

        match tables.todos.get_mut(&todo.id.value()) {
            Some(existing) => {
                *existing = todo.clone();
                Ok(todo)
            }
            None => Err(TodoError::NotFound(todo.id.to_string())),
        }
    }

    async fn delete_for_owner(&self, id: &TodoId, owner: &IdentityId) -> Result<(), TodoError> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .todos
            .get(&id.value())
            .is_some_and(|todo| todo.owner_id == *owner);
        if !owned {
            return Err(TodoError::NotFound(id.to_string()));
        }
        tables.todos.remove(&id.value());

        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let mut tables = self.tables.write().await;

        tables
            .todos
            .remove(&id.value())
            .map(|_| ())
            .ok_or(TodoError::NotFound(id.to_string()))
    }
}
