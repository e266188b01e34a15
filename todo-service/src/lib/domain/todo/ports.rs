use async_trait::async_trait;

use super::errors::TodoError;
use super::models::NewTodo;
use super::models::Todo;
use super::models::TodoCommand;
use super::models::TodoId;
use crate::domain::identity::models::IdentityId;

/// Port for todo domain service operations.
///
/// Owner-scoped operations never reveal whether a todo exists under another owner;
/// both cases report `NotFound`.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List todos owned by `owner`.
    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    /// Retrieve one of `owner`'s todos.
    ///
    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError>;

    /// Create a todo owned by `owner`.
    ///
    /// # Errors
    /// * `OwnerNotFound` - `owner` no longer exists
    async fn create_todo(&self, owner: &IdentityId, command: TodoCommand)
        -> Result<Todo, TodoError>;

    /// Replace the fields of one of `owner`'s todos.
    ///
    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete one of `owner`'s todos.
    ///
    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError>;

    /// List every todo regardless of owner.
    async fn list_all_todos(&self) -> Result<Vec<Todo>, TodoError>;

    /// Delete any todo regardless of owner.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete_any_todo(&self, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new todo and assign its id. Fails with `OwnerNotFound` if the owner is gone.
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Retrieve all todos of one owner ordered by id.
    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    /// Retrieve a todo only if it belongs to `owner`.
    async fn find_by_id_for_owner(
        &self,
        id: &TodoId,
        owner: &IdentityId,
    ) -> Result<Option<Todo>, TodoError>;

    /// Retrieve all todos ordered by id.
    async fn list_all(&self) -> Result<Vec<Todo>, TodoError>;

    /// Update an existing todo in storage.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove a todo if it belongs to `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    async fn delete_for_owner(&self, id: &TodoId, owner: &IdentityId) -> Result<(), TodoError>;

    /// Remove a todo regardless of owner.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
