use std::sync::Arc;

use async_trait::async_trait;

use super::errors::TodoError;
use super::models::NewTodo;
use super::models::Todo;
use super::models::TodoCommand;
use super::models::TodoId;
use super::ports::TodoRepository;
use super::ports::TodoServicePort;
use crate::domain::identity::models::IdentityId;

/// Concrete implementation of TodoServicePort.
///
/// Generic over repository for testability.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        self.repository.find_by_owner(owner).await
    }

    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id_for_owner(id, owner)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }

    async fn create_todo(
        &self,
        owner: &IdentityId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = NewTodo {
            title: command.title,
            description: command.description,
            priority: command.priority,
            completed: command.completed,
            owner_id: *owner,
        };

        let created = self.repository.create(todo).await?;

        tracing::debug!(todo_id = %created.id, owner_id = %owner, "Todo created");

        Ok(created)
    }

    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.get_todo(owner, id).await?;

        todo.title = command.title;
        todo.description = command.description;
        todo.priority = command.priority;
        todo.completed = command.completed;

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete_for_owner(id, owner).await?;

        tracing::debug!(todo_id = %id, owner_id = %owner, "Todo deleted");

        Ok(())
    }

    async fn list_all_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_all().await
    }

    async fn delete_any_todo(&self, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(id).await?;

        tracing::info!(todo_id = %id, "Todo deleted by administrator");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::todo::models::Priority;
    use crate::domain::todo::models::TodoDescription;
    use crate::domain::todo::models::TodoTitle;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;
            async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;
            async fn find_by_id_for_owner(&self, id: &TodoId, owner: &IdentityId) -> Result<Option<Todo>, TodoError>;
            async fn list_all(&self) -> Result<Vec<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete_for_owner(&self, id: &TodoId, owner: &IdentityId) -> Result<(), TodoError>;
            async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
        }
    }

    fn command(title: &str, completed: bool) -> TodoCommand {
        TodoCommand {
            title: TodoTitle::new(title.to_string()).unwrap(),
            description: TodoDescription::new("Milk, Cheese, Pizza".to_string()).unwrap(),
            priority: Priority::new(2).unwrap(),
            completed,
        }
    }

    fn stored_todo(id: i64, owner: i64) -> Todo {
        NewTodo {
            title: TodoTitle::new("Buy groceries".to_string()).unwrap(),
            description: TodoDescription::new("Milk, Cheese, Pizza".to_string()).unwrap(),
            priority: Priority::new(2).unwrap(),
            completed: false,
            owner_id: IdentityId(owner),
        }
        .with_id(TodoId::new(id).unwrap())
    }

    #[tokio::test]
    async fn test_create_todo_sets_owner() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_create()
            .withf(|todo| todo.owner_id == IdentityId(3) && todo.title.as_str() == "Buy groceries")
            .times(1)
            .returning(|todo| Ok(todo.with_id(TodoId::new(1).unwrap())));

        let service = TodoService::new(Arc::new(repository));

        let todo = service
            .create_todo(&IdentityId(3), command("Buy groceries", false))
            .await
            .unwrap();

        assert_eq!(todo.id.value(), 1);
        assert_eq!(todo.owner_id, IdentityId(3));
    }

    #[tokio::test]
    async fn test_get_todo_of_other_owner_is_not_found() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id_for_owner()
            .with(eq(TodoId::new(1).unwrap()), eq(IdentityId(4)))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .get_todo(&IdentityId(4), &TodoId::new(1).unwrap())
            .await;

        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_todo_replaces_fields() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id_for_owner()
            .returning(|_, _| Ok(Some(stored_todo(1, 3))));
        repository
            .expect_update()
            .withf(|todo| todo.completed && todo.title.as_str() == "Walk the dog")
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let updated = service
            .update_todo(
                &IdentityId(3),
                &TodoId::new(1).unwrap(),
                command("Walk the dog", true),
            )
            .await
            .unwrap();

        assert_eq!(updated.owner_id, IdentityId(3));
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_update_missing_todo_skips_store_update() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id_for_owner()
            .returning(|_, _| Ok(None));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .update_todo(
                &IdentityId(3),
                &TodoId::new(9).unwrap(),
                command("Walk the dog", true),
            )
            .await;

        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_todo_is_owner_scoped() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_delete_for_owner()
            .with(eq(TodoId::new(5).unwrap()), eq(IdentityId(3)))
            .times(1)
            .returning(|_, _| Ok(()));
        repository.expect_delete().times(0);

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .delete_todo(&IdentityId(3), &TodoId::new(5).unwrap())
            .await;

        assert!(result.is_ok());
    }
}
