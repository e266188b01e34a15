use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, priority, completed, owner_id FROM todos";

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    priority: i16,
    completed: bool,
    owner_id: i64,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(r: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId::new(r.id)?,
            title: TodoTitle::new(r.title)?,
            description: TodoDescription::new(r.description)?,
            priority: Priority::new(i64::from(r.priority))?,
            completed: r.completed,
            owner_id: IdentityId(r.owner_id),
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

fn map_insert_error(e: sqlx::Error, owner: &IdentityId) -> TodoError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => {
            TodoError::OwnerNotFound(owner.to_string())
        }
        _ => database_error(e),
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO todos (title, description, priority, completed, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.priority.value())
        .bind(todo.completed)
        .bind(todo.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &todo.owner_id))?;

        Ok(todo.with_id(TodoId::new(id)?))
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{} WHERE owner_id = $1 ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn find_by_id_for_owner(
        &self,
        id: &TodoId,
        owner: &IdentityId,
    ) -> Result<Option<Todo>, TodoError> {
        sqlx::query_as::<_, TodoRow>(&format!(
            "{} WHERE id = $1 AND owner_id = $2",
            SELECT_COLUMNS
        ))
        .bind(id.value())
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Todo::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $2, description = $3, priority = $4, completed = $5
            WHERE id = $1
            "#,
        )
        .bind(todo.id.value())
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.priority.value())
        .bind(todo.completed)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete_for_owner(&self, id: &TodoId, owner: &IdentityId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id.value())
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
