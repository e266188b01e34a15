use std::fmt;

use super::errors::DescriptionError;
use super::errors::PriorityError;
use super::errors::TitleError;
use super::errors::TodoIdError;
use crate::domain::identity::models::IdentityId;

/// Todo item owned by a single identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
    pub owner_id: IdentityId,
}

/// Todo record before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
    pub owner_id: IdentityId,
}

impl NewTodo {
    pub fn with_id(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            completed: self.completed,
            owner_id: self.owner_id,
        }
    }
}

/// Positive todo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(id: i64) -> Result<Self, TodoIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(TodoIdError::NotPositive(id))
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Title, 3-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Description, 3-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 100;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length < Self::MIN_LENGTH {
            Err(DescriptionError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Priority from 1 (highest) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(i16);

impl Priority {
    const MIN: i16 = 1;
    const MAX: i16 = 5;

    pub fn new(priority: i64) -> Result<Self, PriorityError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&priority) {
            Ok(Self(priority as i16))
        } else {
            Err(PriorityError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: priority,
            })
        }
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

/// Validated fields for creating or replacing a todo.
#[derive(Debug, Clone)]
pub struct TodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_id_must_be_positive() {
        assert!(TodoId::new(1).is_ok());
        assert_eq!(TodoId::new(0), Err(TodoIdError::NotPositive(0)));
        assert_eq!(TodoId::new(-3), Err(TodoIdError::NotPositive(-3)));
    }

    #[test]
    fn test_title_and_description_bounds() {
        assert!(TodoTitle::new("Buy groceries".to_string()).is_ok());
        assert!(matches!(
            TodoTitle::new("ab".to_string()),
            Err(TitleError::TooShort { .. })
        ));
        assert!(matches!(
            TodoTitle::new("x".repeat(51)),
            Err(TitleError::TooLong { .. })
        ));
        assert!(TodoDescription::new("x".repeat(100)).is_ok());
        assert!(matches!(
            TodoDescription::new("x".repeat(101)),
            Err(DescriptionError::TooLong { .. })
        ));
    }

    #[test]
    fn test_priority_range() {
        assert_eq!(Priority::new(1).unwrap().value(), 1);
        assert_eq!(Priority::new(5).unwrap().value(), 5);
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(6).is_err());
    }
}
