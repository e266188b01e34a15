//! Administrative routes. Every handler here sits behind the `admin` role check.

pub mod delete_todo;
pub mod delete_user;
pub mod get_user;
pub mod list_todos;
pub mod list_users;
pub mod update_user;
