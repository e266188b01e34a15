pub mod identity;
pub mod todo;
