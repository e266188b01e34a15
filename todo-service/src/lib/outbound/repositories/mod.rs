pub mod identity;
pub mod memory;
pub mod todo;

pub use identity::PostgresIdentityRepository;
pub use memory::InMemoryStore;
pub use todo::PostgresTodoRepository;
