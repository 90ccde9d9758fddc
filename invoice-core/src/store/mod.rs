pub mod factory;
pub mod form_state;
pub mod memory;
pub mod repository;

pub use factory::{BackendRegistry, RepositoryFactory, StoreConfig};
pub use form_state::{FormStateStore, STORAGE_KEY};
pub use memory::{MemoryRepository, MemoryRepositoryFactory};
pub use repository::{RepositoryError, StateRepository};
