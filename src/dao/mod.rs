/// Database model definitions.
pub mod models;
/// Event/participant/assignment storage operations.
pub mod santa_store;
/// Storage abstraction layer for database operations.
pub mod storage;
