mod connection;
mod error;
mod models;
/// MongoDB implementation of the storage trait.
pub mod store;

pub use error::MongoDaoError;
pub use store::MongoSantaStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
