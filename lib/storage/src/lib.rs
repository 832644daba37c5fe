pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{Result, StorageError};
pub use snapshot::{ModelMetadata, ModelSnapshot, VocabularySizes, FORMAT_VERSION, MODEL_VERSION};
pub use store::ModelStore;
