pub mod pool;
pub mod schema;
pub mod storage;

pub use pool::create_pool;
pub use schema::{ensure_schema, wipe_all};
pub use storage::{SqlParam, Storage, StorageError};
