//! Host table-store abstraction for table fusion.
//!
//! - [`TableStore`] is the seam to the host platform.
//! - [`MemoryStore`] implements it over a [`WorkspaceSnapshot`] that can be
//!   loaded from and saved to a JSON workspace file.
//! - [`list_sources`] enumerates the grid views offered as fusion sources.

mod error;
mod memory;
mod snapshot;
mod sources;
mod store;

pub use error::{Result, StoreError};
pub use memory::{Faults, MemoryStore, StoreOp};
pub use snapshot::{
    FieldFilter, TableSnapshot, ViewSnapshot, ViewSort, WorkspaceSnapshot, cells_by_name,
};
pub use sources::{SourceOption, list_sources};
pub use store::TableStore;
