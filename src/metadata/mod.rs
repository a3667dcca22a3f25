//! Class descriptors and the linked object model.

mod descriptor;
mod error;
pub mod model;

pub use descriptor::{ClassDescriptor, FieldDescriptor, FieldKind};
pub use error::{ModelError, ModelResult};
pub use model::{ClassRef, Model, ModelBuilder, Relation};
