//! # metamodel
//!
//! The object-model metadata core of a data-integration platform.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Model definition (<name>_model.json)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [registry::ModelDefinition]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Unlinked ClassDescriptors (names only)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ModelBuilder: index, bind, freeze]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Model (immutable class graph + query API)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [registry::ModelCache]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Shared Arc<Model> for converters / query engine      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod metadata;
pub mod registry;

pub use metadata::{
    ClassDescriptor, ClassRef, FieldDescriptor, FieldKind, Model, ModelBuilder, ModelError,
    ModelResult,
};
pub use registry::{
    DefinitionSource, FileDefinitionSource, ModelCache, ModelDefinition, ModelRegistry,
    RegistryError, RegistryResult,
};
