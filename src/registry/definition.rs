//! Serialized model definitions.
//!
//! A definition is a JSON document naming the model and listing its classes:
//!
//! ```json
//! {
//!   "name": "genomic",
//!   "classes": [
//!     { "name": "BioEntity", "interface": true },
//!     { "name": "Gene", "extends": "SequenceFeature", "implements": ["BioEntity"],
//!       "fields": [{ "kind": "attribute", "name": "symbol", "type": "java.lang.String" }] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{RegistryError, RegistryResult};
use crate::metadata::{ClassDescriptor, FieldDescriptor, Model};

/// A model definition as read from disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelDefinition {
    pub name: String,

    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

/// One class entry of a definition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,

    #[serde(default)]
    pub interface: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

/// A field entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDefinition {
    Attribute {
        name: String,
        #[serde(rename = "type")]
        type_name: String,
    },
    Reference {
        name: String,
        referenced_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reverse: Option<String>,
    },
    Collection {
        name: String,
        referenced_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reverse: Option<String>,
    },
}

impl From<FieldDefinition> for FieldDescriptor {
    fn from(def: FieldDefinition) -> Self {
        match def {
            FieldDefinition::Attribute { name, type_name } => {
                FieldDescriptor::attribute(name, type_name)
            }
            FieldDefinition::Reference {
                name,
                referenced_type,
                reverse,
            } => with_reverse(FieldDescriptor::reference(name, referenced_type), reverse),
            FieldDefinition::Collection {
                name,
                referenced_type,
                reverse,
            } => with_reverse(FieldDescriptor::collection(name, referenced_type), reverse),
        }
    }
}

fn with_reverse(field: FieldDescriptor, reverse: Option<String>) -> FieldDescriptor {
    match reverse {
        Some(reverse) => field.with_reverse(reverse),
        None => field,
    }
}

impl From<ClassDefinition> for ClassDescriptor {
    fn from(def: ClassDefinition) -> Self {
        let mut cld = if def.interface {
            ClassDescriptor::interface(def.name)
        } else {
            ClassDescriptor::class(def.name)
        };
        if let Some(superclass) = def.extends {
            cld = cld.extends(superclass);
        }
        for interface in def.implements {
            cld = cld.implements(interface);
        }
        for field in def.fields {
            cld = cld.with_field(field.into());
        }
        cld
    }
}

impl ModelDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a definition file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegistryError::DefinitionNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Convert into the model name and its unlinked descriptors, in file order.
    pub fn into_descriptors(self) -> (String, Vec<ClassDescriptor>) {
        let descriptors = self.classes.into_iter().map(ClassDescriptor::from).collect();
        (self.name, descriptors)
    }

    /// Build the linked model.
    pub fn build(self) -> RegistryResult<Model> {
        let (name, descriptors) = self.into_descriptors();
        Ok(Model::new(name, descriptors)?)
    }
}
