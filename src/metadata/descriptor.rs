//! Unlinked class descriptors.
//!
//! A descriptor names its relations (superclass, interfaces) instead of
//! pointing at them, because siblings in the same batch may not exist yet
//! when it is created. Names are resolved by [`ModelBuilder`](super::ModelBuilder).

use std::collections::BTreeSet;
use std::fmt;

/// Kind of a field carried by a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar attribute with a type name (e.g. `java.lang.String`).
    Attribute { type_name: String },
    /// Single-valued reference to another class.
    Reference {
        referenced_type: String,
        reverse: Option<String>,
    },
    /// Multi-valued reference to another class.
    Collection {
        referenced_type: String,
        reverse: Option<String>,
    },
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Attribute { .. } => "attribute",
            FieldKind::Reference { .. } => "reference",
            FieldKind::Collection { .. } => "collection",
        }
    }
}

/// A field of a class. Carried through model construction untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn attribute(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Attribute {
                type_name: type_name.into(),
            },
        }
    }

    pub fn reference(name: impl Into<String>, referenced_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Reference {
                referenced_type: referenced_type.into(),
                reverse: None,
            },
        }
    }

    pub fn collection(name: impl Into<String>, referenced_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Collection {
                referenced_type: referenced_type.into(),
                reverse: None,
            },
        }
    }

    /// Set the reverse field name of a reference or collection.
    ///
    /// Has no effect on attributes.
    pub fn with_reverse(mut self, reverse: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Reference { reverse: r, .. } | FieldKind::Collection { reverse: r, .. } => {
                *r = Some(reverse.into());
            }
            FieldKind::Attribute { .. } => {}
        }
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldKind::Attribute { type_name } => {
                write!(f, "<attribute name=\"{}\" type=\"{}\"/>", self.name, type_name)
            }
            FieldKind::Reference {
                referenced_type,
                reverse,
            }
            | FieldKind::Collection {
                referenced_type,
                reverse,
            } => {
                write!(
                    f,
                    "<{} name=\"{}\" referenced-type=\"{}\"",
                    self.kind.as_str(),
                    self.name,
                    referenced_type
                )?;
                if let Some(reverse) = reverse {
                    write!(f, " reverse-reference=\"{}\"", reverse)?;
                }
                write!(f, "/>")
            }
        }
    }
}

/// Definition of one class or interface, before linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    name: String,
    superclass_name: Option<String>,
    interface_names: BTreeSet<String>,
    is_interface: bool,
    fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Create a concrete class with no superclass, interfaces or fields.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass_name: None,
            interface_names: BTreeSet::new(),
            is_interface: false,
            fields: Vec::new(),
        }
    }

    /// Create an interface with no super-interfaces or fields.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::class(name)
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass_name = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interface_names.insert(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass_name(&self) -> Option<&str> {
        self.superclass_name.as_deref()
    }

    pub fn interface_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.interface_names.iter().map(String::as_str)
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class name=\"{}\"", self.name)?;
        if let Some(superclass) = &self.superclass_name {
            write!(f, " extends=\"{}\"", superclass)?;
        }
        if !self.interface_names.is_empty() {
            let names: Vec<&str> = self.interface_names().collect();
            write!(f, " implements=\"{}\"", names.join(" "))?;
        }
        write!(f, " is-interface=\"{}\">", self.is_interface)?;
        for field in &self.fields {
            write!(f, "{}", field)?;
        }
        write!(f, "</class>")
    }
}
