//! Read-only query API of a ready [`Model`].
//!
//! Lookups return `Option`; an absent class is a normal outcome so callers
//! can look up optional classes.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};

use petgraph::graph::NodeIndex;
use sha2::{Digest, Sha256};

use super::Model;
use crate::metadata::descriptor::{ClassDescriptor, FieldDescriptor};

impl Model {
    /// The model's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Option<ClassRef<'_>> {
        self.class_index.get(name).map(|&idx| self.class_ref(idx))
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class_index.contains_key(name)
    }

    /// Every class in the model, in arena order.
    pub fn all_classes(&self) -> Vec<ClassRef<'_>> {
        self.graph.node_indices().map(|idx| self.class_ref(idx)).collect()
    }

    /// Names of every class in the model.
    pub fn class_names(&self) -> BTreeSet<&str> {
        self.class_index.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Classes and interfaces without a superclass.
    pub fn roots(&self) -> Vec<ClassRef<'_>> {
        let mut roots: Vec<_> = self
            .all_classes()
            .into_iter()
            .filter(|c| c.superclass().is_none())
            .collect();
        roots.sort_by(|a, b| a.name().cmp(b.name()));
        roots
    }

    /// All interface descriptors.
    pub fn interfaces(&self) -> Vec<ClassRef<'_>> {
        let mut interfaces: Vec<_> = self
            .all_classes()
            .into_iter()
            .filter(ClassRef::is_interface)
            .collect();
        interfaces.sort_by(|a, b| a.name().cmp(b.name()));
        interfaces
    }

    /// Every class that implements `interface`, directly or through a
    /// superclass or a sub-interface. A sub-interface either lists
    /// `interface` or extends it.
    ///
    /// Returns an empty list when the class is missing or is not an interface.
    pub fn all_implementors(&self, interface: &str) -> Vec<ClassRef<'_>> {
        let Some(root) = self.class(interface).filter(ClassRef::is_interface) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([root.idx]);
        let mut found: BTreeMap<&str, ClassRef<'_>> = BTreeMap::new();
        let mut queue: VecDeque<ClassRef<'_>> = root.direct_implementors().into();
        queue.extend(root.direct_subclasses());
        while let Some(class) = queue.pop_front() {
            if !visited.insert(class.idx) {
                continue;
            }
            queue.extend(class.direct_subclasses());
            if class.is_interface() {
                queue.extend(class.direct_implementors());
            } else {
                found.insert(class.name(), class);
            }
        }
        found.into_values().collect()
    }

    /// SHA-256 of the canonical rendering of the model.
    ///
    /// Batches that differ only in class order share a fingerprint.
    /// Returns a 64-character lowercase hexadecimal string.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn class_ref(&self, idx: NodeIndex) -> ClassRef<'_> {
        ClassRef { model: self, idx }
    }

    fn sorted_by_name(&self) -> Vec<&ClassDescriptor> {
        let mut classes: Vec<_> = self.graph.node_indices().map(|idx| &self.graph[idx]).collect();
        classes.sort_by(|a, b| a.name().cmp(b.name()));
        classes
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<model name=\"{}\">", self.name)?;
        for cld in self.sorted_by_name() {
            write!(f, "{}", cld)?;
        }
        write!(f, "</model>")
    }
}

/// A class resolved within a ready [`Model`].
///
/// Only a ready model hands these out, so the derived sets are always
/// complete when read. Cheap to copy; borrows the model.
#[derive(Clone, Copy)]
pub struct ClassRef<'m> {
    model: &'m Model,
    idx: NodeIndex,
}

impl<'m> ClassRef<'m> {
    /// The underlying descriptor, as supplied to the builder.
    pub fn descriptor(&self) -> &'m ClassDescriptor {
        &self.model.graph[self.idx]
    }

    pub fn name(&self) -> &'m str {
        self.descriptor().name()
    }

    pub fn is_interface(&self) -> bool {
        self.descriptor().is_interface()
    }

    pub fn fields(&self) -> &'m [FieldDescriptor] {
        self.descriptor().fields()
    }

    pub fn field(&self, name: &str) -> Option<&'m FieldDescriptor> {
        self.descriptor().field(name)
    }

    /// The superclass, or `None` at the root of an inheritance chain.
    pub fn superclass(&self) -> Option<ClassRef<'m>> {
        self.model
            .links(self.idx)
            .superclass
            .map(|idx| self.model.class_ref(idx))
    }

    /// Interfaces this class declares directly.
    pub fn interfaces(&self) -> Vec<ClassRef<'m>> {
        self.resolve(&self.model.links(self.idx).interfaces)
    }

    /// Classes whose superclass is exactly this class, sorted by name.
    pub fn direct_subclasses(&self) -> Vec<ClassRef<'m>> {
        self.resolve(&self.model.links(self.idx).subclasses)
    }

    /// Classes that declare this interface directly, sorted by name.
    ///
    /// Always empty for a non-interface class.
    pub fn direct_implementors(&self) -> Vec<ClassRef<'m>> {
        self.resolve(&self.model.links(self.idx).implementors)
    }

    /// Superclass chain, nearest first.
    ///
    /// Stops before a class that is already in the chain, so an inheritance
    /// cycle yields each of its other members once and never this class.
    pub fn ancestors(&self) -> Vec<ClassRef<'m>> {
        let mut visited = HashSet::from([self.idx]);
        let mut chain = Vec::new();
        let mut current = self.superclass();
        while let Some(class) = current {
            if !visited.insert(class.idx) {
                break;
            }
            chain.push(class);
            current = class.superclass();
        }
        chain
    }

    /// All transitive subclasses, breadth first. Never includes this class.
    pub fn descendants(&self) -> Vec<ClassRef<'m>> {
        let mut visited = HashSet::from([self.idx]);
        let mut result = Vec::new();
        let mut queue: VecDeque<ClassRef<'m>> = self.direct_subclasses().into();
        while let Some(class) = queue.pop_front() {
            if !visited.insert(class.idx) {
                continue;
            }
            queue.extend(class.direct_subclasses());
            result.push(class);
        }
        result
    }

    /// Declared and inherited interfaces, including super-interfaces
    /// reached through either an interface list or a superclass, sorted by
    /// name.
    pub fn all_interfaces(&self) -> Vec<ClassRef<'m>> {
        let mut seen: BTreeMap<&'m str, ClassRef<'m>> = BTreeMap::new();
        let mut queue: VecDeque<ClassRef<'m>> = VecDeque::new();

        queue.extend(self.interfaces());
        for ancestor in self.ancestors() {
            queue.extend(ancestor.interfaces());
        }
        while let Some(interface) = queue.pop_front() {
            if seen.insert(interface.name(), interface).is_none() {
                queue.extend(interface.interfaces());
                queue.extend(interface.ancestors());
            }
        }
        seen.into_values().collect()
    }

    /// Whether a value of this class may be used where `other` is expected.
    pub fn is_assignable_to(&self, other: &ClassRef<'_>) -> bool {
        if !std::ptr::eq(self.model, other.model) {
            return false;
        }
        if self.idx == other.idx {
            return true;
        }
        self.ancestors().iter().any(|c| c.idx == other.idx)
            || self.all_interfaces().iter().any(|c| c.idx == other.idx)
    }

    fn resolve(&self, indices: &[NodeIndex]) -> Vec<ClassRef<'m>> {
        indices.iter().map(|&idx| self.model.class_ref(idx)).collect()
    }
}

impl PartialEq for ClassRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.idx == other.idx
    }
}

impl Eq for ClassRef<'_> {}

impl Hash for ClassRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

impl fmt::Debug for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRef")
            .field("model", &self.model.name())
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Display for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor())
    }
}
