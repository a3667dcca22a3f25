//! The linked, immutable object model.
//!
//! Descriptors live in a single `petgraph` arena. Superclass and interface
//! links are `Extends` / `Implements` edges pointing from a class to the
//! class it names; the derived back-references (direct subclasses, direct
//! implementors) are frozen per node once the builder finishes.
//!
//! The module is organized into submodules:
//! - `builder`: the three-pass construction (index, bind, freeze)
//! - `query`: lookups, resolved-class handles and hierarchy walks

mod builder;
mod query;


pub use builder::ModelBuilder;
pub use query::ClassRef;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::descriptor::ClassDescriptor;
use super::error::ModelError;

/// Edge type in the class graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// class → its superclass
    Extends,
    /// class → an interface it declares
    Implements,
}

/// Resolved links of one class, frozen at construction.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClassLinks {
    pub(crate) superclass: Option<NodeIndex>,
    pub(crate) interfaces: Vec<NodeIndex>,
    pub(crate) subclasses: Vec<NodeIndex>,
    pub(crate) implementors: Vec<NodeIndex>,
}

/// A named business model: every class descriptor of one schema, linked.
///
/// A `Model` only exists in its ready state. It is built by
/// [`ModelBuilder::build`] (or [`Model::new`]) and never mutated
/// afterwards, so it can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,

    /// Arena of descriptors with Extends / Implements edges
    graph: DiGraph<ClassDescriptor, Relation>,

    /// Index: class name → NodeIndex
    class_index: HashMap<String, NodeIndex>,

    /// Frozen links, indexed by `NodeIndex::index()`
    links: Vec<ClassLinks>,
}

impl Model {
    /// Build a model from a name and a batch of descriptors.
    ///
    /// Shorthand for `ModelBuilder::new(name).with_classes(descriptors).build()`.
    pub fn new(
        name: impl Into<String>,
        descriptors: impl IntoIterator<Item = ClassDescriptor>,
    ) -> super::ModelResult<Self> {
        ModelBuilder::new(name).with_classes(descriptors).build()
    }

    /// Report the first superclass chain that loops back on itself.
    ///
    /// Cycles do not stop a model from building; this is an optional
    /// validation for callers that want a strict hierarchy. The returned
    /// path is closed by repeating its first class.
    pub fn check_acyclic(&self) -> super::ModelResult<()> {
        let mut state = vec![Visit::Unseen; self.links.len()];

        for start in 0..self.links.len() {
            let mut path = Vec::new();
            let mut current = Some(start);

            while let Some(i) = current {
                match state[i] {
                    Visit::Done => break,
                    Visit::OnPath => {
                        let begin = path.iter().position(|&p| p == i).unwrap_or(0);
                        let mut cycle: Vec<String> = path[begin..]
                            .iter()
                            .map(|&p| self.graph[NodeIndex::new(p)].name().to_string())
                            .collect();
                        cycle.push(self.graph[NodeIndex::new(i)].name().to_string());
                        return Err(ModelError::CyclicInheritance(cycle));
                    }
                    Visit::Unseen => {
                        state[i] = Visit::OnPath;
                        path.push(i);
                        current = self.links[i].superclass.map(NodeIndex::index);
                    }
                }
            }

            for i in path {
                state[i] = Visit::Done;
            }
        }

        Ok(())
    }

    pub(crate) fn links(&self, idx: NodeIndex) -> &ClassLinks {
        &self.links[idx.index()]
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}
