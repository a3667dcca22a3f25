//! Model construction.
//!
//! Back-references (subclasses, implementors) cannot be known until every
//! forward reference in the batch has been seen, so construction runs in
//! three passes over the full batch:
//!
//! 1. **Index** - put every descriptor in the arena and the name index
//! 2. **Bind** - resolve superclass and interface names, accumulating
//!    back-references
//! 3. **Freeze** - attach the accumulated sets to each class
//!
//! The builder is consumed by [`ModelBuilder::build`]; on error all
//! intermediate state is dropped with it.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::{ClassLinks, Model, Relation};
use crate::metadata::descriptor::ClassDescriptor;
use crate::metadata::error::{ModelError, ModelResult};

/// Collects one atomic batch of descriptors for a model.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    name: String,
    descriptors: Vec<ClassDescriptor>,
}

/// Forward links of one class discovered in pass 2.
struct Bound {
    superclass: Option<NodeIndex>,
    interfaces: Vec<NodeIndex>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    /// Add a descriptor to the batch.
    pub fn add(&mut self, descriptor: ClassDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn with_class(mut self, descriptor: ClassDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn with_classes(mut self, descriptors: impl IntoIterator<Item = ClassDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Number of descriptors collected so far.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Link the batch into a ready [`Model`].
    pub fn build(self) -> ModelResult<Model> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidModelName);
        }
        let name = self.name;

        // Pass 1: index
        let (mut graph, class_index) = index_classes(self.descriptors)?;
        tracing::debug!(model = %name, classes = graph.node_count(), "indexed classes");

        // Pass 2: bind and accumulate back-references
        let node_count = graph.node_count();
        let mut subclasses: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
        let mut implementors: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
        let mut bound = Vec::with_capacity(node_count);

        for idx in graph.node_indices() {
            let cld = &graph[idx];

            let superclass = match cld.superclass_name() {
                Some(super_name) => {
                    let super_idx = *class_index.get(super_name).ok_or_else(|| {
                        ModelError::unresolved_superclass(cld.name(), super_name)
                    })?;
                    subclasses[super_idx.index()].push(idx);
                    Some(super_idx)
                }
                None => None,
            };

            let mut interfaces = Vec::new();
            for interface_name in cld.interface_names() {
                let interface_idx = *class_index.get(interface_name).ok_or_else(|| {
                    ModelError::unresolved_interface(cld.name(), interface_name)
                })?;
                implementors[interface_idx.index()].push(idx);
                interfaces.push(interface_idx);
            }

            bound.push(Bound {
                superclass,
                interfaces,
            });
        }

        for (idx, b) in graph.node_indices().zip(&bound) {
            if let Some(super_idx) = b.superclass {
                graph.add_edge(idx, super_idx, Relation::Extends);
            }
            for &interface_idx in &b.interfaces {
                graph.add_edge(idx, interface_idx, Relation::Implements);
            }
        }
        tracing::debug!(model = %name, edges = graph.edge_count(), "bound class references");

        // Pass 3: freeze
        let by_name = |a: &NodeIndex, b: &NodeIndex| graph[*a].name().cmp(graph[*b].name());
        let mut links = Vec::with_capacity(node_count);
        for ((idx, b), (mut subs, mut impls)) in graph
            .node_indices()
            .zip(bound)
            .zip(subclasses.into_iter().zip(implementors))
        {
            subs.sort_by(by_name);
            if graph[idx].is_interface() {
                impls.sort_by(by_name);
            } else {
                impls.clear();
            }
            links.push(ClassLinks {
                superclass: b.superclass,
                interfaces: b.interfaces,
                subclasses: subs,
                implementors: impls,
            });
        }

        tracing::debug!(model = %name, "froze derived class links");

        Ok(Model {
            name,
            graph,
            class_index,
            links,
        })
    }
}

/// Pass 1: add every descriptor to the arena, rejecting duplicate names.
fn index_classes(
    descriptors: Vec<ClassDescriptor>,
) -> ModelResult<(DiGraph<ClassDescriptor, Relation>, HashMap<String, NodeIndex>)> {
    let mut graph = DiGraph::with_capacity(descriptors.len(), descriptors.len());
    let mut class_index = HashMap::with_capacity(descriptors.len());

    for cld in descriptors {
        if class_index.contains_key(cld.name()) {
            return Err(ModelError::DuplicateClassName(cld.name().to_string()));
        }
        let class_name = cld.name().to_string();
        let idx = graph.add_node(cld);
        class_index.insert(class_name, idx);
    }

    Ok((graph, class_index))
}
