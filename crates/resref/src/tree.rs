//! The resource tree: a branch/leaf hierarchy indexed by dotted [`ResourceId`].
//!
//! Mirrors the "arena + index" shape used elsewhere in this crate's sibling
//! engine: each branch owns its children in an insertion-ordered,
//! hash-indexed collection rather than nested smart pointers, so cloning a
//! subtree is a plain data copy and there is no possibility of a cycle.
use ahash::AHashMap;

use crate::{
    error::{Error, Result},
    names::ResourceName,
    resource_id::ResourceId,
};

/// An insertion-ordered collection of children, keyed by [`ResourceName`].
#[derive(Debug, Clone)]
pub struct Children<T> {
    order: Vec<(ResourceName, Node<T>)>,
    index: AHashMap<ResourceName, usize>,
}

impl<T> Default for Children<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<T> Children<T> {
    fn get(&self, name: &ResourceName) -> Option<&Node<T>> {
        self.index.get(name).map(|&i| &self.order[i].1)
    }

    fn get_mut(&mut self, name: &ResourceName) -> Option<&mut Node<T>> {
        if let Some(&i) = self.index.get(name) {
            Some(&mut self.order[i].1)
        } else {
            None
        }
    }

    fn insert(&mut self, name: ResourceName, node: Node<T>) {
        self.index.insert(name.clone(), self.order.len());
        self.order.push((name, node));
    }

    /// Iterate `(name, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceName, &Node<T>)> {
        self.order.iter().map(|(name, node)| (name, node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A node of the resource tree.
#[derive(Debug, Clone)]
pub enum Node<T> {
    /// The root of the tree. Not addressable by id.
    Root { children: Children<T> },
    /// An intermediate node: no resource of its own, only children.
    Branch {
        name: ResourceName,
        id: ResourceId,
        children: Children<T>,
    },
    /// A terminal node carrying a resource.
    Leaf {
        name: ResourceName,
        id: ResourceId,
        resource: T,
    },
}

impl<T> Node<T> {
    fn children(&self) -> Option<&Children<T>> {
        match self {
            Node::Root { children } | Node::Branch { children, .. } => Some(children),
            Node::Leaf { .. } => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Children<T>> {
        match self {
            Node::Root { children } | Node::Branch { children, .. } => Some(children),
            Node::Leaf { .. } => None,
        }
    }
}

/// The resource tree, built incrementally from `(ResourceId, T)` pairs.
///
/// # Invariant (no-overlap)
///
/// For any id `x`, at most one of these holds: `x` is a leaf, `x` is a
/// branch, `x` is absent. This is enforced on every insertion: walking or
/// creating a branch fails if the slot is already a leaf, and inserting a
/// leaf fails if a leaf or branch already exists at that name.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    root: Children<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            root: Children::default(),
        }
    }
}

impl<T> Tree<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a leaf at `id`, creating intermediate branches as needed.
    ///
    /// Fails with [`Error::TreeShapeConflict`] if any proper prefix of `id`
    /// is already a leaf, or [`Error::DuplicateEntry`] if `id` itself is
    /// already occupied (by a leaf or a branch).
    pub fn insert(&mut self, id: &ResourceId, resource: T) -> Result<()> {
        let segments = id.split();
        let (branch_segments, leaf_name) = segments.split_at(segments.len() - 1);
        let leaf_name = &leaf_name[0];

        let mut children = &mut self.root;
        let mut prefix: Option<ResourceId> = None;
        for segment in branch_segments {
            let branch_id = ResourceId::child(prefix.as_ref(), segment);
            match children.get(segment) {
                Some(Node::Leaf { .. }) => {
                    return Err(Error::tree_shape_conflict(branch_id.as_str()));
                }
                Some(Node::Branch { .. }) => {}
                Some(Node::Root { .. }) | None => {
                    children.insert(
                        segment.clone(),
                        Node::Branch {
                            name: segment.clone(),
                            id: branch_id.clone(),
                            children: Children::default(),
                        },
                    );
                }
            }
            prefix = Some(branch_id);
            children = match children.get_mut(segment) {
                Some(Node::Branch { children, .. }) => children,
                _ => unreachable!("just inserted or confirmed a branch"),
            };
        }

        if children.get(leaf_name).is_some() {
            return Err(Error::duplicate_entry(id.as_str()));
        }
        children.insert(
            leaf_name.clone(),
            Node::Leaf {
                name: leaf_name.clone(),
                id: id.clone(),
                resource,
            },
        );
        Ok(())
    }

    /// Build a tree from a list of `(id, resource)` pairs, aggregating
    /// failures across independent insertions rather than stopping at the
    /// first one.
    pub fn build(pairs: impl IntoIterator<Item = (ResourceId, T)>) -> Result<Self> {
        let mut tree = Self::new();
        let mut errors = Vec::new();
        for (id, resource) in pairs {
            if let Err(error) = tree.insert(&id, resource) {
                errors.push(error);
            }
        }
        if errors.is_empty() {
            Ok(tree)
        } else {
            Err(Error::Aggregate(errors))
        }
    }

    fn find(&self, id: &ResourceId) -> Option<&Node<T>> {
        let segments = id.split();
        let mut children = &self.root;
        let mut node = None;
        for (i, segment) in segments.iter().enumerate() {
            match children.get(segment) {
                Some(found) => {
                    node = Some(found);
                    if i + 1 < segments.len() {
                        children = found.children()?;
                    }
                }
                None => return None,
            }
        }
        node
    }

    /// Look up any node (leaf or branch) by id.
    pub fn get_by_id(&self, id: &ResourceId) -> Result<&Node<T>> {
        self.find(id).ok_or_else(|| Error::not_found(id.as_str()))
    }

    /// Look up a leaf by id.
    pub fn get_resource_by_id(&self, id: &ResourceId) -> Result<&T> {
        match self.find(id) {
            Some(Node::Leaf { resource, .. }) => Ok(resource),
            Some(_) => Err(Error::not_a_leaf(id.as_str())),
            None => Err(Error::not_found(id.as_str())),
        }
    }

    /// Look up a branch by id.
    pub fn get_branch_by_id(&self, id: &ResourceId) -> Result<&Children<T>> {
        match self.find(id) {
            Some(Node::Branch { children, .. }) => Ok(children),
            Some(_) => Err(Error::not_a_branch(id.as_str())),
            None => Err(Error::not_found(id.as_str())),
        }
    }

    /// The top-level children of the root.
    pub fn roots(&self) -> &Children<T> {
        &self.root
    }
}

/// A validating façade over [`Tree`] that accepts raw strings, converting
/// them to [`ResourceId`]/[`ResourceName`] before delegating.
#[derive(Debug, Clone, Default)]
pub struct ValidatingTree<T>(Tree<T>);

impl<T> ValidatingTree<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(Tree::new())
    }

    pub fn insert(&mut self, id: &str, resource: T) -> Result<()> {
        let id = ResourceId::new(id)?;
        self.0.insert(&id, resource)
    }

    pub fn get_by_id(&self, id: &str) -> Result<&Node<T>> {
        let id = ResourceId::new(id)?;
        self.0.get_by_id(&id)
    }

    pub fn get_resource_by_id(&self, id: &str) -> Result<&T> {
        let id = ResourceId::new(id)?;
        self.0.get_resource_by_id(&id)
    }

    pub fn get_branch_by_id(&self, id: &str) -> Result<&Children<T>> {
        let id = ResourceId::new(id)?;
        self.0.get_branch_by_id(&id)
    }

    #[must_use]
    pub fn inner(&self) -> &Tree<T> {
        &self.0
    }
}
