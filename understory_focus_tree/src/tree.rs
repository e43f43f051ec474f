// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus tree: slot storage for registered nodes and path lookup.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::bounds::{BoundsProvider, BoundsUnavailable};
use crate::direction::DirectionSet;
use crate::error::FocusError;
use crate::event::FocusChange;
use crate::path::FocusPath;
use crate::resolver::{Candidate, PreferredChildResolver};

/// Bounds required of node keys.
///
/// Keys only need to be unique among siblings. Any small, clonable identifier
/// works; tests and demos use `&'static str`.
pub trait FocusKey: Clone + Eq + Hash + fmt::Debug {}

impl<K> FocusKey for K where K: Clone + Eq + Hash + fmt::Debug {}

/// Identifier for a node in a [`FocusTree`].
///
/// A small, copyable handle consisting of a slot index and a generation
/// counter. On unregister the slot is freed; when it is reused its generation
/// is incremented, so a stale `NodeId` never aliases a later node. A slot
/// whose generation is exhausted is retired instead of reused.
/// Use [`FocusTree::is_alive`] to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

pub(crate) type FocusHandler<K> = Box<dyn FnMut(&FocusChange<K>)>;

/// Registration record for a focusable region.
///
/// Built by the rendering layer when a region mounts and handed to
/// [`FocusManager::register`](crate::FocusManager::register).
///
/// ```
/// use kurbo::Rect;
/// use understory_focus_tree::{Direction, FocusableNode};
///
/// let menu = FocusableNode::new("menu", Rect::new(0.0, 0.0, 200.0, 40.0))
///     .with_lock([Direction::Up, Direction::Down]);
/// assert!(menu.lock().has(Direction::Up));
/// ```
pub struct FocusableNode<K> {
    key: K,
    bounds: Box<dyn BoundsProvider>,
    lock: DirectionSet,
    resolver: Option<Box<dyn PreferredChildResolver<K>>>,
    on_focus: Option<FocusHandler<K>>,
    on_blur: Option<FocusHandler<K>>,
}

impl<K> FocusableNode<K> {
    /// A node with `key`, reading its box from `bounds`, with no lock and the
    /// default geometric resolver for its children.
    pub fn new(key: K, bounds: impl BoundsProvider + 'static) -> Self {
        Self {
            key,
            bounds: Box::new(bounds),
            lock: DirectionSet::empty(),
            resolver: None,
            on_focus: None,
            on_blur: None,
        }
    }

    /// Forbid directional moves in `lock` while focus is inside this subtree.
    pub fn with_lock(mut self, lock: impl Into<DirectionSet>) -> Self {
        self.lock = lock.into();
        self
    }

    /// Choose among this node's children with `resolver` instead of the
    /// default geometric policy.
    pub fn with_resolver(mut self, resolver: impl PreferredChildResolver<K> + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Called when this node becomes part of the focus path.
    pub fn on_focus(mut self, handler: impl FnMut(&FocusChange<K>) + 'static) -> Self {
        self.on_focus = Some(Box::new(handler));
        self
    }

    /// Called when this node stops being part of the focus path.
    pub fn on_blur(mut self, handler: impl FnMut(&FocusChange<K>) + 'static) -> Self {
        self.on_blur = Some(Box::new(handler));
        self
    }

    /// The node's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The node's lock set.
    pub fn lock(&self) -> DirectionSet {
        self.lock
    }
}

impl<K: fmt::Debug> fmt::Debug for FocusableNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusableNode")
            .field("key", &self.key)
            .field("lock", &self.lock)
            .field("custom_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

struct Node<K> {
    generation: u32,
    path: FocusPath<K>,
    parent: Option<NodeId>,
    /// Insertion order; drives deterministic tie-breaks.
    children: Vec<NodeId>,
    by_key: HashMap<K, NodeId>,
    /// `None` only for the root.
    bounds: Option<Box<dyn BoundsProvider>>,
    lock: DirectionSet,
    resolver: Option<Box<dyn PreferredChildResolver<K>>>,
    on_focus: Option<FocusHandler<K>>,
    on_blur: Option<FocusHandler<K>>,
}

impl<K> Node<K> {
    fn root() -> Self {
        Self {
            generation: 1,
            path: FocusPath::new(),
            parent: None,
            children: Vec::new(),
            by_key: HashMap::new(),
            bounds: None,
            lock: DirectionSet::empty(),
            resolver: None,
            on_focus: None,
            on_blur: None,
        }
    }
}

/// Tree of focusable nodes.
///
/// The tree exclusively owns every node. Each node keeps a non-owning
/// [`NodeId`] link to its parent and its children in insertion order. There is
/// exactly one root, created with the tree and never removed; it has the empty
/// path and no bounds.
///
/// The tree is read-only outside the crate: all structural edits go through
/// [`FocusManager`](crate::FocusManager) so the focus path can be reconciled.
pub struct FocusTree<K> {
    /// slots
    nodes: Vec<Option<Node<K>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
}

impl<K> fmt::Debug for FocusTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusTree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<K: FocusKey> Default for FocusTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FocusTree<K> {
    fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes
            .get(id.idx())
            .and_then(Option::as_ref)
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.nodes
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|n| n.generation == id.1)
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if only the root is present.
    pub fn is_empty(&self) -> bool {
        self.node(self.root).is_none_or(|root| root.children.is_empty())
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Path of a live node (empty for the root).
    pub fn path(&self, id: NodeId) -> Option<&FocusPath<K>> {
        self.node(id).map(|n| &n.path)
    }

    /// Parent of a live node; `None` for the root or a stale id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a live node in registration order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Lock set of a live node.
    pub fn lock(&self, id: NodeId) -> DirectionSet {
        self.node(id).map_or(DirectionSet::empty(), |n| n.lock)
    }

    /// Current bounds of a live node.
    ///
    /// Fails for the root, for stale ids, and when the node's provider fails.
    pub fn bounds(&self, id: NodeId) -> Result<Rect, BoundsUnavailable> {
        self.node(id)
            .and_then(|n| n.bounds.as_deref())
            .ok_or(BoundsUnavailable)?
            .bounds()
    }

    pub(crate) fn resolver(&self, id: NodeId) -> Option<&dyn PreferredChildResolver<K>> {
        self.node(id).and_then(|n| n.resolver.as_deref())
    }

    pub(crate) fn set_resolver(
        &mut self,
        id: NodeId,
        resolver: Option<Box<dyn PreferredChildResolver<K>>>,
    ) {
        if let Some(node) = self.node_mut(id) {
            node.resolver = resolver;
        }
    }

    /// A resolver-facing view of a live, non-root node.
    pub(crate) fn candidate(&self, id: NodeId) -> Option<Candidate<'_, K>> {
        let node = self.node(id)?;
        Some(Candidate::new(
            id,
            node.path.last()?,
            &node.path,
            node.bounds.as_deref()?,
            !node.children.is_empty(),
        ))
    }

    /// Invoke the focus or blur handler of a live node, if it has one.
    pub(crate) fn notify(&mut self, id: NodeId, focused: bool, change: &FocusChange<K>) {
        if let Some(node) = self.node_mut(id) {
            let handler = if focused {
                node.on_focus.as_mut()
            } else {
                node.on_blur.as_mut()
            };
            if let Some(handler) = handler {
                handler(change);
            }
        }
    }
}

impl<K: FocusKey> FocusTree<K> {
    /// Create a tree containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Some(Node::root())],
            generations: alloc::vec![1],
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
        }
    }

    /// Look up the node at `path`. The empty path resolves to the root.
    pub fn resolve(&self, path: &[K]) -> Option<NodeId> {
        path.iter().try_fold(self.root, |id, key| {
            self.node(id).and_then(|n| n.by_key.get(key).copied())
        })
    }

    /// Children of the node at `path`, in registration order.
    pub fn children_of(&self, path: &[K]) -> Option<&[NodeId]> {
        self.resolve(path).map(|id| self.children(id))
    }

    /// Child of `parent` with the given key.
    pub fn child_by_key(&self, parent: NodeId, key: &K) -> Option<NodeId> {
        self.node(parent).and_then(|n| n.by_key.get(key).copied())
    }

    /// Key of a live, non-root node.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).and_then(|n| n.path.last())
    }

    /// Deepest node along `path` that still resolves, and how many keys matched.
    pub(crate) fn deepest_prefix(&self, path: &[K]) -> (NodeId, usize) {
        let mut id = self.root;
        for (depth, key) in path.iter().enumerate() {
            match self.child_by_key(id, key) {
                Some(child) => id = child,
                None => return (id, depth),
            }
        }
        (id, path.len())
    }

    /// Attach `node` as the last child of the node at `parent`.
    ///
    /// Fails with [`FocusError::NoSuchParent`] if `parent` does not resolve and
    /// with [`FocusError::DuplicateKey`] if the parent already has a child with
    /// the same key. On failure the tree is unchanged.
    pub(crate) fn register(
        &mut self,
        parent: &[K],
        node: FocusableNode<K>,
    ) -> Result<NodeId, FocusError<K>> {
        let parent_id = self
            .resolve(parent)
            .ok_or_else(|| FocusError::NoSuchParent(FocusPath::from_slice(parent)))?;
        if self.child_by_key(parent_id, &node.key).is_some() {
            return Err(FocusError::DuplicateKey {
                parent: FocusPath::from_slice(parent),
                key: node.key,
            });
        }

        let FocusableNode {
            key,
            bounds,
            lock,
            resolver,
            on_focus,
            on_blur,
        } = node;
        let make = |generation| Node {
            generation,
            path: FocusPath::from_slice(parent).child(key.clone()),
            parent: Some(parent_id),
            children: Vec::new(),
            by_key: HashMap::new(),
            bounds: Some(bounds),
            lock,
            resolver,
            on_focus,
            on_blur,
        };

        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(make(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(make(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);

        if let Some(p) = self.node_mut(parent_id) {
            p.children.push(id);
            p.by_key.insert(key, id);
        }
        Ok(id)
    }

    /// Detach the node at `path` together with its whole subtree.
    ///
    /// Fails with [`FocusError::NoSuchNode`] if `path` does not resolve or names
    /// the root. Returns the number of nodes removed.
    pub(crate) fn unregister(&mut self, path: &[K]) -> Result<usize, FocusError<K>> {
        let id = match self.resolve(path) {
            Some(id) if id != self.root => id,
            _ => return Err(FocusError::NoSuchNode(FocusPath::from_slice(path))),
        };
        if let Some(parent) = self.parent(id)
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|&c| c != id);
            if let Some(key) = path.last() {
                p.by_key.remove(key);
            }
        }

        let mut removed = 0;
        let mut stack = alloc::vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(id.idx()).and_then(Option::take) {
                stack.extend(node.children);
                if self.generations[id.idx()] < u32::MAX {
                    self.free_list.push(id.idx());
                }
                removed += 1;
            }
        }
        Ok(removed)
    }
}
