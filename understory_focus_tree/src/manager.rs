// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus manager: registration, directional moves, locks, and notifications.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::direction::Direction;
use crate::error::FocusError;
use crate::event::{FocusChange, FocusEvent, ListenerId};
use crate::geometry::DistanceWeights;
use crate::path::FocusPath;
use crate::resolver::{Candidate, GeometricResolver, Origin, PreferredChildResolver};
use crate::tree::{FocusKey, FocusTree, FocusableNode, NodeId};

type Listener<K> = Box<dyn FnMut(&FocusChange<K>)>;

/// A navigation command from the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<K> {
    /// Move focus up.
    MoveUp,
    /// Move focus down.
    MoveDown,
    /// Move focus left.
    MoveLeft,
    /// Move focus right.
    MoveRight,
    /// Focus the given path explicitly.
    ExplicitFocus(FocusPath<K>),
}

impl<K> Command<K> {
    /// The direction of a move command.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::ExplicitFocus(_) => None,
        }
    }
}

impl<K> From<Direction> for Command<K> {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::MoveUp,
            Direction::Down => Self::MoveDown,
            Direction::Left => Self::MoveLeft,
            Direction::Right => Self::MoveRight,
        }
    }
}

/// Construction-time configuration for a [`FocusManager`].
#[derive(Clone, Debug, PartialEq)]
pub struct FocusOptions<K> {
    /// Path to focus once its nodes have been registered.
    ///
    /// Until focus reaches this path, each registration re-enters the tree
    /// from the root, preferring the child named by this path at every depth.
    /// The request is dropped once reached, or after the first explicit
    /// [`set_focus`](FocusManager::set_focus) or successful
    /// [`move_focus`](FocusManager::move_focus).
    pub initial_focus: Option<FocusPath<K>>,
    /// Weights used by the default geometric resolver.
    pub weights: DistanceWeights,
}

impl<K> Default for FocusOptions<K> {
    fn default() -> Self {
        Self {
            initial_focus: None,
            weights: DistanceWeights::default(),
        }
    }
}

impl<K> FocusOptions<K> {
    /// Request `path` as the initial focus.
    pub fn with_initial_focus(mut self, path: impl Into<FocusPath<K>>) -> Self {
        self.initial_focus = Some(path.into());
        self
    }

    /// Use `weights` for the default geometric resolver.
    pub fn with_weights(mut self, weights: DistanceWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Owns the [`FocusTree`] and the focus path, and is the only way to mutate either.
///
/// Every operation runs to completion synchronously. The manager is not
/// thread-safe; callers deliver one command at a time.
///
/// ## Invariants
///
/// - The focus path always resolves: it is empty (nothing focused) or names a
///   registered node. When focus rests on a node with children, it is because
///   a custom resolver declined to choose one.
/// - Listeners only ever observe committed state. A change notification is
///   sent only when the path actually changed.
///
/// ## Example
///
/// ```
/// use kurbo::Rect;
/// use understory_focus_tree::{Direction, FocusManager, FocusableNode};
///
/// let mut focus = FocusManager::new();
/// focus.register(&[], FocusableNode::new("row", Rect::new(0.0, 0.0, 100.0, 20.0))).unwrap();
/// focus.register(&["row"], FocusableNode::new("a", Rect::new(0.0, 0.0, 40.0, 20.0))).unwrap();
/// focus.register(&["row"], FocusableNode::new("b", Rect::new(60.0, 0.0, 100.0, 20.0))).unwrap();
/// assert_eq!(focus.focus_path(), &["row", "a"]);
///
/// focus.subscribe(|change| {
///     assert_eq!(change.current, ["row", "b"]);
/// });
/// assert!(focus.move_focus(Direction::Right));
/// assert!(focus.is_focused(&["row"]));
/// ```
pub struct FocusManager<K> {
    tree: FocusTree<K>,
    focus: FocusPath<K>,
    pending_initial: Option<FocusPath<K>>,
    resolver: GeometricResolver,
    listeners: Vec<(ListenerId, Listener<K>)>,
    next_listener: u64,
}

impl<K: fmt::Debug> fmt::Debug for FocusManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusManager")
            .field("tree", &self.tree)
            .field("focus", &self.focus)
            .field("pending_initial", &self.pending_initial)
            .field("resolver", &self.resolver)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<K: FocusKey> Default for FocusManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FocusKey> FocusManager<K> {
    /// A manager with an empty tree, nothing focused, and default options.
    pub fn new() -> Self {
        Self::with_options(FocusOptions::default())
    }

    /// A manager with an empty tree, nothing focused, and the given options.
    pub fn with_options(options: FocusOptions<K>) -> Self {
        Self {
            tree: FocusTree::new(),
            focus: FocusPath::new(),
            pending_initial: options.initial_focus,
            resolver: GeometricResolver::new(options.weights),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Read-only access to the tree.
    pub fn tree(&self) -> &FocusTree<K> {
        &self.tree
    }

    /// The current focus path; empty when nothing is focused.
    pub fn focus_path(&self) -> &FocusPath<K> {
        &self.focus
    }

    /// Returns true if the node at `path` is focused, that is `path` is a
    /// non-empty prefix of (or equal to) the focus path.
    pub fn is_focused(&self, path: &[K]) -> bool {
        !path.is_empty() && self.focus.starts_with(path)
    }

    /// Returns true if `path` is exactly the focus path.
    pub fn is_focused_leaf(&self, path: &[K]) -> bool {
        !path.is_empty() && self.focus == *path
    }

    /// Choose among the root's children with `resolver` instead of the
    /// default geometric policy.
    ///
    /// Registered nodes take a resolver through
    /// [`FocusableNode::with_resolver`]; the root is never registered, so its
    /// policy is set here. Focus is not recomputed.
    pub fn set_root_resolver(&mut self, resolver: impl PreferredChildResolver<K> + 'static) {
        let root = self.tree.root();
        self.tree.set_resolver(root, Some(Box::new(resolver)));
    }

    /// Register `listener` for change notifications.
    ///
    /// Listeners run synchronously after per-node handlers, in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&FocusChange<K>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Attach `node` under the node at `parent` (the empty path is the root).
    ///
    /// If nothing is focused yet, focus enters the tree from the root. If the
    /// focused node gains its first child, focus descends into it. A pending
    /// initial focus request is retried.
    pub fn register(
        &mut self,
        parent: &[K],
        node: FocusableNode<K>,
    ) -> Result<NodeId, FocusError<K>> {
        let id = self.tree.register(parent, node)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = ?self.tree.path(id), "registered focusable node");

        let parent_id = self.tree.parent(id).unwrap_or(self.tree.root());
        let start = if self.pending_initial.is_some() || self.focus.is_empty() {
            Some(self.tree.root())
        } else if self.tree.path(parent_id) == Some(&self.focus) {
            Some(parent_id)
        } else {
            None
        };
        if let Some(start) = start {
            let target = self.descend(start, self.pending_initial.as_deref());
            let path = self.path_of(target);
            if self.pending_initial.as_ref() == Some(&path) {
                self.pending_initial = None;
            }
            self.commit(path);
        }
        Ok(id)
    }

    /// Detach the node at `path` and its whole subtree.
    ///
    /// If the focus path ran through the removed subtree, focus is reconciled
    /// before this returns: see [`FocusManager::reconcile_after_unregister`].
    pub fn unregister(&mut self, path: &[K]) -> Result<(), FocusError<K>> {
        let _removed = self.tree.unregister(path)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(?path, removed = _removed, "unregistered focusable subtree");

        if self.focus.starts_with(path) {
            self.reconcile_after_unregister(path);
        }
        Ok(())
    }

    /// Repair the focus path after the subtree at `removed` was detached.
    ///
    /// Truncates the focus path to its deepest surviving ancestor and
    /// re-enters that ancestor by default entry. If the root has no children
    /// left, nothing is focused.
    fn reconcile_after_unregister(&mut self, removed: &[K]) {
        let (survivor, depth) = self.tree.deepest_prefix(&self.focus);
        debug_assert!(
            depth < removed.len(),
            "focus still resolves below the removed path"
        );
        let target = self.descend(survivor, None);
        let path = self.path_of(target);
        self.commit(path);
    }

    /// Focus `path` explicitly, ignoring locks.
    ///
    /// An internal node is completed to a leaf by default entry. Returns whether
    /// the focus path changed; fails with [`FocusError::InvalidPath`] if `path`
    /// is empty (the root is never focusable) or does not resolve.
    pub fn set_focus(&mut self, path: &[K]) -> Result<bool, FocusError<K>> {
        let id = self
            .tree
            .resolve(path)
            .filter(|_| !path.is_empty())
            .ok_or_else(|| FocusError::InvalidPath(FocusPath::from_slice(path)))?;
        self.pending_initial = None;
        let target = self.descend(id, None);
        let path = self.path_of(target);
        Ok(self.commit(path))
    }

    /// Move focus in `direction`. Returns whether the focus path changed.
    ///
    /// 1. If the focused node or any of its ancestors locks `direction`,
    ///    nothing happens.
    /// 2. Otherwise, from the focused node's parent upward, the siblings of the
    ///    current branch are offered to the parent's resolver with the focused
    ///    node as origin. The first level that yields a candidate wins.
    /// 3. Focus descends into the winner by default entry.
    ///
    /// When no level yields a candidate the move is a no-op: the path is
    /// unchanged and no notification is sent.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(leaf) = self.focused_node() else {
            #[cfg(feature = "tracing")]
            tracing::trace!(?direction, "move ignored: nothing focused");
            return false;
        };

        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            if self.tree.lock(id).has(direction) {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    ?direction,
                    locked_by = ?self.tree.path(id),
                    "move blocked by lock"
                );
                return false;
            }
            cursor = self.tree.parent(id);
        }

        let Some(origin_bounds) = self.origin_bounds(leaf) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(?direction, "move ignored: focused node has no bounds");
            return false;
        };
        let origin = Origin::new(&self.focus, origin_bounds);

        let mut branch = leaf;
        let mut found = None;
        while let Some(parent) = self.tree.parent(branch) {
            let hit =
                self.preferred_child(parent, Some(branch), Some(&origin), Some(direction));
            if hit.is_some() {
                found = hit;
                break;
            }
            branch = parent;
        }

        let Some(hit) = found else {
            #[cfg(feature = "tracing")]
            tracing::trace!(?direction, focus = ?self.focus, "move ignored: no candidate");
            return false;
        };
        let target = self.descend(hit, None);
        let path = self.path_of(target);
        self.pending_initial = None;
        self.commit(path)
    }

    /// Execute one input command.
    ///
    /// Moves never fail; an explicit focus of an unresolvable path fails with
    /// [`FocusError::InvalidPath`].
    pub fn apply(&mut self, command: Command<K>) -> Result<bool, FocusError<K>> {
        match command {
            Command::ExplicitFocus(path) => self.set_focus(&path),
            Command::MoveUp => Ok(self.move_focus(Direction::Up)),
            Command::MoveDown => Ok(self.move_focus(Direction::Down)),
            Command::MoveLeft => Ok(self.move_focus(Direction::Left)),
            Command::MoveRight => Ok(self.move_focus(Direction::Right)),
        }
    }

    fn focused_node(&self) -> Option<NodeId> {
        if self.focus.is_empty() {
            return None;
        }
        self.tree.resolve(&self.focus)
    }

    fn path_of(&self, id: NodeId) -> FocusPath<K> {
        self.tree.path(id).cloned().unwrap_or_default()
    }

    /// Bounds of the focused node, or of its nearest measurable ancestor.
    fn origin_bounds(&self, leaf: NodeId) -> Option<kurbo::Rect> {
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            if let Ok(rect) = self.tree.bounds(id) {
                return Some(rect);
            }
            cursor = self.tree.parent(id);
        }
        None
    }

    /// Ask `parent`'s resolver (custom or default) to pick among its children,
    /// leaving out `exclude`. Answers that are not among the offered children
    /// are ignored.
    fn preferred_child(
        &self,
        parent: NodeId,
        exclude: Option<NodeId>,
        origin: Option<&Origin<'_, K>>,
        direction: Option<Direction>,
    ) -> Option<NodeId> {
        let candidates: Vec<Candidate<'_, K>> = self
            .tree
            .children(parent)
            .iter()
            .filter(|&&id| Some(id) != exclude)
            .filter_map(|&id| self.tree.candidate(id))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let choice = match self.tree.resolver(parent) {
            Some(custom) => custom.preferred_child(&candidates, origin, direction),
            None => self
                .resolver
                .preferred_child(&candidates, origin, direction),
        }?;
        if candidates.iter().any(|c| c.id() == choice) {
            Some(choice)
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                parent = ?self.tree.path(parent),
                ?choice,
                "resolver chose a node outside the offered candidates"
            );
            None
        }
    }

    /// Default-entry descent from `start` to a leaf.
    ///
    /// At each level, a `hint` path naming a child of the current node takes
    /// precedence; otherwise the node's resolver is asked with no directional
    /// context. Descent stops at a node without children, or where the
    /// resolver declines.
    fn descend(&self, start: NodeId, hint: Option<&[K]>) -> NodeId {
        let mut current = start;
        loop {
            if self.tree.children(current).is_empty() {
                return current;
            }
            let hinted = hint.and_then(|hint| {
                let path = self.tree.path(current)?;
                if !hint.starts_with(path.as_slice()) {
                    return None;
                }
                self.tree.child_by_key(current, hint.get(path.len())?)
            });
            match hinted.or_else(|| self.preferred_child(current, None, None, None)) {
                Some(next) => current = next,
                None => return current,
            }
        }
    }

    /// Replace the focus path and notify. Returns false if `path` is unchanged.
    fn commit(&mut self, path: FocusPath<K>) -> bool {
        if path == self.focus {
            return false;
        }
        let previous = core::mem::replace(&mut self.focus, path);
        let change = FocusChange {
            previous,
            current: self.focus.clone(),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(previous = ?change.previous, current = ?change.current, "focus changed");

        for event in change.events() {
            let (path, focused) = match &event {
                FocusEvent::Leave(path) => (path, false),
                FocusEvent::Enter(path) => (path, true),
            };
            if let Some(id) = self.tree.resolve(path) {
                self.tree.notify(id, focused, &change);
            }
        }
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Rect;

    type Log = Rc<RefCell<Vec<FocusChange<&'static str>>>>;

    fn node(key: &'static str, x0: f64, y0: f64, x1: f64, y1: f64) -> FocusableNode<&'static str> {
        FocusableNode::new(key, Rect::new(x0, y0, x1, y1))
    }

    fn record(manager: &mut FocusManager<&'static str>) -> Log {
        let log: Log = Rc::default();
        let sink = log.clone();
        manager.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        log
    }

    #[test]
    fn first_registration_takes_focus() {
        let mut m = FocusManager::new();
        let log = record(&mut m);
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        m.register(&[], node("B", 20.0, 0.0, 30.0, 10.0)).unwrap();
        assert_eq!(m.focus_path(), &["A"]);
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].previous.is_empty());
    }

    #[test]
    fn focused_leaf_gaining_a_child_descends() {
        let mut m = FocusManager::new();
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        m.register(&["A"], node("C", 2.0, 2.0, 8.0, 8.0)).unwrap();
        assert_eq!(m.focus_path(), &["A", "C"]);
        // A second child does not steal focus.
        m.register(&["A"], node("D", 2.0, 8.0, 8.0, 10.0)).unwrap();
        assert_eq!(m.focus_path(), &["A", "C"]);
    }

    #[test]
    fn initial_focus_waits_for_its_nodes() {
        let options = FocusOptions::default().with_initial_focus(["gallery", "1"]);
        let mut m = FocusManager::with_options(options);
        m.register(&[], node("menu", 0.0, 0.0, 100.0, 10.0)).unwrap();
        m.register(&[], node("gallery", 0.0, 20.0, 100.0, 40.0)).unwrap();
        m.register(&["gallery"], node("0", 0.0, 20.0, 10.0, 40.0)).unwrap();
        assert_eq!(m.focus_path(), &["gallery", "0"]);
        m.register(&["gallery"], node("1", 20.0, 20.0, 30.0, 40.0)).unwrap();
        assert_eq!(m.focus_path(), &["gallery", "1"]);
        // Reached: later registrations no longer move focus.
        m.register(&["gallery"], node("2", 40.0, 20.0, 50.0, 40.0)).unwrap();
        assert_eq!(m.focus_path(), &["gallery", "1"]);
    }

    #[test]
    fn failed_operations_leave_state_alone() {
        let mut m = FocusManager::new();
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let log = record(&mut m);

        assert!(matches!(
            m.register(&["nope"], node("X", 0.0, 0.0, 1.0, 1.0)),
            Err(FocusError::NoSuchParent(_))
        ));
        assert!(matches!(
            m.register(&[], node("A", 0.0, 0.0, 1.0, 1.0)),
            Err(FocusError::DuplicateKey { .. })
        ));
        assert!(matches!(m.unregister(&["nope"]), Err(FocusError::NoSuchNode(_))));
        assert!(matches!(m.set_focus(&["nope"]), Err(FocusError::InvalidPath(_))));

        assert_eq!(m.focus_path(), &["A"]);
        assert_eq!(m.tree().len(), 2);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_focus_completes_internal_nodes() {
        let mut m = FocusManager::new();
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        m.register(&[], node("B", 20.0, 0.0, 30.0, 10.0)).unwrap();
        m.register(&["B"], node("x", 20.0, 0.0, 25.0, 10.0)).unwrap();
        m.register(&["B"], node("y", 25.0, 0.0, 30.0, 10.0)).unwrap();
        assert_eq!(m.set_focus(&["B"]), Ok(true));
        assert_eq!(m.focus_path(), &["B", "x"]);
        assert_eq!(m.set_focus(&["B"]), Ok(false));
    }

    #[test]
    fn set_focus_rejects_empty_path() {
        let mut m = FocusManager::new();
        assert_eq!(m.set_focus(&[]), Err(FocusError::InvalidPath(FocusPath::new())));

        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        m.register(&[], node("B", 20.0, 0.0, 30.0, 10.0)).unwrap();
        m.set_focus(&["B"]).unwrap();
        let log = record(&mut m);
        assert_eq!(m.set_focus(&[]), Err(FocusError::InvalidPath(FocusPath::new())));
        assert_eq!(m.focus_path(), &["B"]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn listeners_can_unsubscribe() {
        let mut m = FocusManager::new();
        let log: Log = Rc::default();
        let sink = log.clone();
        let id = m.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        assert!(m.unsubscribe(id));
        assert!(!m.unsubscribe(id));
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn apply_routes_commands() {
        let mut m = FocusManager::new();
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        m.register(&[], node("B", 0.0, 20.0, 10.0, 30.0)).unwrap();
        assert_eq!(m.apply(Command::MoveDown), Ok(true));
        assert_eq!(m.focus_path(), &["B"]);
        assert_eq!(m.apply(Command::from(Direction::Up)), Ok(true));
        assert_eq!(m.apply(Command::ExplicitFocus(FocusPath::from(["B"]))), Ok(true));
        assert_eq!(
            m.apply(Command::ExplicitFocus(FocusPath::from(["Z"]))),
            Err(FocusError::InvalidPath(FocusPath::from(["Z"])))
        );
        assert_eq!(Command::<&str>::MoveLeft.direction(), Some(Direction::Left));
    }

    #[test]
    fn removing_everything_clears_focus() {
        let mut m = FocusManager::new();
        m.register(&[], node("A", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let log = record(&mut m);
        m.unregister(&["A"]).unwrap();
        assert!(m.focus_path().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![FocusChange {
                previous: FocusPath::from(["A"]),
                current: FocusPath::new(),
            }]
        );
        assert!(!m.move_focus(Direction::Right));
    }
}
