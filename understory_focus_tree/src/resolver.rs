// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preferred-child resolution: which sibling receives focus.

use core::fmt;

use kurbo::Rect;

use crate::bounds::{BoundsProvider, BoundsUnavailable};
use crate::direction::Direction;
use crate::geometry::{DistanceWeights, directional_distance};
use crate::path::FocusPath;
use crate::tree::NodeId;

/// Read-only view of one sibling offered to a [`PreferredChildResolver`].
pub struct Candidate<'a, K> {
    id: NodeId,
    key: &'a K,
    path: &'a FocusPath<K>,
    bounds: &'a dyn BoundsProvider,
    has_children: bool,
}

impl<'a, K> Candidate<'a, K> {
    pub(crate) fn new(
        id: NodeId,
        key: &'a K,
        path: &'a FocusPath<K>,
        bounds: &'a dyn BoundsProvider,
        has_children: bool,
    ) -> Self {
        Self {
            id,
            key,
            path,
            bounds,
            has_children,
        }
    }

    /// Node identifier; return this from a resolver to pick the candidate.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The candidate's key.
    pub fn key(&self) -> &'a K {
        self.key
    }

    /// The candidate's full path.
    pub fn path(&self) -> &'a FocusPath<K> {
        self.path
    }

    /// Current bounds, read from the node's provider on every call.
    pub fn bounds(&self) -> Result<Rect, BoundsUnavailable> {
        self.bounds.bounds()
    }

    /// Returns true if the candidate has focusable children of its own.
    pub fn has_children(&self) -> bool {
        self.has_children
    }
}

impl<K> Clone for Candidate<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Candidate<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Candidate<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("id", &self.id)
            .field("path", self.path)
            .field("has_children", &self.has_children)
            .finish_non_exhaustive()
    }
}

/// Where a directional move starts: the focused leaf and its box.
#[derive(Debug)]
pub struct Origin<'a, K> {
    path: &'a FocusPath<K>,
    bounds: Rect,
}

impl<K> Clone for Origin<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Origin<'_, K> {}

impl<'a, K> Origin<'a, K> {
    /// An origin at `path` occupying `bounds`.
    pub fn new(path: &'a FocusPath<K>, bounds: Rect) -> Self {
        Self { path, bounds }
    }

    /// Path of the previously focused node.
    pub fn path(&self) -> &'a FocusPath<K> {
        self.path
    }

    /// Box of the previously focused node, snapshotted when the move started.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Policy choosing which child of a node receives focus.
///
/// `origin` and `direction` are both present for a directional move, and both
/// absent when focus enters a subtree without directional context (initial
/// focus, explicit focus of an internal node, or descent after a move).
///
/// Returning `None` means "no candidate" and is final: the default policy is
/// not consulted. Resolvers that only want to tweak some cases can delegate to
/// [`GeometricResolver`] for the rest.
///
/// ```
/// use understory_focus_tree::{
///     Candidate, Direction, GeometricResolver, NodeId, Origin, PreferredChildResolver,
/// };
///
/// /// Enter the gallery first; otherwise behave like the default.
/// struct GalleryFirst(GeometricResolver);
///
/// impl PreferredChildResolver<&'static str> for GalleryFirst {
///     fn preferred_child(
///         &self,
///         children: &[Candidate<'_, &'static str>],
///         origin: Option<&Origin<'_, &'static str>>,
///         direction: Option<Direction>,
///     ) -> Option<NodeId> {
///         if origin.is_none() || direction.is_none() {
///             if let Some(c) = children.iter().find(|c| *c.key() == "gallery") {
///                 return Some(c.id());
///             }
///         }
///         self.0.preferred_child(children, origin, direction)
///     }
/// }
/// ```
pub trait PreferredChildResolver<K> {
    /// Pick one of `children`, or `None` for no preference.
    fn preferred_child(
        &self,
        children: &[Candidate<'_, K>],
        origin: Option<&Origin<'_, K>>,
        direction: Option<Direction>,
    ) -> Option<NodeId>;
}

/// The default policy: nearest candidate in the direction of travel.
///
/// - Without directional context, the first child in registration order.
/// - With an origin and a direction, candidates whose bounds cannot be read
///   are skipped, the rest are filtered and ranked by
///   [`directional_distance`], and the lowest cost wins. Equal costs go to the
///   candidate registered first.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GeometricResolver {
    /// Weights for [`directional_distance`].
    pub weights: DistanceWeights,
}

impl GeometricResolver {
    /// A resolver using `weights`.
    pub fn new(weights: DistanceWeights) -> Self {
        Self { weights }
    }
}

impl<K> PreferredChildResolver<K> for GeometricResolver {
    fn preferred_child(
        &self,
        children: &[Candidate<'_, K>],
        origin: Option<&Origin<'_, K>>,
        direction: Option<Direction>,
    ) -> Option<NodeId> {
        let (Some(origin), Some(direction)) = (origin, direction) else {
            return children.first().map(Candidate::id);
        };

        let mut best: Option<(NodeId, f64)> = None;
        for candidate in children {
            let Ok(rect) = candidate.bounds() else {
                #[cfg(feature = "tracing")]
                tracing::trace!(id = ?candidate.id(), "skipping candidate without bounds");
                continue;
            };
            let Some(cost) =
                directional_distance(&origin.bounds(), &rect, direction, &self.weights)
            else {
                continue;
            };
            // Strict comparison keeps the earliest candidate on ties.
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((candidate.id(), cost));
            }
        }
        best.map(|(id, _)| id)
    }
}
