// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus Tree: a focus tree with directional (D-pad) navigation.
//!
//! This crate tracks a tree of nested focusable regions (menus, rows, tiles,
//! buttons) and the single path of keys that is currently focused. Arrow
//! presses from a TV remote or game controller move focus between
//! spatially-adjacent regions.
//!
//! - [`FocusTree`]: owns every registered node, its position in the hierarchy,
//!   its [`BoundsProvider`], its lock set, and an optional
//!   [`PreferredChildResolver`].
//! - [`FocusPath`]: root-exclusive chain of keys identifying the focused leaf.
//! - [`GeometricResolver`]: default sibling selection, ranking candidates with
//!   [`directional_distance`].
//! - [`FocusManager`]: the only mutating surface. Registers and unregisters
//!   regions, moves focus, honors locks, and notifies listeners with a
//!   [`FocusChange`].
//!
//! ## Minimal example
//!
//! Two tiles side by side; moving right hops from `A` to `B`:
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_focus_tree::{Direction, FocusManager, FocusableNode};
//!
//! let mut focus = FocusManager::new();
//! focus
//!     .register(&[], FocusableNode::new("A", Rect::new(0.0, 0.0, 10.0, 10.0)))
//!     .unwrap();
//! focus
//!     .register(&[], FocusableNode::new("B", Rect::new(20.0, 0.0, 30.0, 10.0)))
//!     .unwrap();
//!
//! // The first registered region receives focus.
//! assert_eq!(focus.focus_path(), &["A"]);
//!
//! assert!(focus.move_focus(Direction::Right));
//! assert_eq!(focus.focus_path(), &["B"]);
//!
//! // Nothing further right: a no-op, not an error.
//! assert!(!focus.move_focus(Direction::Right));
//! ```
//!
//! ## Locks and custom resolvers
//!
//! A node registered with [`FocusableNode::with_lock`] forbids directional
//! moves in the locked directions while focus is inside its subtree.
//! A node registered with [`FocusableNode::with_resolver`] decides which of
//! its children receives focus, for example to wrap around a list or to pin
//! the initially focused branch.
//!
//! ## Geometry
//!
//! Bounds are [`kurbo::Rect`] values in one shared coordinate space with `y`
//! growing downward. They are read through [`BoundsProvider`] every time a
//! move is resolved and are never cached. A provider that fails (the region is
//! not mounted or not yet measured) only excludes that one candidate.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for committed focus changes and for
//!   moves that resolve to a no-op.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod direction;
mod error;
mod event;
mod geometry;
mod manager;
mod path;
mod resolver;
mod tree;

pub use bounds::{BoundsProvider, BoundsUnavailable, SharedBounds};
pub use direction::{Axis, Direction, DirectionSet};
pub use error::FocusError;
pub use event::{FocusChange, FocusEvent, ListenerId};
pub use geometry::{
    DistanceWeights, boxes_overlap_on_axis, directional_distance, is_in_direction,
    overlap_on_axis,
};
pub use manager::{Command, FocusManager, FocusOptions};
pub use path::FocusPath;
pub use resolver::{Candidate, GeometricResolver, Origin, PreferredChildResolver};
pub use tree::{FocusKey, FocusTree, FocusableNode, NodeId};
