// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications and per-node focus transitions.

use alloc::vec::Vec;

use crate::path::FocusPath;

/// A committed change of the focus path.
///
/// Delivered synchronously to listeners at the end of the operation that
/// caused it. `previous` may name nodes that have just been unregistered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange<K> {
    /// Focus path before the change.
    pub previous: FocusPath<K>,
    /// Focus path after the change.
    pub current: FocusPath<K>,
}

/// A per-node focus transition.
///
/// Each variant carries the path of the node whose focused state flipped: a
/// node is focused when its path is a prefix of (or equal to) the focus path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusEvent<K> {
    /// The node at this path gained focus (outer to inner).
    Enter(FocusPath<K>),
    /// The node at this path lost focus (inner to outer).
    Leave(FocusPath<K>),
}

impl<K: Clone + PartialEq> FocusChange<K> {
    /// Compute the minimal enter/leave transitions from `previous` to `current`.
    ///
    /// Leave events are emitted from inner-most to outer-most, then enter
    /// events from outer-most to inner-most. Nodes on the shared prefix get no
    /// events.
    ///
    /// ```
    /// use understory_focus_tree::{FocusChange, FocusEvent, FocusPath};
    ///
    /// let change = FocusChange {
    ///     previous: FocusPath::from(["row", "a"]),
    ///     current: FocusPath::from(["row", "b"]),
    /// };
    /// assert_eq!(
    ///     change.events(),
    ///     vec![
    ///         FocusEvent::Leave(FocusPath::from(["row", "a"])),
    ///         FocusEvent::Enter(FocusPath::from(["row", "b"])),
    ///     ]
    /// );
    /// ```
    pub fn events(&self) -> Vec<FocusEvent<K>> {
        let shared = self.shared_prefix_len();
        let mut out = Vec::new();
        for depth in (shared..self.previous.len()).rev() {
            out.push(FocusEvent::Leave(self.previous.truncated(depth + 1)));
        }
        for depth in shared..self.current.len() {
            out.push(FocusEvent::Enter(self.current.truncated(depth + 1)));
        }
        out
    }

    /// Length of the prefix shared by both paths.
    pub fn shared_prefix_len(&self) -> usize {
        self.previous
            .iter()
            .zip(self.current.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

/// Handle returned by [`FocusManager::subscribe`](crate::FocusManager::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
