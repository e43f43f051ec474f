// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors reported by the focus tree and manager.

use core::fmt;

use crate::path::FocusPath;

/// Misuse of the tree API.
///
/// These are always reported synchronously and leave all state unchanged.
/// Directional moves that find nothing to focus are not errors; they are
/// no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusError<K> {
    /// The parent path given to `register` does not resolve.
    NoSuchParent(FocusPath<K>),
    /// A sibling with the same key is already registered under `parent`.
    DuplicateKey {
        /// Path of the parent the node was registered under.
        parent: FocusPath<K>,
        /// The duplicated key.
        key: K,
    },
    /// The path given to `unregister` does not resolve to a registered node.
    NoSuchNode(FocusPath<K>),
    /// The path given to `set_focus` does not resolve.
    InvalidPath(FocusPath<K>),
}

impl<K: fmt::Debug> fmt::Display for FocusError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchParent(path) => write!(f, "no focusable node at parent path {path:?}"),
            Self::DuplicateKey { parent, key } => {
                write!(f, "key {key:?} is already registered under {parent:?}")
            }
            Self::NoSuchNode(path) => write!(f, "no focusable node at path {path:?}"),
            Self::InvalidPath(path) => write!(f, "cannot focus unresolvable path {path:?}"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for FocusError<K> {}
