// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root-exclusive key paths.

use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

/// Ordered keys from a direct child of the root down to a node.
///
/// The root itself is implicit: the empty path names the root, and as the
/// manager's focus path it means "nothing focused".
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FocusPath<K>(SmallVec<[K; 4]>);

impl<K> FocusPath<K> {
    /// The empty path.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Number of keys in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The keys, outer-most first.
    pub fn as_slice(&self) -> &[K] {
        &self.0
    }

    /// The last key, if any.
    pub fn last(&self) -> Option<&K> {
        self.0.last()
    }

    /// Iterate over the keys, outer-most first.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.0.iter()
    }
}

impl<K: PartialEq> FocusPath<K> {
    /// Returns true if `prefix` is a prefix of (or equal to) this path.
    pub fn starts_with(&self, prefix: &[K]) -> bool {
        self.0.starts_with(prefix)
    }
}

impl<K: Clone> FocusPath<K> {
    /// Build a path from a slice of keys.
    pub fn from_slice(keys: &[K]) -> Self {
        Self(SmallVec::from(keys))
    }

    /// This path extended by `key`.
    pub fn child(&self, key: K) -> Self {
        let mut keys = self.0.clone();
        keys.push(key);
        Self(keys)
    }

    /// This path without its last key, or `None` for the empty path.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self::from_slice(init))
    }

    /// The first `len` keys (the whole path if it is shorter).
    pub fn truncated(&self, len: usize) -> Self {
        Self::from_slice(&self.0[..len.min(self.0.len())])
    }
}

impl<K> Default for FocusPath<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for FocusPath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<K> core::ops::Deref for FocusPath<K> {
    type Target = [K];

    fn deref(&self) -> &[K] {
        &self.0
    }
}

impl<K> FromIterator<K> for FocusPath<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K> From<Vec<K>> for FocusPath<K> {
    fn from(keys: Vec<K>) -> Self {
        Self(SmallVec::from_vec(keys))
    }
}

impl<K, const N: usize> From<[K; N]> for FocusPath<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Clone> From<&[K]> for FocusPath<K> {
    fn from(keys: &[K]) -> Self {
        Self::from_slice(keys)
    }
}

impl<K: PartialEq> PartialEq<[K]> for FocusPath<K> {
    fn eq(&self, other: &[K]) -> bool {
        self.0.as_slice() == other
    }
}

impl<K: PartialEq, const N: usize> PartialEq<[K; N]> for FocusPath<K> {
    fn eq(&self, other: &[K; N]) -> bool {
        self.0.as_slice() == other.as_slice()
    }
}

impl<'a, K> IntoIterator for &'a FocusPath<K> {
    type Item = &'a K;
    type IntoIter = core::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
