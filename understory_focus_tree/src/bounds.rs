// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box capability implemented by the rendering layer.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use kurbo::Rect;

/// Error returned when a region's on-screen box cannot currently be read.
///
/// Typically the region is not mounted, or has not been measured yet.
/// Focus resolution treats this as "candidate ineligible", never as a failure
/// of the whole move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundsUnavailable;

impl fmt::Display for BoundsUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bounds are not available for this region")
    }
}

impl core::error::Error for BoundsUnavailable {}

/// Source of a node's current on-screen rectangle.
///
/// All providers registered in one [`FocusManager`](crate::FocusManager) must
/// report boxes in the same coordinate space. Providers are queried
/// synchronously each time a move is resolved; results are not cached.
pub trait BoundsProvider {
    /// Return the current bounds, or [`BoundsUnavailable`] if the region cannot
    /// be measured right now.
    fn bounds(&self) -> Result<Rect, BoundsUnavailable>;
}

/// A fixed box.
impl BoundsProvider for Rect {
    fn bounds(&self) -> Result<Rect, BoundsUnavailable> {
        Ok(*self)
    }
}

/// A closure queried on demand; `None` means unavailable.
impl<F> BoundsProvider for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounds(&self) -> Result<Rect, BoundsUnavailable> {
        self().ok_or(BoundsUnavailable)
    }
}

/// A clonable, shared bounds cell.
///
/// The rendering layer keeps one clone and updates it after layout
/// ([`SharedBounds::set`]) or on unmount ([`SharedBounds::clear`]); the focus
/// tree holds another clone as the node's provider.
///
/// ```
/// use kurbo::Rect;
/// use understory_focus_tree::{BoundsProvider, BoundsUnavailable, SharedBounds};
///
/// let handle = SharedBounds::unmeasured();
/// let provider = handle.clone();
/// assert_eq!(provider.bounds(), Err(BoundsUnavailable));
///
/// handle.set(Rect::new(0.0, 0.0, 10.0, 10.0));
/// assert_eq!(provider.bounds(), Ok(Rect::new(0.0, 0.0, 10.0, 10.0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBounds(Rc<Cell<Option<Rect>>>);

impl SharedBounds {
    /// Create a cell holding `rect`.
    pub fn new(rect: Rect) -> Self {
        Self(Rc::new(Cell::new(Some(rect))))
    }

    /// Create a cell with no bounds yet.
    pub fn unmeasured() -> Self {
        Self::default()
    }

    /// Replace the stored bounds.
    pub fn set(&self, rect: Rect) {
        self.0.set(Some(rect));
    }

    /// Mark the region as unavailable.
    pub fn clear(&self) {
        self.0.set(None);
    }

    /// The stored bounds, if any.
    pub fn get(&self) -> Option<Rect> {
        self.0.get()
    }
}

impl BoundsProvider for SharedBounds {
    fn bounds(&self) -> Result<Rect, BoundsUnavailable> {
        self.get().ok_or(BoundsUnavailable)
    }
}
