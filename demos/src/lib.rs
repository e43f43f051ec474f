// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scenes for the `understory_focus_tree` demos.
//!
//! A 1280x720 TV home screen: a profiles menu in the top-left corner, a games
//! gallery centered below it, and a navigation menu along the bottom.

use kurbo::Rect;
use understory_focus_tree::{FocusError, FocusManager, FocusableNode};

/// Keys used by the home screen.
pub type Key = &'static str;

/// Profile avatars, left to right.
pub const PROFILES: [Key; 3] = ["alice", "bob", "guest"];
/// Gallery tiles, left to right.
pub const GAMES: [Key; 5] = ["0", "1", "2", "3", "4"];
/// Navigation menu entries, left to right.
pub const MENU: [Key; 4] = ["home", "store", "library", "settings"];

fn row(x0: f64, y0: f64, w: f64, h: f64, gap: f64, count: usize) -> impl Iterator<Item = Rect> {
    (0..count).map(move |i| {
        let x = x0 + i as f64 * (w + gap);
        Rect::new(x, y0, x + w, y0 + h)
    })
}

/// Register `node` under the root and `items` as its children.
fn register_row(
    focus: &mut FocusManager<Key>,
    node: FocusableNode<Key>,
    items: &[Key],
    item_rects: impl Iterator<Item = Rect>,
) -> Result<(), FocusError<Key>> {
    let parent = [*node.key()];
    focus.register(&[], node)?;
    for (&key, rect) in items.iter().zip(item_rects) {
        focus.register(&parent, FocusableNode::new(key, rect))?;
    }
    Ok(())
}

/// Mount the home screen under the root.
pub fn mount_home(focus: &mut FocusManager<Key>) -> Result<(), FocusError<Key>> {
    register_row(
        focus,
        FocusableNode::new("profiles", Rect::new(60.0, 32.0, 340.0, 112.0)),
        &PROFILES,
        row(60.0, 32.0, 80.0, 80.0, 20.0, PROFILES.len()),
    )?;
    register_row(
        focus,
        FocusableNode::new("gallery", Rect::new(190.0, 206.0, 1090.0, 446.0)),
        &GAMES,
        row(190.0, 206.0, 160.0, 240.0, 25.0, GAMES.len()),
    )?;
    register_row(
        focus,
        FocusableNode::new("menu", Rect::new(340.0, 540.0, 940.0, 600.0)),
        &MENU,
        row(340.0, 540.0, 135.0, 60.0, 20.0, MENU.len()),
    )
}

/// Unmount the home screen.
pub fn unmount_home(focus: &mut FocusManager<Key>) -> Result<(), FocusError<Key>> {
    for key in ["profiles", "gallery", "menu"] {
        focus.unregister(&[key])?;
    }
    Ok(())
}
