// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus tree basics.
//!
//! Drive D-pad focus over a TV home screen using `understory_focus_tree`:
//! nested menus, an initial focus request, a root resolver that prefers the
//! gallery, and a detail screen that traps focus.
//!
//! Run:
//! - `cargo run -p understory_demos --example focus_tree_basics`

use kurbo::Rect;
use understory_focus_tree::{
    Candidate, Direction, DirectionSet, FocusError, FocusManager, FocusOptions, FocusableNode,
    GeometricResolver, NodeId, Origin, PreferredChildResolver,
};
use understory_demos::{Key, mount_home, unmount_home};

/// Enter the gallery when there is no directional context; otherwise defer to geometry.
struct GalleryFirst(GeometricResolver);

impl PreferredChildResolver<Key> for GalleryFirst {
    fn preferred_child(
        &self,
        children: &[Candidate<'_, Key>],
        origin: Option<&Origin<'_, Key>>,
        direction: Option<Direction>,
    ) -> Option<NodeId> {
        if (origin.is_none() || direction.is_none())
            && let Some(gallery) = children.iter().find(|c| *c.key() == "gallery")
        {
            return Some(gallery.id());
        }
        self.0.preferred_child(children, origin, direction)
    }
}

#[derive(Copy, Clone, Debug)]
enum Input {
    Arrow(Direction),
    Select,
    Back,
}

fn main() -> Result<(), FocusError<Key>> {
    let options = FocusOptions::default().with_initial_focus(["gallery", "1"]);
    let mut focus = FocusManager::with_options(options);
    focus.set_root_resolver(GalleryFirst(GeometricResolver::default()));
    focus.subscribe(|change| {
        println!("  focus: {:?} -> {:?}", change.previous, change.current);
    });

    println!("Mount home screen");
    mount_home(&mut focus)?;

    let mut on_detail = false;
    for input in [
        Input::Arrow(Direction::Right), // gallery/1 -> gallery/2
        Input::Arrow(Direction::Up),    // gallery -> profiles, entered at its first avatar
        Input::Arrow(Direction::Right), // along the profiles row
        Input::Arrow(Direction::Left),
        Input::Arrow(Direction::Left), // leftmost: no change
        Input::Arrow(Direction::Down), // profiles -> gallery/0
        Input::Arrow(Direction::Down), // gallery -> menu
        Input::Select,                 // open the detail screen
        Input::Arrow(Direction::Up),   // trapped: no change
        Input::Back,                   // home again, gallery first
    ] {
        println!("{input:?}");
        match input {
            Input::Arrow(direction) => {
                if !focus.move_focus(direction) {
                    println!("  (no change)");
                }
            }
            Input::Select if !on_detail => {
                let selected = focus.focus_path().clone();
                println!("  detail page for {selected:?}");
                focus.register(
                    &[],
                    FocusableNode::new("detail", Rect::new(0.0, 0.0, 1280.0, 720.0))
                        .with_lock(DirectionSet::ALL),
                )?;
                unmount_home(&mut focus)?;
                on_detail = true;
            }
            Input::Back if on_detail => {
                mount_home(&mut focus)?;
                focus.unregister(&["detail"])?;
                on_detail = false;
            }
            Input::Select | Input::Back => println!("  (ignored)"),
        }
    }

    println!("Final focus: {:?}", focus.focus_path());
    Ok(())
}
