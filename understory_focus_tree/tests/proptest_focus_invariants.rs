// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for `FocusManager`.
//!
//! Random sequences of registrations, unregistrations, directional moves and
//! explicit focus requests are replayed against a manager. After every step:
//!
//! 1. The focus path is empty exactly when the tree has no focusable nodes.
//! 2. A non-empty focus path resolves to a node without children.
//! 3. Every node's path is its parent's path plus its own key, and resolves
//!    back to the node.
//! 4. Notifications chain: each change starts where the previous one ended,
//!    and never reports an unchanged path.
//! 5. Moves are blocked whenever the focused branch locks the direction.
//!
//! Replaying the same sequence twice yields the same focus path at every step.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use proptest::prelude::*;
use understory_focus_tree::{
    Direction, DirectionSet, FocusChange, FocusManager, FocusPath, FocusTree, FocusableNode,
    NodeId,
};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    /// Register under the n-th known path (root included).
    Register {
        parent: usize,
        key: u8,
        cell: (u8, u8),
        lock: u8,
    },
    /// Unregister the n-th known non-root path.
    Unregister(usize),
    Move(Direction),
    /// Explicitly focus the n-th known non-root path.
    SetFocus(usize),
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn lock_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![4 => Just(0_u8), 1 => 0_u8..16]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0_usize..32, 0_u8..4, (0_u8..5, 0_u8..5), lock_strategy()).prop_map(
            |(parent, key, cell, lock)| Op::Register {
                parent,
                key,
                cell,
                lock,
            }
        ),
        1 => (0_usize..32).prop_map(Op::Unregister),
        4 => direction_strategy().prop_map(Op::Move),
        1 => (0_usize..32).prop_map(Op::SetFocus),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 1..=60)
}

/// Every live node in depth-first registration order, root first.
fn all_nodes(tree: &FocusTree<u8>) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.children(id).iter().rev().copied());
    }
    out
}

fn cell_rect((col, row): (u8, u8)) -> Rect {
    let x = f64::from(col) * 20.0;
    let y = f64::from(row) * 20.0;
    Rect::new(x, y, x + 10.0, y + 10.0)
}

fn branch_locks(m: &FocusManager<u8>, direction: Direction) -> bool {
    let tree = m.tree();
    let mut cursor = tree.resolve(m.focus_path());
    while let Some(id) = cursor {
        if tree.lock(id).has(direction) {
            return true;
        }
        cursor = tree.parent(id);
    }
    false
}

/// Apply `op`, checking operation-level properties along the way.
fn apply(m: &mut FocusManager<u8>, op: &Op) -> Result<(), TestCaseError> {
    let nodes = all_nodes(m.tree());
    let paths: Vec<FocusPath<u8>> = nodes
        .iter()
        .filter_map(|&id| m.tree().path(id).cloned())
        .collect();
    match *op {
        Op::Register {
            parent,
            key,
            cell,
            lock,
        } => {
            let parent = &paths[parent % paths.len()];
            let node = FocusableNode::new(key, cell_rect(cell))
                .with_lock(DirectionSet::from_bits_truncate(lock));
            let duplicate = m.tree().resolve(&parent.child(key)).is_some();
            let before = (m.focus_path().clone(), m.tree().len());
            let result = m.register(parent, node);
            prop_assert_eq!(result.is_err(), duplicate);
            if duplicate {
                prop_assert_eq!((m.focus_path().clone(), m.tree().len()), before);
            }
        }
        Op::Unregister(n) => {
            if paths.len() > 1 {
                let path = paths[1 + n % (paths.len() - 1)].clone();
                m.unregister(&path).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert!(m.tree().resolve(&path).is_none());
            } else {
                prop_assert!(m.unregister(&[0]).is_err());
            }
        }
        Op::Move(direction) => {
            let before = m.focus_path().clone();
            let locked = branch_locks(m, direction);
            let moved = m.move_focus(direction);
            prop_assert_eq!(moved, *m.focus_path() != before);
            if locked {
                prop_assert!(!moved, "move escaped a lock");
            }
        }
        Op::SetFocus(n) => {
            if paths.len() > 1 {
                let path = &paths[1 + n % (paths.len() - 1)];
                m.set_focus(path)
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert!(m.is_focused(path));
                // Idempotent once settled.
                let settled = m.focus_path().clone();
                prop_assert_eq!(m.set_focus(&settled), Ok(false));
            }
        }
    }
    Ok(())
}

fn check_state(m: &FocusManager<u8>) -> Result<(), TestCaseError> {
    let tree = m.tree();
    prop_assert_eq!(m.focus_path().is_empty(), tree.is_empty());

    if !m.focus_path().is_empty() {
        let leaf = tree.resolve(m.focus_path());
        prop_assert!(leaf.is_some(), "focus path does not resolve");
        if let Some(leaf) = leaf {
            prop_assert!(tree.children(leaf).is_empty(), "focus rests on an internal node");
        }
    }

    for id in all_nodes(tree) {
        let path = tree.path(id).cloned().unwrap_or_default();
        prop_assert_eq!(tree.resolve(&path), Some(id));
        if let Some(parent) = tree.parent(id) {
            let expected = tree
                .path(parent)
                .cloned()
                .unwrap_or_default()
                .child(*tree.key(id).unwrap_or(&u8::MAX));
            prop_assert_eq!(path, expected);
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// Structural invariants hold after every operation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invariants_hold_for_random_sessions(ops in ops_strategy()) {
        let mut m = FocusManager::new();
        let log: Rc<RefCell<Vec<FocusChange<u8>>>> = Rc::default();
        let sink = log.clone();
        m.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        for op in &ops {
            apply(&mut m, op)?;
            check_state(&m)?;
        }

        let log = log.borrow();
        let mut last = FocusPath::new();
        for change in log.iter() {
            prop_assert_eq!(&change.previous, &last);
            prop_assert_ne!(&change.previous, &change.current);
            last = change.current.clone();
        }
        prop_assert_eq!(&last, m.focus_path());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Determinism: identical sessions produce identical focus paths
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn replay_is_deterministic(ops in ops_strategy()) {
        let mut first = FocusManager::new();
        let mut second = FocusManager::new();
        for op in &ops {
            apply(&mut first, op)?;
            apply(&mut second, op)?;
            prop_assert_eq!(first.focus_path(), second.focus_path());
        }
    }
}
