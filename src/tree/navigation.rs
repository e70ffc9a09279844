//! Cursor movement over the tree.
//!
//! Every operation takes the current cursor and returns the next one. When
//! the cursor moves, exactly two `selected` flags change; when there is no
//! legal move the same id comes back and nothing changes.
//!
//! `Up` on a first child climbs to the parent, while `Down` on a last child
//! stays put.

use super::{NodeId, Tree};
use crate::Command;

/// Applies a command to the cursor.
///
/// `RunSelected` and `Quit` are not movements and return `current` untouched.
pub fn navigate(tree: &mut Tree, current: NodeId, command: Command) -> NodeId {
    match command {
        Command::Up => up(tree, current),
        Command::Down => down(tree, current),
        Command::Left => left(tree, current),
        Command::Right => right(tree, current),
        Command::Enter => enter(tree, current),
        Command::RunSelected | Command::Quit => current,
    }
}

/// Previous sibling, or the parent when already on the first child.
pub fn up(tree: &mut Tree, current: NodeId) -> NodeId {
    let Some(parent) = tree.node(current).parent() else {
        return current;
    };
    let target = match tree.index_in_parent(current) {
        Some(i) if i > 0 => tree.children(parent)[i - 1],
        _ => parent,
    };
    move_to(tree, current, target)
}

/// Next sibling; no-op on the last child and on the root.
pub fn down(tree: &mut Tree, current: NodeId) -> NodeId {
    let siblings = tree.siblings(current);
    let next = tree
        .index_in_parent(current)
        .and_then(|i| siblings.get(i + 1).copied());
    match next {
        Some(target) => move_to(tree, current, target),
        None => current,
    }
}

/// The parent; no-op on the root.
pub fn left(tree: &mut Tree, current: NodeId) -> NodeId {
    match tree.node(current).parent() {
        Some(parent) => move_to(tree, current, parent),
        None => current,
    }
}

/// First child of an expanded, non-empty directory; otherwise no-op.
pub fn right(tree: &mut Tree, current: NodeId) -> NodeId {
    let node = tree.node(current);
    if !node.is_expanded() {
        return current;
    }
    match node.children().first().copied() {
        Some(child) => move_to(tree, current, child),
        None => current,
    }
}

/// Toggles a directory open or closed. The cursor stays where it is.
pub fn enter(tree: &mut Tree, current: NodeId) -> NodeId {
    if tree.node(current).is_directory() {
        let expanded = tree.toggle_expanded(current);
        tracing::debug!(node = %tree.path(current), expanded, "toggled directory");
    }
    current
}

fn move_to(tree: &mut Tree, from: NodeId, to: NodeId) -> NodeId {
    tree.move_selection(from, to);
    tracing::trace!(from = from.index(), to = to.index(), "cursor moved");
    to
}
