//! Builds a [`Tree`] from `pytest --collect-only` output.
//!
//! Only two kinds of lines matter:
//!
//! ```text
//! <Module tests/unit/test_parser.py>
//!   <Function test_empty_input>
//! ```
//!
//! A function line belongs to the most recent module line. Everything else
//! (packages, classes, session headers, blank lines) is skipped.

use std::collections::HashMap;

use super::{NodeId, Tree, PATH_SEPARATOR};

/// Name of the root created when the listing has several top-level directories.
pub const SYNTHETIC_ROOT_NAME: &str = ".";

const MODULE_TAG: &str = "<Module";
const FUNCTION_TAG: &str = "<Function";

/// A recognized line of collector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record<'a> {
    Module(&'a str),
    Function(&'a str),
}

/// Parses collector output into a tree. Never fails; unrecognized lines are ignored.
///
/// If every module shares one top-level directory, that directory is the
/// root. Otherwise the root is a synthetic `.` directory holding each
/// top-level directory. The root starts out selected.
pub fn parse_listing(text: &str) -> Tree {
    let modules = collect_modules(text);

    let mut first_segments: Vec<&str> = Vec::new();
    for (segments, _) in &modules {
        if !first_segments.contains(&segments[0]) {
            first_segments.push(segments[0]);
        }
    }

    let (mut tree, skip) = match first_segments.as_slice() {
        [only] => (Tree::with_root(*only), 1),
        _ => (Tree::with_root(SYNTHETIC_ROOT_NAME), 0),
    };

    // Construction-scoped registry: directory path -> node.
    let mut registry: HashMap<String, NodeId> = HashMap::new();
    let root = tree.root();
    registry.insert(tree.path(root), root);

    for (segments, functions) in &modules {
        let mut dir = root;
        for segment in &segments[skip..] {
            dir = directory_at(&mut tree, &mut registry, dir, segment);
        }
        for function in functions {
            tree.add_leaf(dir, *function);
        }
    }

    tracing::debug!(
        nodes = tree.node_count(),
        tests = tree.leaf_count(),
        modules = modules.len(),
        "parsed collection listing"
    );
    tree
}

/// Returns the child directory `name` of `parent`, creating it on first use.
fn directory_at(
    tree: &mut Tree,
    registry: &mut HashMap<String, NodeId>,
    parent: NodeId,
    name: &str,
) -> NodeId {
    let key = format!("{}{}{}", tree.path(parent), PATH_SEPARATOR, name);
    if let Some(&existing) = registry.get(&key) {
        return existing;
    }
    let id = tree.add_directory(parent, name);
    registry.insert(key, id);
    id
}

/// Groups function names under their module, keeping first-seen order for both.
///
/// Modules are keyed by their segment list so `a//b` and `a/b` merge.
/// Repeated function names within a module are kept once.
fn collect_modules(text: &str) -> Vec<(Vec<&str>, Vec<&str>)> {
    let mut modules: Vec<(Vec<&str>, Vec<&str>)> = Vec::new();
    let mut index: HashMap<Vec<&str>, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        match classify(line) {
            Some(Record::Module(path)) => {
                let segments = split_module_path(path);
                if segments.is_empty() {
                    current = None;
                    continue;
                }
                let slot = *index.entry(segments.clone()).or_insert_with(|| {
                    modules.push((segments, Vec::new()));
                    modules.len() - 1
                });
                current = Some(slot);
            }
            Some(Record::Function(name)) => {
                if let Some(slot) = current {
                    let functions = &mut modules[slot].1;
                    if !functions.contains(&name) {
                        functions.push(name);
                    }
                }
            }
            None => {}
        }
    }

    modules
}

/// Splits a module path on `/`, dropping empty and `.` segments.
fn split_module_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn classify(line: &str) -> Option<Record<'_>> {
    if let Some(path) = tagged_value(line, MODULE_TAG) {
        return Some(Record::Module(path));
    }
    tagged_value(line, FUNCTION_TAG).map(Record::Function)
}

/// Extracts `value` from `<Tag value>` anywhere in `line`.
///
/// The tag must be followed by whitespace, and the value runs to the last
/// `>` on the line so parametrized ids like `test_x[<lambda>]` stay whole.
fn tagged_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    for (start, _) in line.match_indices(tag) {
        let rest = &line[start + tag.len()..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let end = rest.rfind('>')?;
        let value = rest[..end].trim();
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}
