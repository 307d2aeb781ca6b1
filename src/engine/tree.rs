//! Folder tree navigator
//!
//! Pre-order traversal over the nested folder structure, used both for
//! rendering the tree pane and for drop-target eligibility checks. The data
//! model forbids cycles, but both walks track visited ids and treat a
//! revisit as termination so malformed input introduced upstream cannot
//! loop.

use std::collections::HashSet;

use crate::registry::{Item, Registry};

/// A folder together with its depth in the tree, for indented rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub item: &'a Item,
    pub depth: usize,
}

/// Flatten the folder tree in pre-order
///
/// Roots are the folders with no parent, in registry order; children follow
/// their folder's `children` list. Ids that are missing from the registry or
/// do not name a folder are skipped.
#[must_use]
pub fn flatten(registry: &Registry) -> Vec<TreeRow<'_>> {
    let mut rows = Vec::new();
    let mut visited = HashSet::new();

    for item in registry.items() {
        if item.is_folder() && item.parent_id.is_none() {
            walk(item, 0, registry, &mut visited, &mut rows);
        }
    }
    rows
}

fn walk<'a>(
    folder: &'a Item,
    depth: usize,
    registry: &'a Registry,
    visited: &mut HashSet<&'a str>,
    rows: &mut Vec<TreeRow<'a>>,
) {
    if !visited.insert(folder.id.as_str()) {
        return;
    }
    rows.push(TreeRow { item: folder, depth });

    for child_id in folder.child_ids() {
        if let Some(child) = registry.get(child_id)
            && child.is_folder()
        {
            walk(child, depth + 1, registry, visited, rows);
        }
    }
}

/// Whether `candidate_id` lies anywhere below `of_id` in the folder tree
///
/// A folder is not its own descendant. A revisited id during the walk is
/// treated as "not a descendant" rather than recursed into.
#[must_use]
pub fn is_descendant(candidate_id: &str, of_id: &str, registry: &Registry) -> bool {
    let Some(root) = registry.get(of_id) else {
        return false;
    };

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(of_id);
    let mut stack: Vec<&str> = root.child_ids().iter().map(String::as_str).collect();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if id == candidate_id {
            return true;
        }
        if let Some(item) = registry.get(id)
            && item.is_folder()
        {
            stack.extend(item.child_ids().iter().map(String::as_str));
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FileMeta, Item};

    /// a ─ b ─ c, with d a second root
    fn nested() -> Registry {
        Registry::new(vec![
            Item::folder("a", "a", None, vec!["b".into()]),
            Item::folder("b", "b", Some("a".into()), vec!["c".into()]),
            Item::folder("c", "c", Some("b".into()), vec![]),
            Item::folder("d", "d", None, vec![]),
            Item::file("f", "f.txt", Some("a".into()), FileMeta::default()),
        ])
        .unwrap()
    }

    #[test]
    fn test_flatten_is_preorder_with_depths() {
        let reg = nested();
        let rows: Vec<(&str, usize)> = flatten(&reg)
            .iter()
            .map(|row| (row.item.id.as_str(), row.depth))
            .collect();

        assert_eq!(rows, vec![("a", 0), ("b", 1), ("c", 2), ("d", 0)]);
    }

    #[test]
    fn test_is_descendant() {
        let reg = nested();

        assert!(is_descendant("b", "a", &reg));
        assert!(is_descendant("c", "a", &reg));
        assert!(is_descendant("c", "b", &reg));

        assert!(!is_descendant("a", "a", &reg));
        assert!(!is_descendant("a", "b", &reg));
        assert!(!is_descendant("d", "a", &reg));
        assert!(!is_descendant("ghost", "a", &reg));
        assert!(!is_descendant("b", "ghost", &reg));
    }

    #[test]
    fn test_traversal_terminates_on_cycle() {
        // Malformed on purpose: x and y list each other as children.
        let reg = Registry::new(vec![
            Item::folder("x", "x", None, vec!["y".into()]),
            Item::folder("y", "y", Some("x".into()), vec!["x".into()]),
        ])
        .unwrap();

        let rows: Vec<&str> = flatten(&reg).iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(rows, vec!["x", "y"]);

        assert!(is_descendant("y", "x", &reg));
        assert!(!is_descendant("ghost", "x", &reg));
    }
}
