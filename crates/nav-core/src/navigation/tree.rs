//! Menu tree assembly
//!
//! Items arrive as flat rows with a `parent_id`. [`build`] nests them into a
//! forest and [`flatten`] turns the forest back into a pre-order listing with
//! depths. Both walks use explicit stacks so deep or malformed data cannot
//! exhaust the call stack.
//!
//! Every item appears exactly once: items whose parent is not in the set are
//! treated as roots, and items stuck on a parent cycle are surfaced as roots
//! where the cycle is first entered.

use std::collections::HashMap;

use nav_shared::RecordId;

use crate::domain::{FlatItem, MenuItem};

/// An item and its ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub item: MenuItem,
    pub children: Vec<MenuNode>,
}

struct Visit {
    index: usize,
    parent: Option<usize>,
}

/// Groups `items` by parent. Siblings are ordered by `sort_order`, then `id`.
pub fn build(items: Vec<MenuItem>) -> Vec<MenuNode> {
    let visits = preorder(&items);

    let mut slots: Vec<Option<MenuItem>> = items.into_iter().map(Some).collect();
    let mut pending: HashMap<usize, Vec<MenuNode>> = HashMap::new();
    let mut roots = Vec::new();

    // Reverse pre-order: every child is finished before its parent.
    for visit in visits.iter().rev() {
        let Some(item) = slots[visit.index].take() else {
            continue;
        };
        let mut children = pending.remove(&visit.index).unwrap_or_default();
        children.reverse();
        let node = MenuNode { item, children };
        match visit.parent {
            Some(parent) => pending.entry(parent).or_default().push(node),
            None => roots.push(node),
        }
    }

    roots.reverse();
    roots
}

/// Pre-order listing of `forest`, each node tagged with its depth (root = 0).
pub fn flatten(forest: Vec<MenuNode>) -> Vec<FlatItem> {
    let mut out = Vec::new();
    let mut stack: Vec<(MenuNode, usize)> = forest.into_iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let MenuNode { item, children } = node;
        for child in children.into_iter().rev() {
            stack.push((child, depth + 1));
        }
        out.push(FlatItem { item, depth });
    }

    out
}

/// `flatten(build(items))`
pub fn flatten_items(items: Vec<MenuItem>) -> Vec<FlatItem> {
    flatten(build(items))
}

fn sibling_key(item: &MenuItem) -> (i32, RecordId) {
    (item.sort_order, item.id)
}

fn preorder(items: &[MenuItem]) -> Vec<Visit> {
    let index_by_id: HashMap<RecordId, usize> =
        items.iter().enumerate().map(|(i, item)| (item.id, i)).collect();

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match item.parent_id.and_then(|p| index_by_id.get(&p).copied()) {
            Some(parent) if parent != i => children.entry(parent).or_default().push(i),
            _ => roots.push(i),
        }
    }

    let by_key = |a: &usize, b: &usize| sibling_key(&items[*a]).cmp(&sibling_key(&items[*b]));
    roots.sort_by(by_key);
    for kids in children.values_mut() {
        kids.sort_by(by_key);
    }

    let mut visited = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    for root in roots {
        walk(root, &children, &mut visited, &mut out);
    }

    // Whatever is left sits on a cycle; break it at the smallest key.
    if out.len() < items.len() {
        let mut leftover: Vec<usize> = (0..items.len()).filter(|i| !visited[*i]).collect();
        leftover.sort_by(by_key);
        for start in leftover {
            if !visited[start] {
                walk(start, &children, &mut visited, &mut out);
            }
        }
    }

    out
}

fn walk(
    start: usize,
    children: &HashMap<usize, Vec<usize>>,
    visited: &mut [bool],
    out: &mut Vec<Visit>,
) {
    let mut stack = vec![Visit { index: start, parent: None }];
    while let Some(visit) = stack.pop() {
        if visited[visit.index] {
            continue;
        }
        visited[visit.index] = true;
        if let Some(kids) = children.get(&visit.index) {
            for &kid in kids.iter().rev() {
                if !visited[kid] {
                    stack.push(Visit { index: kid, parent: Some(visit.index) });
                }
            }
        }
        out.push(visit);
    }
}
