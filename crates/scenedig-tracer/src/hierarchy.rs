//! Hierarchy rendering: depth-first walk of the transform tree.
//!
//! Scenes can nest thousands of levels deep, so nothing here recurses: the
//! walk keeps its own stack, and trees are assembled from and flattened to
//! lines with explicit stacks as well.

use crate::graph::SceneGraph;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options to control traversal limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Deepest level rendered (roots are depth 0). `None` renders everything.
    pub max_depth: Option<usize>,
}

/// One rendered line: an object name and its depth below the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HierarchyLine {
    pub depth: usize,
    pub name: String,
    pub transform_id: i64,
    pub object_id: i64,
}

/// A rendered transform and its rendered descendants.
#[derive(Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    pub transform_id: i64,
    pub object_id: i64,
    pub name: String,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub(crate) fn from_line(line: &HierarchyLine, children: Vec<HierarchyNode>) -> Self {
        Self {
            transform_id: line.transform_id,
            object_id: line.object_id,
            name: line.name.clone(),
            children,
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            total += 1;
            pending.extend(&node.children);
        }
        total
    }
}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Render every root's subtree as `(depth, name)` lines in pre-order.
pub fn render_hierarchy(graph: &SceneGraph) -> Vec<HierarchyLine> {
    render_hierarchy_with(graph, RenderOptions::default())
}

/// Pre-order lines, one per rendered transform, roots in root order.
///
/// A transform whose owner object does not resolve is left out together with
/// everything below it. A transform already on the current path is not
/// entered again, which cuts cycles in the child links.
pub fn render_hierarchy_with(graph: &SceneGraph, options: RenderOptions) -> Vec<HierarchyLine> {
    let mut walker = Walker {
        graph,
        options,
        path: HashSet::new(),
        lines: Vec::new(),
    };
    for &root in &graph.roots {
        walker.walk(root);
    }
    walker.lines
}

/// Rendered forest, one node per root in root order.
pub fn hierarchy_tree(graph: &SceneGraph, options: RenderOptions) -> Vec<HierarchyNode> {
    assemble(&render_hierarchy_with(graph, options), HierarchyNode::from_line)
}

/// Pre-order `(depth, name)` lines of a rendered forest.
pub fn flatten(roots: &[HierarchyNode]) -> Vec<HierarchyLine> {
    let mut lines = Vec::new();
    let mut pending: Vec<(&HierarchyNode, usize)> = roots.iter().rev().map(|r| (r, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        lines.push(HierarchyLine {
            depth,
            name: node.name.clone(),
            transform_id: node.transform_id,
            object_id: node.object_id,
        });
        pending.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    lines
}

/// Build a forest bottom-up from pre-order lines.
///
/// `make` receives each line with its already built children, in order.
/// Lines must come from a renderer: every line is at most one level deeper
/// than the line before it.
pub fn assemble<T, F>(lines: &[HierarchyLine], mut make: F) -> Vec<T>
where
    F: FnMut(&HierarchyLine, Vec<T>) -> T,
{
    // Finished subtrees; the first child of the next line up sits on top
    let mut done: Vec<(usize, T)> = Vec::new();
    for line in lines.iter().rev() {
        let mut children = Vec::new();
        while done.last().is_some_and(|(depth, _)| *depth == line.depth + 1) {
            if let Some((_, child)) = done.pop() {
                children.push(child);
            }
        }
        done.push((line.depth, make(line, children)));
    }
    done.into_iter().rev().map(|(_, node)| node).collect()
}

struct Frame<'g> {
    transform_id: i64,
    depth: usize,
    children: std::slice::Iter<'g, i64>,
}

struct Walker<'g> {
    graph: &'g SceneGraph,
    options: RenderOptions,
    path: HashSet<i64>,
    lines: Vec<HierarchyLine>,
}

impl<'g> Walker<'g> {
    fn walk(&mut self, root: i64) {
        let mut stack: Vec<Frame<'g>> = self.enter(root, 0).into_iter().collect();
        while let Some(frame) = stack.last_mut() {
            match frame.children.next() {
                Some(&child) => {
                    let depth = frame.depth + 1;
                    if let Some(next) = self.enter(child, depth) {
                        stack.push(next);
                    }
                }
                None => {
                    let finished = frame.transform_id;
                    self.path.remove(&finished);
                    stack.pop();
                }
            }
        }
    }

    /// Emit the line for `transform_id` and open its frame, if it renders.
    fn enter(&mut self, transform_id: i64, depth: usize) -> Option<Frame<'g>> {
        let graph = self.graph;
        let transform = graph.transforms.get(&transform_id)?;
        let object = graph.owner_of(transform)?;
        if !self.path.insert(transform_id) {
            return None;
        }

        self.lines.push(HierarchyLine {
            depth,
            name: object.name.clone(),
            transform_id,
            object_id: object.id,
        });
        let children: &'g [i64] = if self.options.max_depth.is_none_or(|max| depth < max) {
            &transform.child_ids
        } else {
            &[]
        };
        Some(Frame {
            transform_id,
            depth,
            children: children.iter(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SceneObject, TransformNode};

    fn object(graph: &mut SceneGraph, id: i64, name: &str) {
        graph.objects.insert(
            id,
            SceneObject {
                id,
                name: name.to_string(),
                component_ids: vec![],
            },
        );
    }

    fn transform(graph: &mut SceneGraph, id: i64, owner: i64, children: &[i64]) {
        graph.transforms.insert(
            id,
            TransformNode {
                id,
                parent_id: 0,
                child_ids: children.to_vec(),
                owner_object_id: owner,
            },
        );
    }

    #[test]
    fn test_preorder_depths() {
        let mut graph = SceneGraph::default();
        object(&mut graph, 1, "Root");
        object(&mut graph, 2, "A");
        object(&mut graph, 3, "A1");
        object(&mut graph, 4, "B");
        transform(&mut graph, 10, 1, &[20, 40]);
        transform(&mut graph, 20, 2, &[30]);
        transform(&mut graph, 30, 3, &[]);
        transform(&mut graph, 40, 4, &[]);
        graph.roots = vec![10];

        let lines = render_hierarchy(&graph);
        let got: Vec<_> = lines.iter().map(|l| (l.depth, l.name.as_str())).collect();
        assert_eq!(got, vec![(0, "Root"), (1, "A"), (2, "A1"), (1, "B")]);
    }

    #[test]
    fn test_cycle_through_children_terminates() {
        let mut graph = SceneGraph::default();
        object(&mut graph, 1, "Root");
        object(&mut graph, 2, "Child");
        transform(&mut graph, 10, 1, &[20]);
        transform(&mut graph, 20, 2, &[10, 20]);
        graph.roots = vec![10];

        let lines = render_hierarchy(&graph);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_unresolved_owner_drops_subtree() {
        let mut graph = SceneGraph::default();
        object(&mut graph, 1, "Root");
        object(&mut graph, 3, "Grandchild");
        transform(&mut graph, 10, 1, &[20]);
        transform(&mut graph, 20, 0, &[30]);
        transform(&mut graph, 30, 3, &[]);
        graph.roots = vec![10];

        let lines = render_hierarchy(&graph);
        assert_eq!(
            lines,
            vec![HierarchyLine {
                depth: 0,
                name: "Root".into(),
                transform_id: 10,
                object_id: 1,
            }]
        );
    }

    #[test]
    fn test_max_depth() {
        let mut graph = SceneGraph::default();
        object(&mut graph, 1, "Root");
        object(&mut graph, 2, "Child");
        transform(&mut graph, 10, 1, &[20]);
        transform(&mut graph, 20, 2, &[]);
        graph.roots = vec![10];

        let options = RenderOptions { max_depth: Some(0) };
        assert_eq!(render_hierarchy_with(&graph, options).len(), 1);
        let tree = hierarchy_tree(&graph, RenderOptions::default());
        assert_eq!(tree[0].count(), 2);
    }

    #[test]
    fn test_tree_round_trips_through_lines() {
        let mut graph = SceneGraph::default();
        object(&mut graph, 1, "Root");
        object(&mut graph, 2, "A");
        object(&mut graph, 3, "A1");
        object(&mut graph, 4, "B");
        object(&mut graph, 5, "Second");
        transform(&mut graph, 10, 1, &[20, 40]);
        transform(&mut graph, 20, 2, &[30]);
        transform(&mut graph, 30, 3, &[]);
        transform(&mut graph, 40, 4, &[]);
        transform(&mut graph, 50, 5, &[]);
        graph.roots = vec![10, 50];

        let tree = hierarchy_tree(&graph, RenderOptions::default());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Root");
        let names: Vec<_> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(tree[0].children[0].children[0].name, "A1");
        assert_eq!(tree[1].name, "Second");
        assert_eq!(flatten(&tree), render_hierarchy(&graph));
    }

    #[test]
    fn test_deep_chain_builds_and_drops_without_recursion() {
        let n = 100_000;
        let mut graph = SceneGraph::default();
        for i in 1..=n {
            let child = if i < n { vec![(i + 1) * 10] } else { vec![] };
            object(&mut graph, i, "Node");
            transform(&mut graph, i * 10, i, &child);
        }
        graph.roots = vec![10];

        let lines = render_hierarchy(&graph);
        assert_eq!(lines.len(), n as usize);
        assert_eq!(lines.last().map(|l| l.depth), Some(n as usize - 1));

        let tree = hierarchy_tree(&graph, RenderOptions::default());
        assert_eq!(tree[0].count(), n as usize);
        assert_eq!(flatten(&tree).len(), n as usize);
        drop(tree);
    }
}
