//! Identity-aware traversal
//!
//! `walk` visits every distinct node reachable from a root through
//! `children()` exactly once, calling `before` on entry and `after` on exit.
//! A node reached a second time (shared sub-expression, or a cycle closed
//! through a parent) is skipped entirely. The visited-set is keyed by node
//! identity and is local to one call.
//!
//! The walk runs on an explicit stack, so nesting depth is bounded by heap
//! rather than by the call stack. Order is that of the recursive
//! formulation: children left to right, each subtree finished before the
//! next sibling starts.

use crate::ast::NodeRef;
use cfront_common::NodeId;
use log::trace;
use std::collections::HashSet;

/// A copyable handle to a node that can enumerate its children
pub trait Walkable: Copy {
    fn identity(&self) -> NodeId;

    fn children(&self) -> Vec<Self>;
}

impl<'a> Walkable for NodeRef<'a> {
    fn identity(&self) -> NodeId {
        self.id()
    }

    fn children(&self) -> Vec<Self> {
        NodeRef::children(*self)
    }
}

/// Enter/exit hooks for a walk. Both default to doing nothing.
pub trait Visitor<N> {
    fn enter(&mut self, _node: N) {}

    fn exit(&mut self, _node: N) {}
}

enum Frame<N> {
    Enter(N),
    Exit(N),
}

/// Walk with a visitor
pub fn walk_with<N: Walkable, V: Visitor<N>>(root: N, visitor: &mut V) {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![Frame::Enter(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => {
                if !seen.insert(node.identity()) {
                    trace!("walk: {} already visited", node.identity());
                    continue;
                }
                visitor.enter(node);
                stack.push(Frame::Exit(node));
                stack.extend(node.children().into_iter().rev().map(Frame::Enter));
            }
            Frame::Exit(node) => visitor.exit(node),
        }
    }
}

struct Hooks<B, A> {
    before: B,
    after: A,
}

impl<N, B: FnMut(N), A: FnMut(N)> Visitor<N> for Hooks<B, A> {
    fn enter(&mut self, node: N) {
        (self.before)(node)
    }

    fn exit(&mut self, node: N) {
        (self.after)(node)
    }
}

/// Traverse `root`, calling `before` on entry to and `after` on exit from
/// each node. A node is never visited more than once.
pub fn walk<N: Walkable>(root: N, before: impl FnMut(N), after: impl FnMut(N)) {
    walk_with(root, &mut Hooks { before, after });
}

/// Call `f` for each node in preorder
pub fn preorder<N: Walkable>(root: N, f: impl FnMut(N)) {
    walk(root, f, |_| {});
}

/// Call `f` for each node in postorder
pub fn postorder<N: Walkable>(root: N, f: impl FnMut(N)) {
    walk(root, |_| {}, f);
}

/// Identities in preorder. Lets a pass collect first and mutate the arena
/// afterwards.
pub fn preorder_ids<N: Walkable>(root: N) -> Vec<NodeId> {
    let mut ids = Vec::new();
    preorder(root, |node: N| ids.push(node.identity()));
    ids
}

pub fn postorder_ids<N: Walkable>(root: N) -> Vec<NodeId> {
    let mut ids = Vec::new();
    postorder(root, |node: N| ids.push(node.identity()));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Graph given as adjacency lists, for exercising the engine without an arena
    #[derive(Clone, Copy)]
    struct Toy<'a> {
        graph: &'a [Vec<u32>],
        id: u32,
    }

    impl Walkable for Toy<'_> {
        fn identity(&self) -> NodeId {
            NodeId(self.id)
        }

        fn children(&self) -> Vec<Self> {
            self.graph[self.id as usize]
                .iter()
                .map(|&id| Toy { graph: self.graph, id })
                .collect()
        }
    }

    fn raw(ids: Vec<NodeId>) -> Vec<u32> {
        ids.into_iter().map(NodeId::to_raw).collect()
    }

    #[test]
    fn test_cycle_terminates() {
        // 0 -> 1 -> 2 -> 0
        let graph = vec![vec![1], vec![2], vec![0]];
        let root = Toy { graph: &graph, id: 0 };
        assert_eq!(raw(preorder_ids(root)), vec![0, 1, 2]);
        assert_eq!(raw(postorder_ids(root)), vec![2, 1, 0]);
    }

    #[test]
    fn test_self_loop_and_duplicate_edges() {
        let graph = vec![vec![0, 1, 1, 0], vec![1]];
        let root = Toy { graph: &graph, id: 0 };
        assert_eq!(raw(preorder_ids(root)), vec![0, 1]);
    }

    #[test]
    fn test_visitor_pairs() {
        struct Events(Vec<String>);
        impl<'a> Visitor<Toy<'a>> for Events {
            fn enter(&mut self, node: Toy<'a>) {
                self.0.push(format!("+{}", node.id));
            }
            fn exit(&mut self, node: Toy<'a>) {
                self.0.push(format!("-{}", node.id));
            }
        }

        let graph = vec![vec![1, 2], vec![2], vec![]];
        let mut events = Events(Vec::new());
        walk_with(Toy { graph: &graph, id: 0 }, &mut events);
        assert_eq!(events.0, vec!["+0", "+1", "+2", "-2", "-1", "-0"]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 200_000u32;
        let graph: Vec<Vec<u32>> = (0..depth)
            .map(|i| if i + 1 < depth { vec![i + 1] } else { vec![] })
            .collect();
        let mut count = 0usize;
        preorder(Toy { graph: &graph, id: 0 }, |_| count += 1);
        assert_eq!(count, depth as usize);
    }
}
