//! Node identities
//! 
//! Every syntax node carries a `NodeId` minted once at construction. The
//! walker keys its visited-set on it, so an id must never be handed out
//! twice while a node holding it is alive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide counter backing [`NodeId::fresh`]. Starts at 1 so that a
/// zeroed id in hand-written records never collides with a minted one.
static NEXT_FRESH_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a syntax node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Mint an identity that is unique for the lifetime of the process.
    pub fn fresh() -> Self {
        NodeId(NEXT_FRESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sequential id source for a single compilation unit
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next_id: u32,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> usize {
        self.next_id as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_id_generator() {
        let mut gen = NodeIdGenerator::new();
        assert_eq!(gen.next(), NodeId(0));
        assert_eq!(gen.next(), NodeId(1));
        assert_eq!(gen.next(), NodeId(2));
        assert_eq!(gen.issued(), 3);
    }

    #[test]
    fn test_fresh_ids_never_repeat() {
        let ids: HashSet<NodeId> = (0..1000).map(|_| NodeId::fresh()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(!ids.contains(&NodeId(0)));
    }

    #[test]
    fn test_node_id_display_and_serde() {
        assert_eq!(NodeId(7).to_string(), "#7");
        assert_eq!(serde_json::to_string(&NodeId(7)).unwrap(), "7");
        let back: NodeId = serde_json::from_str("42").unwrap();
        assert_eq!(back, NodeId::from_raw(42));
    }
}
