//! Reconstruction of parse trees from a syntax tool's textual tree dump.
//!
//! The external tool prints its concrete syntax tree as indented `Node` and
//! `Leaf` lines. [`reconstruct`] rebuilds that shape into an arena-backed
//! [`Tree`], and the [`query`] module offers the pre-order traversals every
//! downstream analysis is written against.

#![warn(missing_docs)]

pub mod arena;
pub mod error;
pub mod ids;
pub mod node;
pub mod query;
pub mod reconstruct;

pub use arena::{Arena, ArenaId};
pub use error::TreeError;
pub use ids::{LeafId, NodeId};
pub use node::{Child, Tree, TreeLeaf, TreeNode};
pub use query::{collect_leaves, find_all_by_tag, find_all_matching, find_first_by_tag};
pub use reconstruct::reconstruct;
