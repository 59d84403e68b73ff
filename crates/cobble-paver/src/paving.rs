// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # The Paving Tree
//!
//! The immutable record of a realized search, built only under full-tree
//! retention. A `ContractorNode` records which contractor fired and the
//! box it fired on; if the contraction left a non-empty remainder, the
//! node owns the subtree exploring it (the "rejected" child). A
//! `BisectorNode` records the split dimension and owns its two children.
//!
//! Nodes live in an index-based arena, so dropping a paving is a single
//! vector drop and traversal needs no recursion: `accept` walks the tree
//! iteratively with an explicit stack, visiting parents before children
//! (left before right).

use cobble_contract::index::{CtrIndex, VarIndex};
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;
use cobble_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for paving-node indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndexTag;

impl TypedIndexTag for NodeIndexTag {
    const NAME: &'static str = "NodeIndex";
}

/// A typed index into a paving arena.
pub type NodeIndex = TypedIndex<NodeIndexTag>;

/// A pending edge of the tree under construction: where the next
/// realized node of a search path attaches.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeLink {
    /// The node becomes the root.
    Root,
    /// The node becomes the rejected child of a contractor node.
    RejectedOf(NodeIndex),
    /// The node becomes the left child of a bisector node.
    LeftOf(NodeIndex),
    /// The node becomes the right child of a bisector node.
    RightOf(NodeIndex),
}

/// A contraction event: contractor `ctc` fired on `domain`.
///
/// A leaf (no rejected child) means the contraction emptied the box.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractorNode<T>
where
    T: PaverNumeric,
{
    ctc: CtrIndex,
    domain: IntervalBox<T>,
    rejected: Option<NodeIndex>,
}

impl<T> ContractorNode<T>
where
    T: PaverNumeric,
{
    /// The contractor that produced this node.
    #[inline]
    pub fn ctc(&self) -> CtrIndex {
        self.ctc
    }

    /// The box the contractor fired on.
    #[inline]
    pub fn domain(&self) -> &IntervalBox<T> {
        &self.domain
    }

    /// The subtree exploring the non-empty remainder, if any.
    #[inline]
    pub fn rejected(&self) -> Option<NodeIndex> {
        self.rejected
    }

    /// Returns `true` if the contraction emptied the box.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.rejected.is_none()
    }
}

/// A bisection event: the box was split along `var`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BisectorNode {
    var: VarIndex,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl BisectorNode {
    /// The dimension that was split.
    #[inline]
    pub fn var(&self) -> VarIndex {
        self.var
    }

    /// The left child's subtree, if it was realized before the search
    /// ended.
    #[inline]
    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    /// The right child's subtree, if it was realized before the search
    /// ended.
    #[inline]
    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }
}

/// One node of the paving tree.
#[derive(Clone, Debug, PartialEq)]
pub enum PavingNode<T>
where
    T: PaverNumeric,
{
    Contractor(ContractorNode<T>),
    Bisector(BisectorNode),
}

/// A visitor over the paving tree.
pub trait PavingVisitor<T>
where
    T: PaverNumeric,
{
    fn visit_contractor(&mut self, node: &ContractorNode<T>);
    fn visit_bisector(&mut self, node: &BisectorNode);
}

/// The realized search tree, stored in an index-based arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Paving<T>
where
    T: PaverNumeric,
{
    nodes: Vec<PavingNode<T>>,
    root: Option<NodeIndex>,
}

impl<T> Paving<T>
where
    T: PaverNumeric,
{
    /// Creates an empty paving.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root node index, if any node was realized.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns a node by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn node(&self, index: NodeIndex) -> &PavingNode<T> {
        assert!(
            index.get() < self.nodes.len(),
            "called `Paving::node` with node index out of bounds: the len is {} but the index is {}",
            self.nodes.len(),
            index.get()
        );
        &self.nodes[index.get()]
    }

    /// Appends a contractor node (initially a leaf).
    pub(crate) fn push_contractor(&mut self, ctc: CtrIndex, domain: IntervalBox<T>) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(PavingNode::Contractor(ContractorNode {
            ctc,
            domain,
            rejected: None,
        }));
        index
    }

    /// Appends a bisector node with unrealized children.
    pub(crate) fn push_bisector(&mut self, var: VarIndex) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(PavingNode::Bisector(BisectorNode {
            var,
            left: None,
            right: None,
        }));
        index
    }

    /// Fills the pending edge `link` with `child`.
    ///
    /// # Panics
    ///
    /// Panics if the edge is already filled or `link` does not name an
    /// edge of the expected node kind.
    pub(crate) fn attach(&mut self, link: NodeLink, child: NodeIndex) {
        match link {
            NodeLink::Root => {
                assert!(
                    self.root.is_none(),
                    "called `Paving::attach` with an already rooted tree"
                );
                self.root = Some(child);
            }
            NodeLink::RejectedOf(parent) => match &mut self.nodes[parent.get()] {
                PavingNode::Contractor(node) => {
                    assert!(
                        node.rejected.is_none(),
                        "called `Paving::attach` with an already filled rejected edge"
                    );
                    node.rejected = Some(child);
                }
                PavingNode::Bisector(_) => {
                    panic!("called `Paving::attach` with a rejected edge of a bisector node")
                }
            },
            NodeLink::LeftOf(parent) | NodeLink::RightOf(parent) => {
                let is_left = matches!(link, NodeLink::LeftOf(_));
                match &mut self.nodes[parent.get()] {
                    PavingNode::Bisector(node) => {
                        let edge = if is_left {
                            &mut node.left
                        } else {
                            &mut node.right
                        };
                        assert!(
                            edge.is_none(),
                            "called `Paving::attach` with an already filled child edge"
                        );
                        *edge = Some(child);
                    }
                    PavingNode::Contractor(_) => {
                        panic!("called `Paving::attach` with a child edge of a contractor node")
                    }
                }
            }
        }
    }

    /// Walks the tree in depth-first pre-order (left before right,
    /// rejected subtree after its contractor node), calling the visitor
    /// on every node.
    pub fn accept<V>(&self, visitor: &mut V)
    where
        V: PavingVisitor<T>,
    {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            match self.node(index) {
                PavingNode::Contractor(node) => {
                    visitor.visit_contractor(node);
                    if let Some(rejected) = node.rejected {
                        stack.push(rejected);
                    }
                }
                PavingNode::Bisector(node) => {
                    visitor.visit_bisector(node);
                    // Right pushed first so the left child pops first.
                    if let Some(right) = node.right {
                        stack.push(right);
                    }
                    if let Some(left) = node.left {
                        stack.push(left);
                    }
                }
            }
        }
    }
}

impl<T> std::fmt::Display for Paving<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Paving(nodes: {})", self.nodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Pv = Paving<f64>;

    fn unit_box() -> IntervalBox<f64> {
        IntervalBox::from_bounds(&[(0.0, 1.0)])
    }

    /// Records visit order as a compact trace.
    #[derive(Default)]
    struct Tracer {
        trace: Vec<String>,
    }

    impl PavingVisitor<f64> for Tracer {
        fn visit_contractor(&mut self, node: &ContractorNode<f64>) {
            self.trace.push(format!(
                "c{}{}",
                node.ctc().get(),
                if node.is_leaf() { "!" } else { "" }
            ));
        }

        fn visit_bisector(&mut self, node: &BisectorNode) {
            self.trace.push(format!("b{}", node.var().get()));
        }
    }

    #[test]
    fn test_empty_paving_has_no_root() {
        let paving = Pv::new();
        assert!(paving.is_empty());
        assert_eq!(paving.root(), None);
        let mut tracer = Tracer::default();
        paving.accept(&mut tracer);
        assert!(tracer.trace.is_empty());
    }

    #[test]
    fn test_build_and_traverse_small_tree() {
        // root: contraction by c0, remainder bisected on x1 into two
        // leaves accepted by c1.
        let mut paving = Pv::new();
        let contraction = paving.push_contractor(CtrIndex::new(0), unit_box());
        paving.attach(NodeLink::Root, contraction);

        let split = paving.push_bisector(VarIndex::new(1));
        paving.attach(NodeLink::RejectedOf(contraction), split);

        let left = paving.push_contractor(CtrIndex::new(1), unit_box());
        let right = paving.push_contractor(CtrIndex::new(1), unit_box());
        paving.attach(NodeLink::LeftOf(split), left);
        paving.attach(NodeLink::RightOf(split), right);

        assert_eq!(paving.len(), 4);

        let mut tracer = Tracer::default();
        paving.accept(&mut tracer);
        assert_eq!(tracer.trace, vec!["c0", "b1", "c1!", "c1!"]);
    }

    #[test]
    fn test_unrealized_children_are_skipped() {
        let mut paving = Pv::new();
        let split = paving.push_bisector(VarIndex::new(0));
        paving.attach(NodeLink::Root, split);
        let left = paving.push_contractor(CtrIndex::new(0), unit_box());
        paving.attach(NodeLink::LeftOf(split), left);

        let mut tracer = Tracer::default();
        paving.accept(&mut tracer);
        assert_eq!(tracer.trace, vec!["b0", "c0!"]);
    }

    #[test]
    #[should_panic(expected = "already filled child edge")]
    fn test_double_attach_panics() {
        let mut paving = Pv::new();
        let split = paving.push_bisector(VarIndex::new(0));
        let a = paving.push_contractor(CtrIndex::new(0), unit_box());
        let b = paving.push_contractor(CtrIndex::new(0), unit_box());
        paving.attach(NodeLink::LeftOf(split), a);
        paving.attach(NodeLink::LeftOf(split), b);
    }

    #[test]
    #[should_panic(expected = "node index out of bounds")]
    fn test_node_out_of_range_panics() {
        let paving = Pv::new();
        let _ = paving.node(NodeIndex::new(0));
    }
}
