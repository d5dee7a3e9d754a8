//! Arena-backed LOD quadtree.
//!
//! Nodes live in one contiguous `Vec` and refer to their children by
//! [`NodeId`]. A node either has no children (a leaf, drawn as one chunk) or
//! exactly four, ordered `[bottom-left, bottom-right, top-left, top-right]`.
//! Dropping the tree frees every node at once.

use glam::DVec2;

/// Index of a node inside its [`LodTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One quadtree node.
#[derive(Clone, Debug, Default)]
pub struct LodNode {
    children: Option<[NodeId; 4]>,
}

impl LodNode {
    /// The four children `[bl, br, tl, tr]`, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Square region of the terrain covered by a node, in sample units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    /// Left edge.
    pub x: u32,
    /// Bottom edge.
    pub y: u32,
    /// Edge length.
    pub size: u32,
}

impl Footprint {
    /// Footprints of the four quadrants, `[bl, br, tl, tr]`.
    pub fn quadrants(&self) -> [Footprint; 4] {
        let half = self.size / 2;
        [
            Footprint { x: self.x, y: self.y, size: half },
            Footprint { x: self.x + half, y: self.y, size: half },
            Footprint { x: self.x, y: self.y + half, size: half },
            Footprint { x: self.x + half, y: self.y + half, size: half },
        ]
    }
}

/// A quadtree over a square terrain of edge `resolution`.
///
/// Built fresh for each LOD update and dropped once the chunk set has been
/// derived from it.
#[derive(Clone, Debug)]
pub struct LodTree {
    nodes: Vec<LodNode>,
    resolution: u32,
}

impl LodTree {
    /// Create a tree whose root is a single leaf covering `resolution` samples.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is not a power of two.
    pub fn new(resolution: u32) -> Self {
        assert!(
            resolution.is_power_of_two(),
            "tree resolution must be a power of two"
        );
        Self {
            nodes: vec![LodNode::default()],
            resolution,
        }
    }

    /// Edge length of the root node in samples.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &LodNode {
        &self.nodes[id.index()]
    }

    /// Total node count, leaves and branches.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Split a leaf into four children and return them `[bl, br, tl, tr]`.
    ///
    /// # Panics
    ///
    /// Panics if `id` already has children.
    pub fn subdivide(&mut self, id: NodeId) -> [NodeId; 4] {
        assert!(self.node(id).is_leaf(), "node {id:?} is already subdivided");
        let first = self.nodes.len() as u32;
        let children = [
            NodeId(first),
            NodeId(first + 1),
            NodeId(first + 2),
            NodeId(first + 3),
        ];
        self.nodes
            .extend(std::iter::repeat_with(LodNode::default).take(4));
        self.nodes[id.index()].children = Some(children);
        children
    }

    /// Walk the leaves depth-first in `[bl, br, tl, tr]` order, yielding each
    /// leaf's footprint.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![(
                self.root(),
                Footprint {
                    x: 0,
                    y: 0,
                    size: self.resolution,
                },
            )],
        }
    }

    /// Number of leaves, i.e. chunks this tree describes.
    pub fn leaf_count(&self) -> usize {
        // Every split turns one leaf into four.
        1 + 3 * (self.nodes.len() - 1) / 4
    }

    /// Edge length of the leaf containing `point`.
    ///
    /// Descends one quadrant per level, halving the size and re-basing the
    /// point into the chosen quadrant. Points outside the terrain resolve to
    /// the nearest border leaf. Callers sampling on a chunk boundary offset the
    /// point by half a sample so it falls unambiguously inside one leaf.
    pub fn chunk_size_at(&self, point: DVec2) -> u32 {
        let mut id = self.root();
        let mut size = self.resolution;
        let mut local = point;
        while let Some(children) = self.node(id).children {
            let half = size / 2;
            let half_f = f64::from(half);
            let right = local.x >= half_f;
            let top = local.y >= half_f;
            if right {
                local.x -= half_f;
            }
            if top {
                local.y -= half_f;
            }
            id = children[usize::from(top) * 2 + usize::from(right)];
            size = half;
        }
        size
    }

    /// Depth of the deepest leaf; a lone root has depth 0.
    pub fn depth(&self) -> u32 {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 0u32)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id).children {
                Some(children) => stack.extend(children.iter().map(|&c| (c, depth + 1))),
                None => deepest = deepest.max(depth),
            }
        }
        deepest
    }
}

/// Depth-first leaf iterator returned by [`LodTree::leaves`].
pub struct Leaves<'a> {
    tree: &'a LodTree,
    stack: Vec<(NodeId, Footprint)>,
}

impl Iterator for Leaves<'_> {
    type Item = Footprint;

    fn next(&mut self) -> Option<Footprint> {
        while let Some((id, footprint)) = self.stack.pop() {
            match self.tree.node(id).children {
                None => return Some(footprint),
                Some(children) => {
                    let quadrants = footprint.quadrants();
                    // Reverse push so bl pops first.
                    for i in (0..4).rev() {
                        self.stack.push((children[i], quadrants[i]));
                    }
                }
            }
        }
        None
    }
}
