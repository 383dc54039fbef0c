use crate::maze::Coord;

/// Index of a [`Node`] inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One state of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Coordinates of the cell in the maze
    pub coord: Coord,
    /// The node this one was reached from, `None` for the root
    pub parent: Option<NodeId>,
    /// Cost to reach this cell from the start
    pub g: usize,
    /// Estimated cost to reach the goal from this cell, 0 for uninformed searches
    pub h: usize,
}

impl Node {
    pub fn root(coord: Coord, h: usize) -> Self {
        Node {
            coord,
            parent: None,
            g: 0,
            h,
        }
    }

    /// Estimated total cost of a path through this node.
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Owns every node created during one search. Parent links are arena ids, so
/// the tree is never a cycle and is dropped in one piece with the search.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walk parent links from `id` back to the root and return the
    /// coordinates root first.
    pub fn path_to(&self, id: NodeId) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get(id);
            path.push(node.coord);
            current = node.parent;
        }
        path.reverse();
        path
    }
}
