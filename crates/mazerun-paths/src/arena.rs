use mazerun_core::{Point, Range};

// ---------------------------------------------------------------------------
// Internal node storage for A* searches
// ---------------------------------------------------------------------------

/// One arena slot per grid cell. Predecessor links are indices into the
/// same arena, so node lifetime is tied to the arena and nothing else.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            f: 0.0,
            parent: usize::MAX,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

/// Reference into the node arena, ordered by `f` for use in `BinaryHeap`.
///
/// `seq` is the insertion sequence number; equal-`f` entries pop in
/// insertion order, so extraction order is deterministic.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first,
        // then smallest seq on ties.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathArena
// ---------------------------------------------------------------------------

/// Reusable node arena for pathfinding on a grid rectangle.
///
/// `PathArena` owns all search state (the node array and a neighbor
/// scratch buffer), so repeated queries incur no allocations after the
/// first use. A generation counter invalidates every node lazily between
/// searches; no node state survives its search.
pub struct PathArena {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) reopen: bool,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathArena {
    /// Create a new `PathArena` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            nodes: vec![Node::default(); len],
            generation: 0,
            reopen: false,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the underlying range, reallocating the arena as needed.
    ///
    /// If the new size fits within existing capacity, storage is preserved
    /// and only the generation counter is bumped so stale entries are
    /// ignored. Otherwise the arena is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let old_capacity = self.nodes.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= old_capacity {
            self.generation = self.generation.wrapping_add(1);
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Allow reopening a finalized cell when a cheaper route to it is
    /// found later.
    ///
    /// Off by default: a closed cell is never re-expanded, which can yield
    /// a suboptimal path on irregular obstacle fields. Turning this on
    /// restores optimality under an admissible heuristic.
    pub fn set_reopening(&mut self, reopen: bool) {
        self.reopen = reopen;
    }

    /// Whether closed cells may be reopened on improvement.
    #[inline]
    pub fn reopening(&self) -> bool {
        self.reopen
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathArena {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathArena {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = Range::deserialize(deserializer)?;
        Ok(PathArena::new(range))
    }
}
