use std::collections::BinaryHeap;

use mazerun_core::Point;

use crate::PathArena;
use crate::arena::NodeRef;
use crate::traits::AstarPather;

impl PathArena {
    /// Compute a path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no
    /// path exists within the current range.
    ///
    /// A cell is finalized the first time it is expanded. Unless
    /// [`set_reopening`](PathArena::set_reopening) is enabled, a finalized
    /// cell is never revisited even when a cheaper route to it turns up,
    /// so the result is not guaranteed optimal and extracted `f` values
    /// are not guaranteed monotonic.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;
        let reopen = self.reopen;

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0.0;
            node.f = pather.estimate(from, to);
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
            node.closed = false;
        }

        let mut seq = 0u64;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            self.nodes[ci].closed = true;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);
                let tentative_f = tentative_g + pather.estimate(np, to);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    // Finalized cells stay finalized unless reopening is on.
                    if n.closed && !reopen {
                        continue;
                    }
                    if tentative_f >= n.f {
                        continue;
                    }
                    n.closed = false;
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                }

                n.g = tentative_g;
                n.f = tentative_f;
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative_f,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}
