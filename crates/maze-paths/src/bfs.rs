use std::sync::atomic::{AtomicBool, Ordering};

use maze_core::{Direction, Position};

use crate::finder::{PathFinder, PathNode, SearchError, UNREACHABLE};
use crate::passability::ConfigurationError;
use crate::traits::Pather;

enum Outcome {
    Found,
    Exhausted,
    Cancelled,
}

impl PathFinder {
    /// Compute the shortest move sequence from `start` to `goal` using
    /// breadth-first search.
    ///
    /// Returns `Ok(None)` if either endpoint is outside the finder's bounds
    /// or no path exists, and an empty sequence when `start == goal`.
    /// Equal-length paths are resolved by the order in which the pather
    /// reports moves.
    pub fn find_path<P: Pather>(
        &mut self,
        pather: &P,
        start: Position,
        goal: Position,
    ) -> Result<Option<Vec<Direction>>, ConfigurationError> {
        match self.search(pather, start, goal, None) {
            Ok(path) => Ok(path),
            Err(SearchError::Configuration(e)) => Err(e),
            Err(SearchError::Cancelled) => unreachable!("search without a cancel flag"),
        }
    }

    /// Like [`find_path`](Self::find_path), but checks `cancel` before
    /// expanding each position and gives up with
    /// [`SearchError::Cancelled`] once it is set.
    pub fn find_path_cancellable<P: Pather>(
        &mut self,
        pather: &P,
        start: Position,
        goal: Position,
        cancel: &AtomicBool,
    ) -> Result<Option<Vec<Direction>>, SearchError> {
        self.search(pather, start, goal, Some(cancel))
    }

    fn search<P: Pather>(
        &mut self,
        pather: &P,
        start: Position,
        goal: Position,
        cancel: Option<&AtomicBool>,
    ) -> Result<Option<Vec<Direction>>, SearchError> {
        self.expanded = 0;
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            log::debug!("bfs: {start} -> {goal} outside {}", self.bounds);
            return Ok(None);
        };
        if start_idx == goal_idx {
            return Ok(Some(Vec::new()));
        }

        let cur_gen = self.next_generation();
        {
            let node = &mut self.nodes[start_idx];
            node.parent = usize::MAX;
            node.generation = cur_gen;
        }
        self.queue.clear();
        self.queue.push_back(start_idx);

        let mut mbuf = std::mem::take(&mut self.mbuf);
        let outcome = self.expand(pather, goal_idx, cur_gen, cancel, &mut mbuf);
        self.mbuf = mbuf;

        match outcome {
            Ok(Outcome::Found) => {
                let path = self.reconstruct(goal_idx);
                log::debug!(
                    "bfs: {start} -> {goal}: {} moves, {} expanded",
                    path.len(),
                    self.expanded
                );
                Ok(Some(path))
            }
            Ok(Outcome::Exhausted) => {
                log::debug!(
                    "bfs: {start} -> {goal}: unreachable, {} expanded",
                    self.expanded
                );
                Ok(None)
            }
            Ok(Outcome::Cancelled) => {
                log::debug!("bfs: {start} -> {goal}: cancelled after {}", self.expanded);
                Err(SearchError::Cancelled)
            }
            Err(e) => {
                log::warn!("bfs: {start} -> {goal}: {e}");
                Err(e.into())
            }
        }
    }

    fn expand<P: Pather>(
        &mut self,
        pather: &P,
        goal_idx: usize,
        cur_gen: u32,
        cancel: Option<&AtomicBool>,
        mbuf: &mut Vec<(Direction, Position)>,
    ) -> Result<Outcome, ConfigurationError> {
        while let Some(ci) = self.queue.pop_front() {
            if ci == goal_idx {
                return Ok(Outcome::Found);
            }
            if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                return Ok(Outcome::Cancelled);
            }
            self.expanded += 1;

            mbuf.clear();
            pather.moves(self.pos(ci), mbuf)?;

            for &(d, np) in mbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    continue;
                }
                // Marked on enqueue so each position is queued at most once.
                n.generation = cur_gen;
                n.parent = ci;
                n.via = d;
                self.queue.push_back(ni);
            }
        }
        Ok(Outcome::Exhausted)
    }

    fn reconstruct(&self, goal_idx: usize) -> Vec<Direction> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while self.nodes[ci].parent != usize::MAX {
            path.push(self.nodes[ci].via);
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Compute a multi-source breadth-first distance map under the legal
    /// move relation.
    ///
    /// Each move costs 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns all reached positions in discovery order.
    pub fn distance_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Position],
        max_dist: i32,
    ) -> Result<&[PathNode], ConfigurationError> {
        for v in self.dist_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.dist_results.clear();
        self.queue.clear();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.dist_map[si] != UNREACHABLE {
                    continue;
                }
                self.dist_map[si] = 0;
                self.queue.push_back(si);
                self.dist_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut mbuf = std::mem::take(&mut self.mbuf);
        let res = self.fill_distances(pather, max_dist, &mut mbuf);
        self.mbuf = mbuf;
        res?;

        Ok(&self.dist_results)
    }

    fn fill_distances<P: Pather>(
        &mut self,
        pather: &P,
        max_dist: i32,
        mbuf: &mut Vec<(Direction, Position)>,
    ) -> Result<(), ConfigurationError> {
        while let Some(ci) = self.queue.pop_front() {
            let nd = self.dist_map[ci] + 1;
            if nd > max_dist {
                continue;
            }

            mbuf.clear();
            pather.moves(self.pos(ci), mbuf)?;

            for &(_, np) in mbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.dist_map[ni] != UNREACHABLE {
                    continue;
                }
                self.dist_map[ni] = nd;
                self.queue.push_back(ni);
                self.dist_results.push(PathNode { pos: np, cost: nd });
            }
        }
        Ok(())
    }

    /// Query the distance at a specific position.
    ///
    /// Returns [`UNREACHABLE`] if the position is outside the bounds or was
    /// not reached by the last `distance_map` call.
    pub fn distance_at(&self, p: Position) -> i32 {
        match self.idx(p) {
            Some(i) => self.dist_map[i],
            None => UNREACHABLE,
        }
    }
}
