use std::collections::VecDeque;

pub const SOURCE: usize = 0;
pub const SINK: usize = 1;

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: usize,
    to: usize,
    capacity: u32,
    residual: u32,
}

impl Edge {
    /// the neighbor reached by traversing this edge from `node`, if the
    /// current-direction capacity allows it
    fn traversable_from(&self, node: usize) -> Option<usize> {
        if self.from == node && self.capacity > 0 {
            Some(self.to)
        } else if self.to == node && self.residual > 0 {
            Some(self.from)
        } else {
            None
        }
    }
}

/// directed multigraph with integer capacities, solved by repeated BFS
/// augmentation of one unit at a time. node 0 is the source, node 1 the
/// sink; edges may be added between saturation passes.
pub struct FlowGraph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
    last_visit: Vec<u32>,
    via: Vec<usize>,
    round: u32,
}

impl FlowGraph {
    pub fn new(nodes: usize) -> Self {
        assert!(nodes >= 2);
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); nodes],
            last_visit: vec![0; nodes],
            via: vec![0; nodes],
            round: 0,
        }
    }

    pub fn add_edge(&mut self, from: usize, to: usize, capacity: u32) {
        let index = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            capacity,
            residual: 0,
        });
        self.adjacency[from].push(index);
        self.adjacency[to].push(index);
    }

    /// push one unit of flow along some augmenting path. returns false when
    /// the network is saturated.
    pub fn augment(&mut self) -> bool {
        self.round += 1;
        let mut queue = VecDeque::new();
        queue.push_back(SOURCE);
        self.last_visit[SOURCE] = self.round;
        while let Some(node) = queue.pop_front() {
            if node == SINK {
                break;
            }
            for &index in &self.adjacency[node] {
                let edge = self.edges[index];
                let Some(neighbor) = edge.traversable_from(node) else {
                    continue;
                };
                if self.last_visit[neighbor] != self.round {
                    self.last_visit[neighbor] = self.round;
                    self.via[neighbor] = index;
                    queue.push_back(neighbor);
                }
            }
        }
        if self.last_visit[SINK] != self.round {
            return false;
        }
        let mut node = SINK;
        while node != SOURCE {
            let edge = &mut self.edges[self.via[node]];
            if edge.to == node {
                edge.capacity -= 1;
                edge.residual += 1;
                node = edge.from;
            } else {
                edge.residual -= 1;
                edge.capacity += 1;
                node = edge.to;
            }
        }
        true
    }

    pub fn saturate(&mut self) {
        while self.augment() {}
    }

    /// flow pushed along `from → to`
    pub fn flow(&self, from: usize, to: usize) -> u32 {
        self.adjacency[from]
            .iter()
            .map(|&index| self.edges[index])
            .filter(|edge| edge.from == from && edge.to == to)
            .map(|edge| edge.residual)
            .sum()
    }
}
