use fnv::FnvHashSet;
use itertools::Itertools;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Vertex {
    pub x: u64,
    pub y: u64,
}

impl Vertex {
    pub fn manhattan(&self, other: Vertex) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
    pub fn euclidean(&self, other: Vertex) -> f64 {
        (self.x as f64 - other.x as f64).hypot(self.y as f64 - other.y as f64)
    }
}

/// Square grid of cells `[0, size)²` with a set of permanently blocked
/// cells. Configured before a run; never mutated by the algorithms.
pub struct Warehouse {
    size: u64,
    blocked: FnvHashSet<Vertex>,
}

impl Warehouse {
    pub fn new(size: u64) -> Warehouse {
        debug_assert!(size > 0);

        Warehouse {
            size,
            blocked: FnvHashSet::default(),
        }
    }
    pub fn with_blocked(size: u64, blocked: impl IntoIterator<Item = Vertex>) -> Warehouse {
        let mut warehouse = Warehouse::new(size);
        for vertex in blocked {
            warehouse.block(vertex);
        }

        warehouse
    }
    pub fn block(&mut self, vertex: Vertex) {
        debug_assert!(self.contains(&vertex));

        self.blocked.insert(vertex);
    }
    pub fn size(&self) -> u64 {
        self.size
    }
    pub fn contains(&self, vertex: &Vertex) -> bool {
        vertex.x < self.size && vertex.y < self.size
    }
    pub fn is_blocked(&self, vertex: &Vertex) -> bool {
        self.blocked.contains(vertex)
    }
    pub fn is_free(&self, vertex: &Vertex) -> bool {
        self.contains(vertex) && !self.is_blocked(vertex)
    }
    /// In-bounds, unblocked 4-neighbors.
    pub fn neighbors(&self, &Vertex { x, y }: &Vertex) -> Vec<Vertex> {
        debug_assert!(x < self.size);
        debug_assert!(y < self.size);

        let mut neighbors = Vec::new();
        if x < self.size - 1 {
            neighbors.push(Vertex { x: x + 1, y });
        }
        if y < self.size - 1 {
            neighbors.push(Vertex { x, y: y + 1 });
        }
        if y > 0 {
            neighbors.push(Vertex { x, y: y - 1 });
        }
        if x > 0 {
            neighbors.push(Vertex { x: x - 1, y });
        }
        neighbors.retain(|vertex| !self.is_blocked(vertex));

        neighbors
    }
    pub fn cells(&self) -> Vec<Vertex> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .map(|(x, y)| Vertex { x, y })
            .collect()
    }
    pub fn free_cells(&self) -> Vec<Vertex> {
        self.cells()
            .into_iter()
            .filter(|cell| !self.is_blocked(cell))
            .collect()
    }
}
