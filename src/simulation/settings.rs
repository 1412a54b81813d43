use crate::simulation::plan::Vertex;
use std::path::PathBuf;

pub struct Settings {
    pub grid_size: u64,
    /// Drop-off point for every delivery.
    pub depot: Vertex,
    /// When set, every snapshot is appended to this trace file.
    pub trace_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            grid_size: 12,
            depot: Vertex { x: 0, y: 0 },
            trace_file: None,
        }
    }
}
