use crate::simulation::plan::Vertex;
use crate::simulation::settings::Settings;
use crate::simulation::state::OrderPhase;
use crate::simulation::state::State;
use std::fs::OpenOptions;
use std::io;
use std::io::BufWriter;
use std::io::Write;

/// What a rendering collaborator sees after every movement step and phase
/// transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    /// Robot id and current position, in table order.
    pub robots: Vec<(String, Vertex)>,
    pub pending: Vec<u64>,
    pub active: Option<ActiveOrder>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActiveOrder {
    pub order: u64,
    pub phase: OrderPhase,
    /// False when the route in execution is a straight-line substitute.
    pub planned: bool,
}

impl Snapshot {
    pub fn capture(tick: u64, state: &State, active: Option<ActiveOrder>) -> Snapshot {
        Snapshot {
            tick,
            robots: state
                .robots
                .iter()
                .map(|robot| (robot.id.clone(), robot.position))
                .collect(),
            pending: state.pending_ids(),
            active,
        }
    }
}

/// One-way consumer of snapshots. Emission is fire-and-forget; a sink must
/// never influence the run.
pub trait Sink {
    fn emit(&mut self, snapshot: &Snapshot);
}

pub struct NullSink;

impl Sink for NullSink {
    fn emit(&mut self, _: &Snapshot) {}
}

/// Appends one block per snapshot to a writer, in the line-oriented format
/// the chart front-end consumes.
pub struct TraceWriter<W: Write> {
    writer: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> TraceWriter<W> {
        TraceWriter { writer }
    }
}

impl<W: Write> Sink for TraceWriter<W> {
    fn emit(&mut self, snapshot: &Snapshot) {
        let _ = writeln!(self.writer, "# tick {}", snapshot.tick);
        if let Some(ref active) = snapshot.active {
            let _ = writeln!(
                self.writer,
                "order {} {:?}{}",
                active.order,
                active.phase,
                if active.planned { "" } else { " unplanned" },
            );
        }
        for (id, Vertex { x, y }) in &snapshot.robots {
            let _ = writeln!(self.writer, "{},{},{}", id, x, y);
        }
        let _ = writeln!(self.writer, "###");
        let _ = self.writer.flush();
    }
}

/// Builds the sink the settings ask for: a trace file when configured,
/// otherwise a null sink.
pub fn from_settings(settings: &Settings) -> io::Result<Box<dyn Sink>> {
    match settings.trace_file {
        Some(ref path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(Box::new(TraceWriter::new(BufWriter::new(file))))
        }
        None => Ok(Box::new(NullSink)),
    }
}

/// Collects every snapshot so tests can assert on the emitted sequence.
#[cfg(test)]
pub struct RecordingSink {
    snapshots: std::rc::Rc<std::cell::RefCell<Vec<Snapshot>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> (RecordingSink, std::rc::Rc<std::cell::RefCell<Vec<Snapshot>>>) {
        let snapshots = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        (
            RecordingSink {
                snapshots: snapshots.clone(),
            },
            snapshots,
        )
    }
}

#[cfg(test)]
impl Sink for RecordingSink {
    fn emit(&mut self, snapshot: &Snapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}
