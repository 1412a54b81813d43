use crate::algorithm::assignment::heuristic::HeuristicScorer;
use crate::algorithm::assignment::predictive::{ClassWeights, ModelBundle, PredictiveScorer};
use crate::simulation::demand::{Demand, Uniform};
use crate::simulation::plan::{Vertex, Warehouse};
use crate::simulation::settings::Settings;
use crate::simulation::simulation::Simulation;
use crate::simulation::tables;
use crate::simulation::telemetry::{self, RecordingSink};
use fnv::FnvHashSet;
use std::io::Read;

const ORDERS_CSV: &str = "\
OrderID,LocationX,LocationY,Weight,Fragile,Urgency
1,8,3,4.0,No,low
2,2,9,12.5,Yes,high
3,10,10,1.0,No,
";

const ROBOTS_CSV: &str = "\
RobotID,CurrentX,CurrentY,LoadCapacity(kg),Battery(%),Speed(m/s)
R1,0,0,10,95,1.5
R2,11,0,25,60,1.0
";

#[test]
fn csv_to_delivery_with_heuristic_scorer() {
    let settings = Settings::default();
    let orders = tables::load_orders(ORDERS_CSV.as_bytes(), settings.grid_size);
    let robots = tables::load_robots(ROBOTS_CSV.as_bytes(), settings.grid_size);
    assert_eq!(orders.skipped, 0);
    assert_eq!(robots.skipped, 0);

    // A small obstacle block in the middle of the floor.
    let wall: FnvHashSet<Vertex> = set![
        Vertex { x: 5, y: 5 },
        Vertex { x: 5, y: 6 },
        Vertex { x: 6, y: 5 },
        Vertex { x: 6, y: 6 },
    ];
    let warehouse = Warehouse::with_blocked(settings.grid_size, wall);

    let (sink, snapshots) = RecordingSink::new();
    let summary = Simulation::new(
        &warehouse,
        &settings,
        Box::new(HeuristicScorer),
        Box::new(sink),
        robots.records,
        orders.records,
    )
    .run();

    assert_eq!(summary.completed, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.emergency_assignments, 0);
    assert_eq!(summary.unplanned_routes, 0);

    let snapshots = snapshots.borrow();
    assert!(!snapshots.is_empty());
    // No robot ever stands on a blocked or out-of-grid cell.
    for snapshot in snapshots.iter() {
        for (_, position) in &snapshot.robots {
            assert!(warehouse.is_free(position));
        }
    }
    assert!(snapshots.last().unwrap().pending.is_empty());
}

#[test]
fn predictive_bundle_steers_the_assignment() {
    let settings = Settings::default();
    let robots = tables::load_robots(ROBOTS_CSV.as_bytes(), settings.grid_size).records;
    let initial_r1 = robots[0].position;

    // Bundle that always answers R2.
    let bundle = ModelBundle::new(vec![
        ClassWeights {
            label: "R1".to_string(),
            weights: vec![0.0; 4],
            bias: 0.0,
        },
        ClassWeights {
            label: "R2".to_string(),
            weights: vec![0.0; 4],
            bias: 1.0,
        },
    ])
    .unwrap();
    let file = tempfile::NamedTempFile::new().unwrap();
    serde_json::to_writer(&file, &bundle).unwrap();
    let scorer = PredictiveScorer::from_file(file.path()).unwrap();

    let warehouse = Warehouse::new(settings.grid_size);
    let (sink, snapshots) = RecordingSink::new();
    let orders = tables::load_orders(ORDERS_CSV.as_bytes(), settings.grid_size).records;
    let summary = Simulation::new(
        &warehouse,
        &settings,
        Box::new(scorer),
        Box::new(sink),
        robots,
        orders,
    )
    .run();

    assert_eq!(summary.completed, 3);

    // R2 did all the work; R1 never moved.
    let snapshots = snapshots.borrow();
    for snapshot in snapshots.iter() {
        assert_eq!(snapshot.robots[0].1, initial_r1);
    }
    let (_, final_r2) = snapshots.last().unwrap().robots[1].clone();
    assert_eq!(final_r2, settings.depot);
}

#[test]
fn generated_demand_terminates_and_clears_the_floor() {
    let settings = Settings::default();
    let warehouse = Warehouse::with_blocked(
        settings.grid_size,
        vec![Vertex { x: 3, y: 3 }, Vertex { x: 3, y: 4 }],
    );
    let orders = Uniform::from_seed([42; 32]).generate(&warehouse, settings.depot, 25);
    let robots = tables::load_robots(ROBOTS_CSV.as_bytes(), settings.grid_size).records;

    let summary = Simulation::new(
        &warehouse,
        &settings,
        Box::new(HeuristicScorer),
        Box::new(telemetry::NullSink),
        robots,
        orders,
    )
    .run();

    assert_eq!(summary.completed, 25);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn trace_file_receives_snapshot_blocks() {
    let directory = tempfile::tempdir().unwrap();
    let settings = Settings {
        grid_size: 6,
        trace_file: Some(directory.path().join("run.trace")),
        ..Settings::default()
    };
    let warehouse = Warehouse::new(settings.grid_size);
    let orders = Uniform::from_seed([1; 32]).generate(&warehouse, settings.depot, 2);
    let robots = tables::load_robots(
        "RobotID,CurrentX,CurrentY,LoadCapacity(kg),Battery(%),Speed(m/s)\nR1,5,5,30,90,1.0\n"
            .as_bytes(),
        settings.grid_size,
    )
    .records;

    let sink = telemetry::from_settings(&settings).unwrap();
    let summary = Simulation::new(
        &warehouse,
        &settings,
        Box::new(HeuristicScorer),
        sink,
        robots,
        orders,
    )
    .run();
    assert_eq!(summary.completed, 2);

    let mut trace = String::new();
    std::fs::File::open(settings.trace_file.as_ref().unwrap())
        .unwrap()
        .read_to_string(&mut trace)
        .unwrap();
    assert!(trace.contains("# tick"));
    assert!(trace.contains("###"));
    assert!(trace.contains("R1,"));
}
