use crate::simulation::plan::Vertex;
use crate::simulation::state::Order;
use crate::simulation::state::Robot;
use crate::simulation::state::Urgency;
use log::warn;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Loads order and robot tables from CSV. A malformed row is skipped and
/// counted, never aborting the batch; only failing to open the file at all
/// is an error.

#[derive(Debug, Deserialize)]
struct OrderRecord {
    #[serde(rename = "OrderID")]
    id: u64,
    #[serde(rename = "LocationX")]
    x: u64,
    #[serde(rename = "LocationY")]
    y: u64,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Fragile", default)]
    fragile: Option<String>,
    #[serde(rename = "Urgency", default)]
    urgency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RobotRecord {
    #[serde(rename = "RobotID")]
    id: String,
    #[serde(rename = "CurrentX")]
    x: u64,
    #[serde(rename = "CurrentY")]
    y: u64,
    #[serde(rename = "LoadCapacity(kg)")]
    load_capacity: f64,
    #[serde(rename = "Battery(%)")]
    battery: f64,
    #[serde(rename = "Speed(m/s)")]
    speed: f64,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open table: {0}")]
    Io(#[from] std::io::Error),
}

/// Successfully parsed records plus the count of rows that were dropped.
#[derive(Debug)]
pub struct TableOutcome<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

pub fn load_orders<R: Read>(reader: R, grid_size: u64) -> TableOutcome<Order> {
    let mut records = Vec::new();
    let mut skipped = 0;
    for (row, result) in csv::Reader::from_reader(reader).deserialize().enumerate() {
        let record: OrderRecord = match result {
            Ok(record) => record,
            Err(error) => {
                warn!("skipping malformed order row {}: {}", row + 1, error);
                skipped += 1;
                continue;
            }
        };
        match validate_order(record, grid_size) {
            Ok(order) => records.push(order),
            Err(reason) => {
                warn!("skipping order row {}: {}", row + 1, reason);
                skipped += 1;
            }
        }
    }

    TableOutcome { records, skipped }
}

pub fn load_robots<R: Read>(reader: R, grid_size: u64) -> TableOutcome<Robot> {
    let mut records = Vec::new();
    let mut skipped = 0;
    for (row, result) in csv::Reader::from_reader(reader).deserialize().enumerate() {
        let record: RobotRecord = match result {
            Ok(record) => record,
            Err(error) => {
                warn!("skipping malformed robot row {}: {}", row + 1, error);
                skipped += 1;
                continue;
            }
        };
        match validate_robot(record, grid_size) {
            Ok(robot) => records.push(robot),
            Err(reason) => {
                warn!("skipping robot row {}: {}", row + 1, reason);
                skipped += 1;
            }
        }
    }

    TableOutcome { records, skipped }
}

pub fn load_orders_file(path: &Path, grid_size: u64) -> Result<TableOutcome<Order>, TableError> {
    Ok(load_orders(File::open(path)?, grid_size))
}

pub fn load_robots_file(path: &Path, grid_size: u64) -> Result<TableOutcome<Robot>, TableError> {
    Ok(load_robots(File::open(path)?, grid_size))
}

fn validate_order(record: OrderRecord, grid_size: u64) -> Result<Order, String> {
    if record.x >= grid_size || record.y >= grid_size {
        return Err(format!(
            "location ({}, {}) outside the {}x{} grid",
            record.x, record.y, grid_size, grid_size,
        ));
    }
    if !record.weight.is_finite() || record.weight <= 0.0 {
        return Err(format!("non-positive weight {}", record.weight));
    }

    Ok(Order {
        id: record.id,
        location: Vertex {
            x: record.x,
            y: record.y,
        },
        weight: record.weight,
        fragile: parse_fragile(record.fragile.as_deref()),
        urgency: parse_urgency(record.urgency.as_deref()),
    })
}

fn validate_robot(record: RobotRecord, grid_size: u64) -> Result<Robot, String> {
    if record.x >= grid_size || record.y >= grid_size {
        return Err(format!(
            "position ({}, {}) outside the {}x{} grid",
            record.x, record.y, grid_size, grid_size,
        ));
    }
    if !record.load_capacity.is_finite() || record.load_capacity <= 0.0 {
        return Err(format!("non-positive load capacity {}", record.load_capacity));
    }
    if !record.speed.is_finite() || record.speed <= 0.0 {
        return Err(format!("non-positive speed {}", record.speed));
    }
    if !record.battery.is_finite() {
        return Err(format!("invalid battery level {}", record.battery));
    }

    Ok(Robot {
        id: record.id,
        position: Vertex {
            x: record.x,
            y: record.y,
        },
        load_capacity: record.load_capacity,
        battery: record.battery.clamp(0.0, 100.0),
        speed: record.speed,
    })
}

fn parse_fragile(value: Option<&str>) -> bool {
    value
        .map(|text| text.trim().to_lowercase().starts_with('y'))
        .unwrap_or(false)
}

fn parse_urgency(value: Option<&str>) -> Option<Urgency> {
    match value?.trim().to_lowercase().as_str() {
        "low" => Some(Urgency::Low),
        "medium" => Some(Urgency::Medium),
        "high" => Some(Urgency::High),
        _ => None,
    }
}
