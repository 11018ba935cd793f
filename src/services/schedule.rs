//! Deterministic construction schedule synthesis.
//!
//! The synthesizer lays a fixed, ordered list of construction phases
//! back-to-back from a reference date. Durations cycle through a 7/10/13-day
//! pattern by phase index. This is a placeholder heuristic for review and
//! export purposes: there is no dependency graph, no resource leveling, and
//! no critical path.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::AreaStatement;

/// Where a phase's displayed quantity comes from in the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySource {
    /// `site_details.actual_site_area.sqm`
    SiteArea,
    /// Sum of `residential_block_area_statement.basements`
    BasementsTotal,
    /// `residential_block_area_statement.super_structure_area_sqm`
    SuperStructure,
    /// `residential_block_area_statement.floor_wise_area.first_floor`
    FirstFloor,
    /// No natural quantity mapping for this phase.
    None,
}

/// One construction phase of the fixed sequence.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    pub name: &'static str,
    pub quantity: QuantitySource,
}

/// The fixed phase sequence, in execution order.
pub const PHASES: [Phase; 19] = [
    Phase { name: "Site Clearance & Layout", quantity: QuantitySource::SiteArea },
    Phase { name: "Excavation", quantity: QuantitySource::BasementsTotal },
    Phase { name: "Footings", quantity: QuantitySource::SuperStructure },
    Phase { name: "Column up to Plinth", quantity: QuantitySource::None },
    Phase { name: "Plinth Beam", quantity: QuantitySource::None },
    Phase { name: "Backfilling", quantity: QuantitySource::None },
    Phase { name: "Ground Floor Slab", quantity: QuantitySource::FirstFloor },
    Phase { name: "Column Upto Roof Level", quantity: QuantitySource::None },
    Phase { name: "Roof Beam & Slab", quantity: QuantitySource::None },
    Phase { name: "Brick Work", quantity: QuantitySource::None },
    Phase { name: "Plastering", quantity: QuantitySource::SuperStructure },
    Phase { name: "Flooring", quantity: QuantitySource::SuperStructure },
    Phase { name: "Painting", quantity: QuantitySource::SuperStructure },
    Phase { name: "Water Supply and Sanitary", quantity: QuantitySource::None },
    Phase { name: "Electrical", quantity: QuantitySource::None },
    Phase { name: "Compound Wall", quantity: QuantitySource::None },
    Phase { name: "Septic Tank and Sump", quantity: QuantitySource::None },
    Phase { name: "Overhead Water Tank", quantity: QuantitySource::None },
    Phase { name: "Final Finishing / Handing Over", quantity: QuantitySource::None },
];

/// Marker shown when a phase has no resolvable quantity.
pub const NO_QUANTITY: &str = "N/A";

/// One scheduled task. Never mutated after creation; serial order is display
/// order is phase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTask {
    pub serial: u32,
    pub description: String,
    pub quantity: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: String,
}

/// A named phase section with its tasks. One task per phase today; the shape
/// leaves room for splitting a phase into multiple tasks without an API
/// break, as long as serials and date chaining stay contiguous across the
/// whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSection {
    pub name: String,
    pub tasks: Vec<ScheduleTask>,
}

/// Ordered phase sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleSections(pub Vec<ScheduleSection>);

impl ScheduleSections {
    pub fn sections(&self) -> &[ScheduleSection] {
        &self.0
    }

    pub fn tasks(&self) -> impl Iterator<Item = &ScheduleTask> {
        self.0.iter().flat_map(|s| s.tasks.iter())
    }

    pub fn section(&self, name: &str) -> Option<&ScheduleSection> {
        self.0.iter().find(|s| s.name == name)
    }
}

/// Working days assigned to the phase at a 0-based index: cycles 7, 10, 13.
pub fn duration_days(phase_index: usize) -> u64 {
    7 + (phase_index as u64 % 3) * 3
}

/// Synthesize the full 19-phase schedule from a statement and a reference
/// date.
///
/// Phase 0 starts on the reference date; every later phase starts one day
/// after the previous phase's end. A missing quantity field degrades that
/// phase's quantity to [`NO_QUANTITY`], never an error.
pub fn synthesize_schedule(statement: &AreaStatement, today: NaiveDate) -> ScheduleSections {
    let mut sections = Vec::with_capacity(PHASES.len());
    let mut start = today;

    for (index, phase) in PHASES.iter().enumerate() {
        let days = duration_days(index);
        let end = start + Days::new(days);
        let task = ScheduleTask {
            serial: index as u32 + 1,
            description: phase.name.to_string(),
            quantity: quantity_for(statement, phase.quantity),
            start_date: start,
            end_date: end,
            duration: format!("{} days", days),
        };
        sections.push(ScheduleSection {
            name: phase.name.to_string(),
            tasks: vec![task],
        });
        start = end + Days::new(1);
    }

    ScheduleSections(sections)
}

fn quantity_for(statement: &AreaStatement, source: QuantitySource) -> String {
    let value = match source {
        QuantitySource::SiteArea => statement
            .lookup(&["site_details", "actual_site_area", "sqm"])
            .and_then(fmt_scalar),
        QuantitySource::BasementsTotal => statement
            .sum_at(&["residential_block_area_statement", "basements"])
            .map(fmt_number),
        QuantitySource::SuperStructure => statement
            .lookup(&["residential_block_area_statement", "super_structure_area_sqm"])
            .and_then(fmt_scalar),
        QuantitySource::FirstFloor => statement
            .lookup(&["residential_block_area_statement", "floor_wise_area", "first_floor"])
            .and_then(fmt_scalar),
        QuantitySource::None => None,
    };
    match value {
        Some(v) => format!("{} sqm", v),
        None => NO_QUANTITY.to_string(),
    }
}

// Numbers render without a trailing ".0" so `1000` reads "1000 sqm", matching
// the review table. A field widened to text by an edit renders verbatim.
fn fmt_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(fmt_number),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_cycle_seven_ten_thirteen() {
        assert_eq!(duration_days(0), 7);
        assert_eq!(duration_days(1), 10);
        assert_eq!(duration_days(2), 13);
        assert_eq!(duration_days(3), 7);
        assert_eq!(duration_days(18), 7);
    }

    #[test]
    fn number_formatting_drops_integral_fraction() {
        assert_eq!(fmt_number(1000.0), "1000");
        assert_eq!(fmt_number(900.5), "900.5");
    }
}
