//! Derived analytics over an area statement.
//!
//! Computes block, floor, and compliance metrics from the two block
//! statements. A check whose source fields are absent is skipped rather than
//! counted as failed, so a partial document still yields a meaningful
//! compliance rate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::AreaStatement;

/// Analytics summary of one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub total_blocks: usize,
    pub total_floors: usize,
    pub total_area_sqm: f64,
    pub average_floor_area_sqm: f64,
    pub largest_block: String,
    pub smallest_block: String,
    /// Fraction of passed compliance checks, in [0, 1].
    pub compliance_rate: f64,
    /// Block name to total area.
    pub area_distribution: BTreeMap<String, f64>,
}

/// Compute analytics for a statement.
pub fn calculate_analytics(statement: &AreaStatement) -> AnalyticsData {
    // Block totals: residential super-structure and mall/multiplex total.
    let mut blocks: Vec<(&str, f64)> = Vec::new();
    if let Some(area) =
        statement.number_at(&["residential_block_area_statement", "super_structure_area_sqm"])
    {
        blocks.push(("residential", area));
    }
    if let Some(area) = statement.number_at(&["mall_multiplex_area_statement", "total_area_sqm"]) {
        blocks.push(("mall_multiplex", area));
    }

    let total_area_sqm = blocks.iter().map(|(_, a)| a).sum();
    let area_distribution: BTreeMap<String, f64> = blocks
        .iter()
        .map(|(name, area)| (name.to_string(), *area))
        .collect();

    let largest_block = blocks
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name.to_string())
        .unwrap_or_default();
    let smallest_block = blocks
        .iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name.to_string())
        .unwrap_or_default();

    // Floor-wise areas across both blocks.
    let mut floor_areas: Vec<f64> = Vec::new();
    for block in [
        "residential_block_area_statement",
        "mall_multiplex_area_statement",
    ] {
        if let Some(floors) = statement
            .lookup(&[block, "floor_wise_area"])
            .and_then(|v| v.as_object())
        {
            floor_areas.extend(floors.values().filter_map(serde_json::Value::as_f64));
        }
    }
    let total_floors = floor_areas.len();
    let average_floor_area_sqm = if total_floors > 0 {
        floor_areas.iter().sum::<f64>() / total_floors as f64
    } else {
        0.0
    };

    // Provided-vs-required compliance checks.
    let checks = [
        (
            statement.number_at(&[
                "residential_setbacks_building_height_parking",
                "parking",
                "provided_area_sqm",
            ]),
            statement.number_at(&[
                "residential_setbacks_building_height_parking",
                "parking",
                "required_area_sqm",
            ]),
        ),
        (
            statement.number_at(&["mall_multiplex_area_statement", "parking", "provided_area_sqm"]),
            statement.number_at(&["mall_multiplex_area_statement", "parking", "required_area_sqm"]),
        ),
        (
            statement.number_at(&["amenities_area", "residential", "provided_sqm"]),
            statement.number_at(&["amenities_area", "residential", "required_sqm"]),
        ),
        (
            statement.number_at(&["site_details", "tot_lot_area", "provided", "sqm"]),
            statement.number_at(&["site_details", "tot_lot_area", "required", "sqm"]),
        ),
    ];
    let mut checked = 0usize;
    let mut passed = 0usize;
    for (provided, required) in checks {
        if let (Some(provided), Some(required)) = (provided, required) {
            checked += 1;
            if provided >= required {
                passed += 1;
            }
        }
    }
    let compliance_rate = if checked > 0 {
        passed as f64 / checked as f64
    } else {
        0.0
    };

    AnalyticsData {
        total_blocks: blocks.len(),
        total_floors,
        total_area_sqm,
        average_floor_area_sqm,
        largest_block,
        smallest_block,
        compliance_rate,
        area_distribution,
    }
}
