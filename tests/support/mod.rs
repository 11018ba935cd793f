//! Shared fixtures for integration tests.

#![allow(dead_code)]

use asd_rust::models::{parse_statement_json_str, AreaStatement};

/// A complete, valid area statement covering all six required keys.
pub const SAMPLE_STATEMENT: &str = r#"{
    "site_details": {
        "actual_site_area": {"sqm": 1000, "sqyds": 1196},
        "affected_area": {
            "road_widening_ht_lines": {"sqm": 50, "sqyds": 59.8},
            "nala": {"sqm": 20, "sqyds": 23.9},
            "nala_buffer": {"sqm": 10, "sqyds": 12}
        },
        "net_plot_area": {"sqm": 920, "sqyds": 1100.3},
        "tot_lot_area": {
            "required": {"sqm": 92, "percent": 10},
            "provided": {"sqm": 95, "percent": 10.3}
        }
    },
    "building_floors": {
        "mall_multiplex": "B2 + G + 5",
        "residential": "B2 + Stilt + 12"
    },
    "residential_block_area_statement": {
        "super_structure_area_sqm": 2200,
        "floor_wise_area": {"first_floor": 180.5, "second_floor": 180.5, "third_floor": 175},
        "basements": {"basement_1": 450.5, "basement_2": 449.5},
        "stilts": {"stilt_1": 300},
        "assembly": {"club_house": 120}
    },
    "residential_setbacks_building_height_parking": {
        "setbacks": {"front": "9 m", "all_around": "7 m"},
        "height": {"permissible": "45 m", "proposed": "42 m"},
        "parking": {
            "required_percent": 30,
            "required_area_sqm": 660,
            "provided_percent": 32,
            "provided_area_sqm": 704
        }
    },
    "mall_multiplex_area_statement": {
        "total_area_sqm": 1800,
        "floor_wise_area": {"ground_floor": 350, "first_floor": 340},
        "basements": {"basement_1": 400},
        "occupancy_type": {"ground_floor": "retail", "first_floor": "retail"},
        "setbacks": {"all_around": "7.5 m"},
        "height": {"proposed": "24 m"},
        "parking": {
            "required_percent": 40,
            "required_area_sqm": 720,
            "provided_percent": 38,
            "provided_area_sqm": 684
        }
    },
    "amenities_area": {
        "residential": {"required_sqm": 110, "provided_sqm": 130}
    }
}"#;

pub fn sample_statement() -> AreaStatement {
    parse_statement_json_str(SAMPLE_STATEMENT).expect("sample statement must parse")
}

/// The sample with one required top-level key removed.
pub fn statement_json_without(key: &str) -> String {
    let mut value: serde_json::Value = serde_json::from_str(SAMPLE_STATEMENT).unwrap();
    value.as_object_mut().unwrap().remove(key);
    serde_json::to_string(&value).unwrap()
}
