//! Survey schema definitions.

use serde::{Deserialize, Serialize};

/// Survey format version written by this crate.
pub const SURVEY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Survey {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub flow: FlowConditions,
    #[serde(default)]
    pub terrain: TerrainCosts,
    #[serde(default)]
    pub strips: Vec<StripDef>,
}

/// Two-phase flow conditions along the line, in field units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowConditions {
    pub inlet_pressure_psi: f64,
    pub outlet_pressure_psi: f64,
    pub diameter_in: f64,
    /// Gas flow rate, MMSCF per day.
    pub gas_rate_mmcfd: f64,
    pub gas_oil_ratio: f64,
    pub gas_gravity: f64,
    /// Liquid density, lb/ft3.
    pub liquid_density: f64,
    /// Average line temperature.
    pub temperature_f: f64,
    pub compressibility: f64,
}

impl Default for FlowConditions {
    fn default() -> Self {
        Self {
            inlet_pressure_psi: 880.0,
            outlet_pressure_psi: 815.0,
            diameter_in: 12.17,
            gas_rate_mmcfd: 73.0,
            gas_oil_ratio: 7.3,
            gas_gravity: 0.7,
            liquid_density: 51.2,
            temperature_f: 90.0,
            compressibility: 0.867,
        }
    }
}

/// Construction cost per foot of pipe, by ground cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TerrainCosts {
    pub land: LandCosts,
    pub trees: TreeCosts,
}

impl TerrainCosts {
    /// Combined cost factor of a point's ground cover.
    pub fn factor(&self, land: LandClass, trees: TreeClass) -> f64 {
        self.land.get(land) + self.trees.get(trees)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandCosts {
    pub none: f64,
    pub water: f64,
    pub swamp: f64,
    pub rock: f64,
    pub soil: f64,
}

impl Default for LandCosts {
    fn default() -> Self {
        Self {
            none: 0.0,
            water: 1.5,
            swamp: 0.8,
            rock: 2.5,
            soil: 0.2,
        }
    }
}

impl LandCosts {
    pub fn get(&self, class: LandClass) -> f64 {
        match class {
            LandClass::None => self.none,
            LandClass::Water => self.water,
            LandClass::Swamp => self.swamp,
            LandClass::Rock => self.rock,
            LandClass::Soil => self.soil,
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("none", self.none),
            ("water", self.water),
            ("swamp", self.swamp),
            ("rock", self.rock),
            ("soil", self.soil),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeCosts {
    pub none: f64,
    pub small: f64,
    pub large: f64,
}

impl Default for TreeCosts {
    fn default() -> Self {
        Self {
            none: 0.0,
            small: 0.0,
            large: 0.55,
        }
    }
}

impl TreeCosts {
    pub fn get(&self, class: TreeClass) -> f64 {
        match class {
            TreeClass::None => self.none,
            TreeClass::Small => self.small,
            TreeClass::Large => self.large,
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("none", self.none),
            ("small", self.small),
            ("large", self.large),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LandClass {
    #[default]
    None,
    Water,
    Swamp,
    Rock,
    Soil,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreeClass {
    #[default]
    None,
    Small,
    Large,
}

/// One cross-section of the corridor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StripDef {
    pub points: Vec<PointDef>,
}

/// A candidate pipe location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub land: LandClass,
    #[serde(default)]
    pub trees: TreeClass,
    /// Inclusive `[first, last]` range of points in the previous strip this
    /// point connects back to. Absent on the first strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<[u32; 2]>,
}

impl PointDef {
    pub fn origin(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            land: LandClass::None,
            trees: TreeClass::None,
            links: None,
        }
    }

    pub fn linked(
        x: f64,
        y: f64,
        z: f64,
        land: LandClass,
        trees: TreeClass,
        first: u32,
        last: u32,
    ) -> Self {
        Self {
            x,
            y,
            z,
            land,
            trees,
            links: Some([first, last]),
        }
    }
}
