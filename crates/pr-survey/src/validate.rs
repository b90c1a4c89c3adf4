//! Survey validation logic.

use crate::schema::{FlowConditions, PointDef, SURVEY_VERSION, Survey, TerrainCosts};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Survey has no strips")]
    EmptySurvey,

    #[error("Strip {strip} must hold exactly one point, found {points}")]
    TerminalStrip { strip: usize, points: usize },

    #[error(
        "Point {point} of strip {strip} links to [{first}, {last}] but the previous strip has {available} point(s)"
    )]
    LinkOutOfRange {
        strip: usize,
        point: usize,
        first: u32,
        last: u32,
        available: usize,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_survey(survey: &Survey) -> Result<(), ValidationError> {
    if survey.version != SURVEY_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: survey.version,
        });
    }

    validate_flow(&survey.flow)?;
    validate_terrain(&survey.terrain)?;

    let strips = &survey.strips;
    let last = strips.len().checked_sub(1).ok_or(ValidationError::EmptySurvey)?;
    for terminal in [0, last] {
        let points = strips[terminal].points.len();
        if points != 1 {
            return Err(ValidationError::TerminalStrip {
                strip: terminal,
                points,
            });
        }
    }

    for (s, strip) in strips.iter().enumerate() {
        if strip.points.is_empty() {
            return Err(invalid(format!("strips[{s}].points"), "[]", "strip has no points"));
        }
        for (p, point) in strip.points.iter().enumerate() {
            validate_point(s, p, point)?;
            match (s.checked_sub(1), point.links) {
                (Some(prev), _) => validate_links(s, p, point, strips[prev].points.len())?,
                (None, Some([first, last])) => {
                    return Err(invalid(
                        format!("strips[0].points[{p}].links"),
                        format!("[{first}, {last}]"),
                        "first strip takes no links",
                    ));
                }
                (None, None) => {}
            }
        }
    }

    Ok(())
}

fn validate_point(strip: usize, index: usize, point: &PointDef) -> Result<(), ValidationError> {
    for (axis, value) in [("x", point.x), ("y", point.y), ("z", point.z)] {
        if !value.is_finite() {
            return Err(invalid(
                format!("strips[{strip}].points[{index}].{axis}"),
                value,
                "must be finite",
            ));
        }
    }
    Ok(())
}

fn validate_links(
    strip: usize,
    point: usize,
    def: &PointDef,
    available: usize,
) -> Result<(), ValidationError> {
    let [first, last] = def.links.ok_or_else(|| {
        invalid(
            format!("strips[{strip}].points[{point}].links"),
            "none",
            "every point after the first strip needs a link range",
        )
    })?;

    if first > last || last as usize >= available {
        return Err(ValidationError::LinkOutOfRange {
            strip,
            point,
            first,
            last,
            available,
        });
    }
    Ok(())
}

fn validate_flow(flow: &FlowConditions) -> Result<(), ValidationError> {
    let positive = [
        ("flow.inlet_pressure_psi", flow.inlet_pressure_psi),
        ("flow.outlet_pressure_psi", flow.outlet_pressure_psi),
        ("flow.diameter_in", flow.diameter_in),
        ("flow.gas_rate_mmcfd", flow.gas_rate_mmcfd),
        ("flow.gas_oil_ratio", flow.gas_oil_ratio),
        ("flow.gas_gravity", flow.gas_gravity),
        ("flow.liquid_density", flow.liquid_density),
        ("flow.compressibility", flow.compressibility),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(field, value, "must be positive"));
        }
    }

    // Rankine must stay positive.
    if !(flow.temperature_f.is_finite() && flow.temperature_f > -459.67) {
        return Err(invalid(
            "flow.temperature_f",
            flow.temperature_f,
            "must be above absolute zero",
        ));
    }
    Ok(())
}

fn validate_terrain(terrain: &TerrainCosts) -> Result<(), ValidationError> {
    let land = terrain.land.entries().map(|(name, v)| (format!("terrain.land.{name}"), v));
    let trees = terrain.trees.entries().map(|(name, v)| (format!("terrain.trees.{name}"), v));
    for (field, value) in land.into_iter().chain(trees) {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(field, value, "must be non-negative"));
        }
    }
    Ok(())
}

fn invalid(
    field: impl Into<String>,
    value: impl ToString,
    reason: &str,
) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
