use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};

/// How the trailing hemisphere letter of a coordinate is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HemisphereMode {
    /// Drop the final character and keep the magnitude as-is ("12.3W" -> 12.3).
    #[default]
    Strip,
    /// Negate southern and western values ("12.3W" -> -12.3).
    Signed,
}

/// Parse a coordinate carrying a hemisphere suffix such as `34.5N` or `12.3W`
///
/// # Examples
/// ```
/// use climate_dashboard::utils::{parse_hemisphere_coordinate, HemisphereMode};
///
/// let lat = parse_hemisphere_coordinate("34.5N", HemisphereMode::Strip).unwrap();
/// assert!((lat - 34.5).abs() < 1e-9);
/// ```
pub fn parse_hemisphere_coordinate(coord_str: &str, mode: HemisphereMode) -> Result<f64> {
    let trimmed = coord_str.trim();

    let mut chars = trimmed.chars();
    let suffix = chars.next_back().ok_or_else(|| {
        DashboardError::InvalidCoordinate(format!("Empty coordinate value: '{}'", coord_str))
    })?;

    let magnitude = chars.as_str().trim().parse::<f64>().map_err(|_| {
        DashboardError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    match mode {
        HemisphereMode::Strip => Ok(magnitude),
        HemisphereMode::Signed => match suffix.to_ascii_uppercase() {
            'N' | 'E' => Ok(magnitude),
            'S' | 'W' => Ok(-magnitude),
            other => Err(DashboardError::InvalidCoordinate(format!(
                "Expected hemisphere letter N/S/E/W, got '{}' in '{}'",
                other, coord_str
            ))),
        },
    }
}
