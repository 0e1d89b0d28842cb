//! Rendering kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MapError;

/// Which per-cell value colors the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// Categorical color from the tile table.
    #[default]
    Tiles,
    /// Heat ramp over normalized height.
    Heights,
}

impl RenderKind {
    /// Label used in output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderKind::Tiles => "tiles",
            RenderKind::Heights => "heights",
        }
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiles" => Ok(RenderKind::Tiles),
            "heights" => Ok(RenderKind::Heights),
            other => Err(MapError::UnknownRenderKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for kind in [RenderKind::Tiles, RenderKind::Heights] {
            assert_eq!(kind.to_string().parse::<RenderKind>().unwrap(), kind);
        }
        assert_eq!(RenderKind::default(), RenderKind::Tiles);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "Tiles".parse::<RenderKind>(),
            Err(MapError::UnknownRenderKind(_))
        ));
    }
}
