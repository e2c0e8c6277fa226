pub mod store;

use std::fmt;
use std::str::FromStr;

use crate::error::FilmError;

pub use store::{ActiveSettings, Channel, Parameter, PresetStore};

/// Row-major 3x3 matrix mixing input (R, G, B) into output (R, G, B).
pub type ColorMatrix = [[f64; 3]; 3];

pub const IDENTITY_MATRIX: ColorMatrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilmPresetId {
    Velvia,
    Provia,
    Astia,
    Pro400h,
    ClassicChrome,
    ClassicNeg,
    Eterna,
    Acros,
}

impl FilmPresetId {
    /// Catalog in display order.
    pub const ALL: &[FilmPresetId] = &[
        FilmPresetId::Velvia,
        FilmPresetId::Provia,
        FilmPresetId::Astia,
        FilmPresetId::Pro400h,
        FilmPresetId::ClassicChrome,
        FilmPresetId::ClassicNeg,
        FilmPresetId::Eterna,
        FilmPresetId::Acros,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilmPresetId::Velvia => "Velvia",
            FilmPresetId::Provia => "Provia",
            FilmPresetId::Astia => "Astia",
            FilmPresetId::Pro400h => "Pro 400H",
            FilmPresetId::ClassicChrome => "Classic Chrome",
            FilmPresetId::ClassicNeg => "Classic Neg",
            FilmPresetId::Eterna => "Eterna",
            FilmPresetId::Acros => "Acros",
        }
    }

    /// Stable identifier used when selecting a preset by name.
    pub fn id(self) -> &'static str {
        match self {
            FilmPresetId::Velvia => "velvia",
            FilmPresetId::Provia => "provia",
            FilmPresetId::Astia => "astia",
            FilmPresetId::Pro400h => "pro400h",
            FilmPresetId::ClassicChrome => "classic-chrome",
            FilmPresetId::ClassicNeg => "classic-neg",
            FilmPresetId::Eterna => "eterna",
            FilmPresetId::Acros => "acros",
        }
    }

    pub fn config(self) -> FilmPreset {
        match self {
            FilmPresetId::Velvia => FilmPreset {
                saturation: 1.45,
                shadow_curve: 1.4,
                highlight_curve: 1.2,
                color_matrix: [
                    [1.10, -0.05, -0.05],
                    [-0.05, 1.05, 0.00],
                    [-0.05, 0.00, 1.10],
                ],
                warmth: 0.0,
                grain: 0.0,
                halation: 0.0,
            },
            FilmPresetId::Provia => FilmPreset {
                saturation: 1.15,
                shadow_curve: 1.1,
                highlight_curve: 1.05,
                color_matrix: [
                    [1.03, -0.02, -0.01],
                    [-0.01, 1.02, -0.01],
                    [-0.01, -0.02, 1.03],
                ],
                warmth: 0.0,
                grain: 0.05,
                halation: 0.05,
            },
            FilmPresetId::Astia => FilmPreset {
                saturation: 1.05,
                shadow_curve: 0.95,
                highlight_curve: 1.1,
                color_matrix: [
                    [1.04, -0.02, -0.02],
                    [-0.02, 1.02, 0.00],
                    [-0.02, 0.00, 0.98],
                ],
                warmth: 0.05,
                grain: 0.04,
                halation: 0.1,
            },
            FilmPresetId::Pro400h => FilmPreset {
                saturation: 0.95,
                shadow_curve: 0.9,
                highlight_curve: 1.15,
                color_matrix: [
                    [1.02, 0.00, -0.02],
                    [-0.03, 1.05, -0.02],
                    [-0.02, 0.04, 1.04],
                ],
                warmth: 0.08,
                grain: 0.15,
                halation: 0.15,
            },
            FilmPresetId::ClassicChrome => FilmPreset {
                saturation: 0.8,
                shadow_curve: 1.25,
                highlight_curve: 1.1,
                color_matrix: [
                    [1.02, 0.00, -0.02],
                    [0.00, 0.98, 0.02],
                    [-0.02, 0.02, 0.92],
                ],
                warmth: 0.03,
                grain: 0.1,
                halation: 0.05,
            },
            FilmPresetId::ClassicNeg => FilmPreset {
                saturation: 0.9,
                shadow_curve: 1.3,
                highlight_curve: 1.25,
                color_matrix: [
                    [1.05, -0.02, -0.03],
                    [-0.03, 1.00, 0.03],
                    [0.02, -0.06, 0.95],
                ],
                warmth: 0.02,
                grain: 0.2,
                halation: 0.2,
            },
            FilmPresetId::Eterna => FilmPreset {
                saturation: 0.7,
                shadow_curve: 0.85,
                highlight_curve: 1.3,
                color_matrix: [
                    [0.98, 0.03, -0.01],
                    [0.00, 1.00, 0.00],
                    [0.00, 0.03, 0.97],
                ],
                warmth: 0.0,
                grain: 0.1,
                halation: 0.25,
            },
            // Rec. 601 luma in every row; saturation has nothing left to act on.
            FilmPresetId::Acros => FilmPreset {
                saturation: 1.0,
                shadow_curve: 1.15,
                highlight_curve: 1.1,
                color_matrix: [
                    [0.299, 0.587, 0.114],
                    [0.299, 0.587, 0.114],
                    [0.299, 0.587, 0.114],
                ],
                warmth: 0.0,
                grain: 0.35,
                halation: 0.0,
            },
        }
    }
}

impl fmt::Display for FilmPresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilmPresetId {
    type Err = FilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilmPresetId::ALL
            .iter()
            .copied()
            .find(|preset| preset.id() == s)
            .ok_or_else(|| FilmError::UnknownPreset(s.to_string()))
    }
}

/// Numeric description of one film stock's colour and tone response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmPreset {
    pub saturation: f64,
    pub shadow_curve: f64,
    pub highlight_curve: f64,
    pub color_matrix: ColorMatrix,
    /// Red gain and blue cut applied with the matrix; 0 is neutral.
    pub warmth: f64,
    pub grain: f64,
    pub halation: f64,
}

impl Default for FilmPreset {
    /// Neutral settings: every stage except rolloff is an identity.
    fn default() -> Self {
        Self {
            saturation: 1.0,
            shadow_curve: 1.0,
            highlight_curve: 1.0,
            color_matrix: IDENTITY_MATRIX,
            warmth: 0.0,
            grain: 0.0,
            halation: 0.0,
        }
    }
}
