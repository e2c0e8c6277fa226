use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::{ColorMatrix, FilmPreset, FilmPresetId};
use crate::error::{FilmError, Result};

/// The parameter set the kernel reads on every frame.
///
/// Starts as a copy of a preset and may be overridden one field at a time.
/// Values are stored as given; clamping happens on output pixels only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSettings {
    pub saturation: f64,
    pub shadow_curve: f64,
    pub highlight_curve: f64,
    pub color_matrix: ColorMatrix,
    pub warmth: f64,
    pub grain: f64,
    pub halation: f64,
}

impl From<FilmPreset> for ActiveSettings {
    fn from(preset: FilmPreset) -> Self {
        Self {
            saturation: preset.saturation,
            shadow_curve: preset.shadow_curve,
            highlight_curve: preset.highlight_curve,
            color_matrix: preset.color_matrix,
            warmth: preset.warmth,
            grain: preset.grain,
            halation: preset.halation,
        }
    }
}

impl Default for ActiveSettings {
    fn default() -> Self {
        FilmPreset::default().into()
    }
}

impl ActiveSettings {
    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::Saturation => self.saturation,
            Parameter::ShadowCurve => self.shadow_curve,
            Parameter::HighlightCurve => self.highlight_curve,
            Parameter::Warmth => self.warmth,
            Parameter::Grain => self.grain,
            Parameter::Halation => self.halation,
            Parameter::Matrix { row, col } => self.color_matrix[row.index()][col.index()],
        }
    }

    pub fn set(&mut self, param: Parameter, value: f64) {
        match param {
            Parameter::Saturation => self.saturation = value,
            Parameter::ShadowCurve => self.shadow_curve = value,
            Parameter::HighlightCurve => self.highlight_curve = value,
            Parameter::Warmth => self.warmth = value,
            Parameter::Grain => self.grain = value,
            Parameter::Halation => self.halation = value,
            Parameter::Matrix { row, col } => {
                self.color_matrix[row.index()][col.index()] = value;
            }
        }
    }
}

/// Colour channel addressing a row or column of the colour matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        self as usize
    }

    /// `None` for anything outside `0..3`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        })
    }
}

/// One user-adjustable field of [`ActiveSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Saturation,
    ShadowCurve,
    HighlightCurve,
    Warmth,
    Grain,
    Halation,
    /// Weight of input channel `col` in output channel `row`.
    Matrix { row: Channel, col: Channel },
}

impl Parameter {
    pub const ALL: [Parameter; 15] = {
        use Channel::{Blue, Green, Red};
        [
            Parameter::Saturation,
            Parameter::ShadowCurve,
            Parameter::HighlightCurve,
            Parameter::Warmth,
            Parameter::Grain,
            Parameter::Halation,
            Parameter::Matrix { row: Red, col: Red },
            Parameter::Matrix { row: Red, col: Green },
            Parameter::Matrix { row: Red, col: Blue },
            Parameter::Matrix { row: Green, col: Red },
            Parameter::Matrix { row: Green, col: Green },
            Parameter::Matrix { row: Green, col: Blue },
            Parameter::Matrix { row: Blue, col: Red },
            Parameter::Matrix { row: Blue, col: Green },
            Parameter::Matrix { row: Blue, col: Blue },
        ]
    };

    /// Matrix coefficient by numeric position, `None` when either index is out of range.
    pub fn matrix(row: usize, col: usize) -> Option<Self> {
        Some(Parameter::Matrix {
            row: Channel::from_index(row)?,
            col: Channel::from_index(col)?,
        })
    }

    /// Machine name accepted by [`PresetStore::set_parameter`].
    pub fn key(self) -> String {
        match self {
            Parameter::Saturation => "saturation".to_string(),
            Parameter::ShadowCurve => "shadow_curve".to_string(),
            Parameter::HighlightCurve => "highlight_curve".to_string(),
            Parameter::Warmth => "warmth".to_string(),
            Parameter::Grain => "grain".to_string(),
            Parameter::Halation => "halation".to_string(),
            Parameter::Matrix { row, col } => format!("matrix_{}{}", row.index(), col.index()),
        }
    }

    pub fn label(self) -> String {
        match self {
            Parameter::Saturation => "Saturation".to_string(),
            Parameter::ShadowCurve => "Shadow Curve".to_string(),
            Parameter::HighlightCurve => "Highlight Curve".to_string(),
            Parameter::Warmth => "Warmth".to_string(),
            Parameter::Grain => "Grain".to_string(),
            Parameter::Halation => "Halation".to_string(),
            Parameter::Matrix { row, col } => format!("{row} <- {col}"),
        }
    }

    /// Bounds of the slider that controls this parameter.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Parameter::Saturation => 0.0..=2.0,
            Parameter::ShadowCurve | Parameter::HighlightCurve => 0.5..=2.0,
            Parameter::Warmth => -0.5..=0.5,
            Parameter::Grain | Parameter::Halation => 0.0..=1.0,
            Parameter::Matrix { .. } => -0.5..=1.5,
        }
    }
}

impl FromStr for Parameter {
    type Err = FilmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let param = match s {
            "saturation" => Parameter::Saturation,
            "shadow_curve" => Parameter::ShadowCurve,
            "highlight_curve" => Parameter::HighlightCurve,
            "warmth" => Parameter::Warmth,
            "grain" => Parameter::Grain,
            "halation" => Parameter::Halation,
            _ => {
                let digits = s.strip_prefix("matrix_").map(str::as_bytes);
                let param = match digits {
                    Some(&[r @ b'0'..=b'9', c @ b'0'..=b'9']) => {
                        Parameter::matrix((r - b'0') as usize, (c - b'0') as usize)
                    }
                    _ => None,
                };
                param.ok_or_else(|| FilmError::UnknownParameter(s.to_string()))?
            }
        };
        Ok(param)
    }
}

/// Holds the preset catalog and the single active parameter set.
#[derive(Debug, Clone)]
pub struct PresetStore {
    active: ActiveSettings,
    preset: FilmPresetId,
    modified: bool,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new(FilmPresetId::Velvia)
    }
}

impl PresetStore {
    pub fn new(preset: FilmPresetId) -> Self {
        Self {
            active: preset.config().into(),
            preset,
            modified: false,
        }
    }

    pub fn list_presets(&self) -> &'static [FilmPresetId] {
        FilmPresetId::ALL
    }

    /// Select a preset by its id. On failure the current settings stay active.
    pub fn select_preset(&mut self, id: &str) -> Result<FilmPresetId> {
        let preset = id.parse::<FilmPresetId>().inspect_err(|_| {
            log::warn!("Ignoring unknown preset '{id}'");
        })?;
        self.select(preset);
        Ok(preset)
    }

    /// Replace the active settings wholesale, discarding any overrides.
    pub fn select(&mut self, preset: FilmPresetId) {
        self.active = preset.config().into();
        self.preset = preset;
        self.modified = false;
        log::info!("Selected film preset {preset}");
    }

    /// Overwrite one field by name. Any real value is accepted.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        let param = name.parse::<Parameter>().inspect_err(|_| {
            log::warn!("Ignoring unknown parameter '{name}'");
        })?;
        self.set(param, value);
        Ok(())
    }

    pub fn set(&mut self, param: Parameter, value: f64) {
        self.active.set(param, value);
        self.modified = true;
    }

    /// Copy of the current settings, taken once per frame.
    pub fn active_settings(&self) -> ActiveSettings {
        self.active
    }

    pub fn active_preset(&self) -> FilmPresetId {
        self.preset
    }

    /// True once any field has been overridden since the last preset switch.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
