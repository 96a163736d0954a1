//! Audio-reactive grid distortion patterns.
//!
//! Each pattern is a pure function of a grid point, elapsed time and the
//! frame's band energies, returning the displaced point:
//! - CrystalFlow: angular crystallization with a ripple overlay
//! - NeuralPulse: decaying radial pulses
//! - SpectrumVortex: bass-tightened spiral
//! - QuantumField: radial interference modulated by angle
//! - FracturedSpace: offset quadratic fracture lines
//!
//! All patterns work in a fixed 400×400 logical space centred on (200, 200).
//! Surfaces scale that space to their physical size.

mod crystal_flow;
mod fractured_space;
mod grid;
mod neural_pulse;
mod quantum_field;
mod spectrum_vortex;

pub use grid::{GridWalk, GRID_END, GRID_START};

use serde::{Deserialize, Serialize};

/// Side length of the logical canvas.
pub const CANVAS_SIZE: f32 = 400.0;

/// Centre of the logical canvas on both axes.
pub const CENTER: f32 = CANVAS_SIZE / 2.0;

/// A point in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point2D {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Available patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    #[default]
    CrystalFlow,
    NeuralPulse,
    SpectrumVortex,
    QuantumField,
    FracturedSpace,
}

impl PatternKind {
    /// Parse an identifier, label, or kebab/snake-case name. Case-insensitive.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "crystalflow" | "crystal" => Some(Self::CrystalFlow),
            "neuralpulse" | "neural" | "pulse" => Some(Self::NeuralPulse),
            "spectrumvortex" | "vortex" => Some(Self::SpectrumVortex),
            "quantumfield" | "quantum" => Some(Self::QuantumField),
            "fracturedspace" | "fractured" | "fracture" => Some(Self::FracturedSpace),
            _ => None,
        }
    }

    /// Stable identifier, as used in config files.
    pub fn id(&self) -> &'static str {
        match self {
            Self::CrystalFlow => "crystalFlow",
            Self::NeuralPulse => "neuralPulse",
            Self::SpectrumVortex => "spectrumVortex",
            Self::QuantumField => "quantumField",
            Self::FracturedSpace => "fracturedSpace",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CrystalFlow => "Crystal Flow",
            Self::NeuralPulse => "Neural Pulse",
            Self::SpectrumVortex => "Spectrum Vortex",
            Self::QuantumField => "Quantum Field",
            Self::FracturedSpace => "Fractured Space",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CrystalFlow => "Angular crystal facets that bloom with bass and shimmer with highs",
            Self::NeuralPulse => "Radial pulses that decay outward from the centre",
            Self::SpectrumVortex => "A spiral that tightens as the bass hits",
            Self::QuantumField => "Interference rings folded by angular harmonics",
            Self::FracturedSpace => "Quadratic fracture lines sliding across the grid",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::CrystalFlow,
            Self::NeuralPulse,
            Self::SpectrumVortex,
            Self::QuantumField,
            Self::FracturedSpace,
        ]
    }

    /// Displace grid point `(x, y)` at time `t` using this frame's `bands`.
    ///
    /// `bands` must hold at least 32 values.
    pub fn transform(&self, x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
        match self {
            Self::CrystalFlow => crystal_flow::displace(x, y, t, bands),
            Self::NeuralPulse => neural_pulse::displace(x, y, t, bands),
            Self::SpectrumVortex => spectrum_vortex::displace(x, y, t, bands),
            Self::QuantumField => quantum_field::displace(x, y, t, bands),
            Self::FracturedSpace => fractured_space::displace(x, y, t, bands),
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Offset of `(x, y)` from the canvas centre, with its angle and length.
#[inline]
fn polar(x: f32, y: f32) -> (f32, f32, f32, f32) {
    let dx = x - CENTER;
    let dy = y - CENTER;
    (dx, dy, dy.atan2(dx), dx.hypot(dy))
}
