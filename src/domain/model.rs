use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Upper-case `RRGGBB`, the form OOXML expects in `srgbClr/@val`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cmyk(pub u8, pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRecord {
    pub key: &'static str,
    pub name: &'static str,
    pub hex: &'static str,
    pub rgb: Rgb,
    pub cmyk: Cmyk,
    pub usage: &'static str,
}

/// Cosmetic prompt decorations shared by a group of illustrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    MolecularStructure,
    NetworkDiagram,
    CellImagery,
    EducationalGraphic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleHints {
    pub style: &'static str,
    pub elements: &'static [&'static str],
    pub tone: &'static str,
}

impl StyleCategory {
    pub fn hints(self) -> &'static StyleHints {
        crate::domain::brand::style_hints(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    pub prompt: &'static str,
    pub filename: &'static str,
    pub style: StyleCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub temperature: f64,
}

/// One paid image: what to ask for and where the bytes go (relative to the output root).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageJob {
    pub label: String,
    pub output_path: String,
    pub request: ImageRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAsset {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    pub saved: Vec<String>,
    pub failures: Vec<FailedAsset>,
    pub cost_per_image: f64,
}

impl BatchReport {
    pub fn new(cost_per_image: f64) -> Self {
        Self {
            cost_per_image,
            ..Self::default()
        }
    }

    pub fn succeeded(&self) -> usize {
        self.saved.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Cosmetic estimate; the API's own usage figures are not consulted.
    pub fn estimated_cost(&self) -> f64 {
        self.succeeded() as f64 * self.cost_per_image
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.attempted += other.attempted;
        self.saved.extend(other.saved);
        self.failures.extend(other.failures);
    }
}
