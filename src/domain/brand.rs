//! ModelIt! K12 brand identity: colors, typography, copy and image-generation defaults.
//!
//! Everything here is static data. Generators read it and never mutate it.

use crate::domain::model::{Cmyk, ColorRecord, Rgb, StyleCategory, StyleHints};

pub const PRIMARY_DARK_BLUE: ColorRecord = ColorRecord {
    key: "primary_dark_blue",
    name: "Primary Dark Blue",
    hex: "#1F4E79",
    rgb: Rgb(31, 78, 121),
    cmyk: Cmyk(74, 36, 0, 53),
    usage: "Headings, primary text, professional materials",
};

pub const PRIMARY_LIGHT_BLUE: ColorRecord = ColorRecord {
    key: "primary_light_blue",
    name: "Primary Light Blue",
    hex: "#0078D7",
    rgb: Rgb(0, 120, 215),
    cmyk: Cmyk(100, 44, 0, 16),
    usage: "Accents, CTAs, interactive elements",
};

pub const SECONDARY_NAVY: ColorRecord = ColorRecord {
    key: "secondary_navy",
    name: "Secondary Navy",
    hex: "#2B2B40",
    rgb: Rgb(43, 43, 64),
    cmyk: Cmyk(33, 33, 0, 75),
    usage: "Secondary text, borders, subtle accents",
};

pub const BACKGROUND_LIGHT: ColorRecord = ColorRecord {
    key: "background_light",
    name: "Background Light",
    hex: "#F2F6FA",
    rgb: Rgb(242, 246, 250),
    cmyk: Cmyk(3, 2, 0, 2),
    usage: "Backgrounds, light sections, cards",
};

pub const ACCENT_TEAL: ColorRecord = ColorRecord {
    key: "accent_teal",
    name: "Accent Teal",
    hex: "#009999",
    rgb: Rgb(0, 153, 153),
    cmyk: Cmyk(100, 0, 0, 40),
    usage: "Highlights, science themes, molecular diagrams",
};

pub const ACCENT_GOLD: ColorRecord = ColorRecord {
    key: "accent_gold",
    name: "Accent Gold",
    hex: "#FFC857",
    rgb: Rgb(255, 200, 87),
    cmyk: Cmyk(0, 22, 66, 0),
    usage: "Warnings, important highlights, premium badges",
};

pub const BRAND_COLORS: [ColorRecord; 6] = [
    PRIMARY_DARK_BLUE,
    PRIMARY_LIGHT_BLUE,
    SECONDARY_NAVY,
    BACKGROUND_LIGHT,
    ACCENT_TEAL,
    ACCENT_GOLD,
];

pub struct Fonts {
    pub primary: &'static str,
    pub primary_fallback: &'static str,
    pub headings: &'static str,
    pub body: &'static str,
    pub code: &'static str,
}

pub const FONTS: Fonts = Fonts {
    primary: "Segoe UI",
    primary_fallback: "Arial",
    headings: "Segoe UI Semibold",
    body: "Segoe UI",
    code: "Consolas",
};

/// Point sizes.
pub struct FontSizes {
    pub title: f64,
    pub heading_1: f64,
    pub heading_2: f64,
    pub heading_3: f64,
    pub body: f64,
    pub caption: f64,
    pub small: f64,
}

pub const FONT_SIZES: FontSizes = FontSizes {
    title: 44.0,
    heading_1: 36.0,
    heading_2: 28.0,
    heading_3: 22.0,
    body: 18.0,
    caption: 14.0,
    small: 12.0,
};

pub struct BrandInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub mission: &'static str,
    pub target_audience: &'static str,
}

pub const BRAND_INFO: BrandInfo = BrandInfo {
    name: "ModelIt! K12",
    tagline: "Systems Thinking for Tomorrow's Scientists",
    mission: "Empowering K-12 students with computational modeling and systems thinking",
    target_audience: "Middle School Science Teachers (Grades 5-8)",
};

pub struct MascotInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub personality: &'static str,
    pub appearance: &'static str,
    pub color_scheme: [&'static str; 3],
    pub poses: [&'static str; 10],
}

pub const MASCOT_INFO: MascotInfo = MascotInfo {
    name: "Micro Mayhem",
    description: "A friendly, energetic cartoon microorganism character that represents the microscopic world of cell biology",
    personality: "Curious, enthusiastic, playful, scientifically accurate",
    appearance: "Spherical cell-like body with expressive eyes, cilia/flagella for movement, translucent membrane showing internal organelles",
    color_scheme: [PRIMARY_LIGHT_BLUE.hex, ACCENT_TEAL.hex, ACCENT_GOLD.hex],
    poses: [
        "thinking (hand on chin)",
        "celebrating (arms raised)",
        "teaching (pointing at board)",
        "experimenting (holding test tube)",
        "reading (with book)",
        "surprised (wide eyes)",
        "confused (question mark)",
        "excited (jumping)",
        "working (at computer)",
        "presenting (with pointer)",
    ],
};

/// Poses rendered when the whole set is not requested.
pub const MASCOT_KEY_POSES: usize = 5;

const MOLECULAR_STRUCTURE: StyleHints = StyleHints {
    style: "scientific illustration",
    elements: &["atoms", "bonds", "molecular orbitals", "3D perspective"],
    tone: "clean, professional, educational",
};

const NETWORK_DIAGRAM: StyleHints = StyleHints {
    style: "technical infographic",
    elements: &["nodes", "connections", "data flow", "system relationships"],
    tone: "modern, clean, technical",
};

const CELL_IMAGERY: StyleHints = StyleHints {
    style: "biological illustration",
    elements: &["cells", "organelles", "membranes", "biological processes"],
    tone: "scientifically accurate, vibrant, engaging",
};

const EDUCATIONAL_GRAPHIC: StyleHints = StyleHints {
    style: "flat design illustration",
    elements: &["icons", "text", "diagrams", "simple shapes"],
    tone: "friendly, accessible, clear",
};

pub fn style_hints(category: StyleCategory) -> &'static StyleHints {
    match category {
        StyleCategory::MolecularStructure => &MOLECULAR_STRUCTURE,
        StyleCategory::NetworkDiagram => &NETWORK_DIAGRAM,
        StyleCategory::CellImagery => &CELL_IMAGERY,
        StyleCategory::EducationalGraphic => &EDUCATIONAL_GRAPHIC,
    }
}

/// Defaults for the OpenRouter chat-completions call ("Nano Banana").
pub struct ImageApiDefaults {
    pub model: &'static str,
    pub endpoint: &'static str,
    pub cost_per_image: f64,
    pub modalities: [&'static str; 2],
    pub max_tokens: u32,
    pub temperature: f64,
    pub mascot_temperature: f64,
    pub timeout_seconds: u64,
    pub api_key_env: &'static str,
}

pub const NANO_BANANA: ImageApiDefaults = ImageApiDefaults {
    model: "google/gemini-2.5-flash-image",
    endpoint: "https://openrouter.ai/api/v1/chat/completions",
    cost_per_image: 0.039,
    modalities: ["image", "text"],
    max_tokens: 16000,
    temperature: 0.7,
    mascot_temperature: 0.8,
    timeout_seconds: 120,
    api_key_env: "OPENROUTER_API_KEY",
};

/// Slide geometry in inches.
pub struct PptLayout {
    pub slide_width: f64,
    pub slide_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub title_area_height: f64,
    pub content_area_top: f64,
}

pub const PPT_LAYOUT: PptLayout = PptLayout {
    slide_width: 10.0,
    slide_height: 7.5,
    margin_top: 0.5,
    margin_bottom: 0.5,
    margin_left: 0.75,
    margin_right: 0.75,
    title_area_height: 1.5,
    content_area_top: 2.0,
};

impl PptLayout {
    pub fn content_width(&self) -> f64 {
        self.slide_width - self.margin_left - self.margin_right
    }
}

pub const COLOR_PALETTE_FILE: &str = "colors/modelit_color_palette.pptx";
pub const TEMPLATES_FILE: &str = "templates/modelit_presentation_templates.pptx";
pub const VISUALS_DIR: &str = "visuals";
pub const MASCOT_DIR: &str = "mascot";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_records_agree_with_their_hex() {
        for record in BRAND_COLORS {
            assert_eq!(
                Rgb::from_hex(record.hex),
                Some(record.rgb),
                "{} hex/rgb mismatch",
                record.key
            );
        }
    }

    #[test]
    fn test_content_width() {
        assert!((PPT_LAYOUT.content_width() - 8.5).abs() < f64::EPSILON);
    }
}
