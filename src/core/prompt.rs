use crate::domain::brand::{
    ACCENT_TEAL, BACKGROUND_LIGHT, MASCOT_INFO, PRIMARY_DARK_BLUE, PRIMARY_LIGHT_BLUE,
};
use crate::domain::model::StyleCategory;

/// Subject description decorated with the category's style hints and the brand palette.
pub fn visual_asset_prompt(subject: &str, style: StyleCategory) -> String {
    let hints = style.hints();
    let brand_colors = [PRIMARY_LIGHT_BLUE.hex, ACCENT_TEAL.hex, PRIMARY_DARK_BLUE.hex].join(", ");

    format!(
        "{subject}\n\n\
         Style: {style}\n\
         Color palette: {brand_colors} (ModelIt K12 brand colors)\n\
         Elements: {elements}\n\
         Tone: {tone}\n\
         Background: White or light gradient ({background})\n\
         High quality, professional, educational illustration suitable for middle school science materials.\n",
        style = hints.style,
        elements = hints.elements.join(", "),
        tone = hints.tone,
        background = BACKGROUND_LIGHT.hex,
    )
}

pub fn mascot_prompt(pose: &str) -> String {
    format!(
        "Character design for educational mascot named \"{name}\":\n\n\
         Description: {description}\n\
         Personality: {personality}\n\
         Appearance: {appearance}\n\n\
         Pose: {pose}\n\n\
         Style: Friendly cartoon illustration, cel-shaded, smooth gradients\n\
         Color scheme: {colors}\n\
         Background: Transparent or white\n\
         Quality: High resolution, clean edges, professional character design suitable for educational materials\n\n\
         The character should look friendly, approachable, and scientifically accurate while being engaging for middle school students.",
        name = MASCOT_INFO.name,
        description = MASCOT_INFO.description,
        personality = MASCOT_INFO.personality,
        appearance = MASCOT_INFO.appearance,
        colors = MASCOT_INFO.color_scheme.join(", "),
    )
}

/// "thinking (hand on chin)" -> "micro_mayhem_thinking_hand_on_chin.png"
pub fn mascot_filename(pose: &str) -> String {
    let slug: String = pose
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("micro_mayhem_{}.png", slug)
}

/// First 60 characters, for progress lines.
pub fn short_label(prompt: &str) -> String {
    let mut label: String = prompt.chars().take(60).collect();
    if prompt.chars().count() > 60 {
        label.push_str("...");
    }
    label
}
