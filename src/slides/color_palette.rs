//! The brand color palette deck: title, primary swatches, accent swatches, usage examples.

use chrono::NaiveDate;

use crate::domain::brand::{
    ACCENT_GOLD, ACCENT_TEAL, BACKGROUND_LIGHT, BRAND_INFO, FONTS, PPT_LAYOUT, PRIMARY_DARK_BLUE,
    PRIMARY_LIGHT_BLUE, SECONDARY_NAVY,
};
use crate::domain::model::{ColorRecord, Rgb};
use crate::slides::pptx::DocumentProperties;
use crate::slides::{Frame, Paragraph, Presentation, Slide};

const SWATCH_X: [f64; 3] = [1.0, 3.75, 6.5];
const SWATCH_Y: f64 = 2.0;
const SWATCH_WIDTH: f64 = 2.5;
const SWATCH_HEIGHT: f64 = 1.5;

pub fn document_properties() -> DocumentProperties {
    DocumentProperties::brand(format!("{} Brand Color Palette", BRAND_INFO.name))
}

pub fn build_color_palette(generated_on: NaiveDate) -> Presentation {
    let mut presentation = Presentation::new(PPT_LAYOUT.slide_width, PPT_LAYOUT.slide_height);

    title_slide(presentation.add_slide(), generated_on);
    swatch_slide(
        presentation.add_slide(),
        "Primary Colors",
        [&PRIMARY_DARK_BLUE, &PRIMARY_LIGHT_BLUE, &SECONDARY_NAVY],
    );
    swatch_slide(
        presentation.add_slide(),
        "Accent & Background Colors",
        [&BACKGROUND_LIGHT, &ACCENT_TEAL, &ACCENT_GOLD],
    );
    usage_slide(presentation.add_slide());

    presentation
}

fn full_width(y: f64, height: f64) -> Frame {
    Frame::inches(PPT_LAYOUT.margin_left, y, PPT_LAYOUT.content_width(), height)
}

fn title_slide(slide: &mut Slide, generated_on: NaiveDate) {
    slide.set_background(BACKGROUND_LIGHT.rgb);

    slide.add_textbox(full_width(2.0, 1.5)).paragraph(
        Paragraph::new(BRAND_INFO.name)
            .size(60.0)
            .bold()
            .color(PRIMARY_DARK_BLUE.rgb)
            .centered(),
    );
    slide.add_textbox(full_width(3.7, 1.0)).paragraph(
        Paragraph::new("Brand Color Palette")
            .size(36.0)
            .color(PRIMARY_LIGHT_BLUE.rgb)
            .centered(),
    );
    slide.add_textbox(full_width(5.0, 0.6)).paragraph(
        Paragraph::new(BRAND_INFO.tagline)
            .size(18.0)
            .italic()
            .color(SECONDARY_NAVY.rgb)
            .centered(),
    );
    slide.add_textbox(full_width(6.5, 0.4)).paragraph(
        Paragraph::new(format!("Generated: {}", generated_on.format("%B %d, %Y")))
            .size(12.0)
            .color(SECONDARY_NAVY.rgb)
            .centered(),
    );
}

fn swatch_slide(slide: &mut Slide, title: &str, colors: [&ColorRecord; 3]) {
    slide.set_background(Rgb::WHITE);

    slide.add_textbox(full_width(0.5, 0.8)).paragraph(
        Paragraph::new(title)
            .size(40.0)
            .bold()
            .color(PRIMARY_DARK_BLUE.rgb)
            .centered(),
    );

    for (record, x) in colors.into_iter().zip(SWATCH_X) {
        add_swatch(slide, record, x, SWATCH_Y);
    }
}

/// Filled rectangle with the color's name above, its codes below and a usage note.
fn add_swatch(slide: &mut Slide, record: &ColorRecord, x: f64, y: f64) {
    slide
        .add_rectangle(Frame::inches(x, y, SWATCH_WIDTH, SWATCH_HEIGHT))
        .fill(record.rgb)
        .line(2.0, SECONDARY_NAVY.rgb);

    slide
        .add_textbox(Frame::inches(x, y - 0.4, SWATCH_WIDTH, 0.35))
        .paragraph(
            Paragraph::new(record.name)
                .size(16.0)
                .bold()
                .color(SECONDARY_NAVY.rgb)
                .centered(),
        );

    let Rgb(r, g, b) = record.rgb;
    let cmyk = record.cmyk;
    let code = |text: String| Paragraph::new(text).size(11.0).font(FONTS.code).centered();
    slide
        .add_textbox(Frame::inches(x, y + SWATCH_HEIGHT + 0.1, SWATCH_WIDTH, 0.8))
        .word_wrap(true)
        .paragraph(code(format!("HEX: {}", record.hex)))
        .paragraph(code(format!("RGB: {}, {}, {}", r, g, b)))
        .paragraph(code(format!(
            "CMYK: {}, {}, {}, {}",
            cmyk.0, cmyk.1, cmyk.2, cmyk.3
        )));

    slide
        .add_textbox(Frame::inches(x, y + SWATCH_HEIGHT + 1.0, SWATCH_WIDTH, 0.6))
        .word_wrap(true)
        .paragraph(
            Paragraph::new(record.usage)
                .size(10.0)
                .italic()
                .color(SECONDARY_NAVY.rgb)
                .centered(),
        );
}

fn usage_slide(slide: &mut Slide) {
    slide.set_background(BACKGROUND_LIGHT.rgb);

    slide.add_textbox(full_width(0.5, 0.6)).paragraph(
        Paragraph::new("Color Usage Examples")
            .size(36.0)
            .bold()
            .color(PRIMARY_DARK_BLUE.rgb)
            .centered(),
    );

    slide
        .add_textbox(Frame::inches(1.0, 1.8, 8.0, 1.5))
        .word_wrap(true)
        .paragraph(
            Paragraph::new("Example Heading (Primary Dark Blue)")
                .size(28.0)
                .bold()
                .color(PRIMARY_DARK_BLUE.rgb),
        )
        .paragraph(
            Paragraph::new(
                "This is body text in the same primary dark blue. Use for main content and professional materials.",
            )
            .size(16.0)
            .color(SECONDARY_NAVY.rgb),
        );

    slide
        .add_rectangle(Frame::inches(1.5, 3.8, 3.0, 0.7))
        .fill(PRIMARY_LIGHT_BLUE.rgb)
        .no_line()
        .paragraph(
            Paragraph::new("Download Now")
                .size(24.0)
                .bold()
                .color(Rgb::WHITE)
                .centered(),
        );

    slide
        .add_rectangle(Frame::inches(5.5, 3.8, 3.0, 0.7))
        .fill(ACCENT_GOLD.rgb)
        .no_line()
        .paragraph(
            Paragraph::new("⚠️ Important Note")
                .size(22.0)
                .bold()
                .color(SECONDARY_NAVY.rgb)
                .centered(),
        );

    slide
        .add_textbox(Frame::inches(1.0, 5.0, 8.0, 1.5))
        .word_wrap(true)
        .paragraph(
            Paragraph::new("🔬 Science Content (Accent Teal)")
                .size(24.0)
                .bold()
                .color(ACCENT_TEAL.rgb),
        )
        .paragraph(
            Paragraph::new(
                "Use accent teal for scientific content, molecular diagrams, and biology-themed materials.",
            )
            .size(16.0)
            .color(SECONDARY_NAVY.rgb),
        );
}
