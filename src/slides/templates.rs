//! Branded starting slides for conference and webinar decks.

use crate::domain::brand::{
    ACCENT_TEAL, BACKGROUND_LIGHT, BRAND_INFO, FONT_SIZES, PPT_LAYOUT, PRIMARY_DARK_BLUE,
    PRIMARY_LIGHT_BLUE, SECONDARY_NAVY,
};
use crate::domain::model::Rgb;
use crate::slides::pptx::DocumentProperties;
use crate::slides::{Align, Frame, Paragraph, Presentation, Slide};

pub const TEMPLATE_NAMES: [&str; 4] = [
    "Title Slide",
    "Content Slide",
    "Section Header",
    "Two-Column Layout",
];

const CONTENT_BULLETS: [&str; 4] = [
    "Key point 1: Replace with your content",
    "Key point 2: Systems thinking approach",
    "Key point 3: NGSS alignment",
    "Key point 4: Cell Collective integration",
];

pub fn document_properties() -> DocumentProperties {
    DocumentProperties::brand(format!("{} Presentation Templates", BRAND_INFO.name))
}

pub fn build_templates() -> Presentation {
    let mut presentation = Presentation::new(PPT_LAYOUT.slide_width, PPT_LAYOUT.slide_height);

    title_template(presentation.add_slide());
    content_template(presentation.add_slide());
    section_header_template(presentation.add_slide());
    two_column_template(presentation.add_slide());

    presentation
}

fn accent_bar(slide: &mut Slide, height: f64, color: Rgb) {
    slide
        .add_rectangle(Frame::inches(0.0, 0.0, PPT_LAYOUT.slide_width, height))
        .fill(color)
        .no_line();
}

fn title_template(slide: &mut Slide) {
    slide.set_background(BACKGROUND_LIGHT.rgb);
    accent_bar(slide, 0.15, PRIMARY_LIGHT_BLUE.rgb);

    slide.add_textbox(Frame::inches(1.0, 2.5, 8.0, 1.5)).paragraph(
        Paragraph::new("[Presentation Title]")
            .size(FONT_SIZES.title)
            .bold()
            .color(PRIMARY_DARK_BLUE.rgb)
            .centered(),
    );
    slide.add_textbox(Frame::inches(1.0, 4.2, 8.0, 0.8)).paragraph(
        Paragraph::new("[Subtitle or Speaker Name]")
            .size(FONT_SIZES.heading_2)
            .color(SECONDARY_NAVY.rgb)
            .centered(),
    );
    slide.add_textbox(Frame::inches(1.0, 6.5, 8.0, 0.5)).paragraph(
        Paragraph::new(format!("{} | {}", BRAND_INFO.name, BRAND_INFO.tagline))
            .size(FONT_SIZES.caption)
            .italic()
            .color(ACCENT_TEAL.rgb)
            .centered(),
    );
}

fn content_template(slide: &mut Slide) {
    slide.set_background(Rgb::WHITE);
    accent_bar(slide, 0.1, PRIMARY_LIGHT_BLUE.rgb);

    slide
        .add_textbox(Frame::inches(
            PPT_LAYOUT.margin_left,
            PPT_LAYOUT.margin_top,
            PPT_LAYOUT.content_width(),
            0.8,
        ))
        .paragraph(
            Paragraph::new("[Slide Title]")
                .size(FONT_SIZES.heading_1)
                .bold()
                .color(PRIMARY_DARK_BLUE.rgb),
        );

    let content = slide
        .add_textbox(Frame::inches(
            PPT_LAYOUT.margin_left,
            1.8,
            PPT_LAYOUT.content_width(),
            4.5,
        ))
        .word_wrap(true);
    for bullet in CONTENT_BULLETS {
        content.paragraph(
            Paragraph::new(bullet)
                .size(FONT_SIZES.body)
                .color(SECONDARY_NAVY.rgb),
        );
    }

    // page number placeholder
    slide.add_textbox(Frame::inches(8.5, 7.0, 1.0, 0.3)).paragraph(
        Paragraph::new("#")
            .size(FONT_SIZES.small)
            .color(SECONDARY_NAVY.rgb)
            .align(Align::Right),
    );
}

fn section_header_template(slide: &mut Slide) {
    let half = PPT_LAYOUT.slide_height / 2.0;
    slide
        .add_rectangle(Frame::inches(0.0, 0.0, PPT_LAYOUT.slide_width, half))
        .fill(PRIMARY_DARK_BLUE.rgb)
        .no_line();
    slide
        .add_rectangle(Frame::inches(0.0, half, PPT_LAYOUT.slide_width, half))
        .fill(PRIMARY_LIGHT_BLUE.rgb)
        .no_line();

    slide.add_textbox(Frame::inches(1.0, 3.0, 8.0, 1.5)).paragraph(
        Paragraph::new("[Section Title]")
            .size(54.0)
            .bold()
            .color(Rgb::WHITE)
            .centered(),
    );
}

fn two_column_template(slide: &mut Slide) {
    slide.set_background(Rgb::WHITE);
    accent_bar(slide, 0.1, ACCENT_TEAL.rgb);

    slide
        .add_textbox(Frame::inches(
            PPT_LAYOUT.margin_left,
            PPT_LAYOUT.margin_top,
            PPT_LAYOUT.content_width(),
            0.7,
        ))
        .paragraph(
            Paragraph::new("[Two-Column Layout]")
                .size(FONT_SIZES.heading_1)
                .bold()
                .color(PRIMARY_DARK_BLUE.rgb),
        );

    for (x, text) in [
        (PPT_LAYOUT.margin_left, "[Left Column Content]"),
        (5.25, "[Right Column Content]"),
    ] {
        slide
            .add_textbox(Frame::inches(x, 1.8, 4.0, 4.5))
            .word_wrap(true)
            .paragraph(
                Paragraph::new(text)
                    .size(FONT_SIZES.body)
                    .color(SECONDARY_NAVY.rgb),
            );
    }

    // divider
    slide
        .add_rectangle(Frame::inches(4.95, 1.8, 0.05, 4.5))
        .fill(BACKGROUND_LIGHT.rgb)
        .no_line();
}
