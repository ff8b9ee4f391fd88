//! PPTX serialisation: one master, one blank layout, a brand theme and one part per slide.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::domain::brand::{
    ACCENT_GOLD, ACCENT_TEAL, BACKGROUND_LIGHT, BRAND_INFO, FONTS, FONT_SIZES, PRIMARY_DARK_BLUE,
    PRIMARY_LIGHT_BLUE, SECONDARY_NAVY,
};
use crate::domain::model::Rgb;
use crate::domain::ports::Storage;
use crate::slides::{Align, Anchor, Line, Paragraph, Presentation, Shape, ShapeKind, Slide};
use crate::utils::error::Result;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const FIRST_SLIDE_ID: usize = 256;
const SLIDE_MASTER_ID: u64 = 2_147_483_648;
const SLIDE_LAYOUT_ID: u64 = 2_147_483_649;

/// Metadata written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProperties {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub description: String,
}

impl DocumentProperties {
    pub fn brand(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: BRAND_INFO.mission.to_string(),
            creator: BRAND_INFO.name.to_string(),
            description: BRAND_INFO.target_audience.to_string(),
        }
    }
}

struct Theme {
    name: &'static str,
    dark_1: Rgb,
    light_1: Rgb,
    dark_2: Rgb,
    light_2: Rgb,
    accents: [Rgb; 6],
    hyperlink: Rgb,
    followed_hyperlink: Rgb,
    major_font: &'static str,
    minor_font: &'static str,
}

const BRAND_THEME: Theme = Theme {
    name: "ModelIt K12",
    dark_1: Rgb::BLACK,
    light_1: Rgb::WHITE,
    dark_2: SECONDARY_NAVY.rgb,
    light_2: BACKGROUND_LIGHT.rgb,
    accents: [
        PRIMARY_LIGHT_BLUE.rgb,
        ACCENT_TEAL.rgb,
        ACCENT_GOLD.rgb,
        PRIMARY_DARK_BLUE.rgb,
        SECONDARY_NAVY.rgb,
        BACKGROUND_LIGHT.rgb,
    ],
    hyperlink: PRIMARY_LIGHT_BLUE.rgb,
    followed_hyperlink: PRIMARY_DARK_BLUE.rgb,
    major_font: FONTS.headings,
    minor_font: FONTS.body,
};

/// Serialises `presentation` to PPTX bytes. Output depends only on the arguments.
pub fn write_presentation(
    presentation: &Presentation,
    properties: &DocumentProperties,
) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, content) in package_parts(presentation, properties) {
        zip.start_file(name.as_str(), entry_options())?;
        zip.write_all(content.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Writes the deck through `storage` and returns where it landed.
pub async fn save_presentation<S: Storage>(
    storage: &S,
    path: &str,
    presentation: &Presentation,
    properties: &DocumentProperties,
) -> Result<String> {
    let bytes = write_presentation(presentation, properties)?;
    storage.write_file(path, &bytes).await?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), storage.describe(path));
    Ok(storage.describe(path))
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Every part of the package in archive order, `[Content_Types].xml` first.
fn package_parts(
    presentation: &Presentation,
    properties: &DocumentProperties,
) -> Vec<(String, String)> {
    let slide_count = presentation.slides.len();
    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types(slide_count)),
        ("_rels/.rels".to_string(), package_rels()),
        ("docProps/core.xml".to_string(), core_properties(properties)),
        ("docProps/app.xml".to_string(), app_properties(slide_count)),
        (
            "ppt/presentation.xml".to_string(),
            presentation_part(presentation),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels(slide_count),
        ),
        (
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            slide_master(),
        ),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            relationships(&[
                ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", REL_THEME, "../theme/theme1.xml"),
            ]),
        ),
        (
            "ppt/slideLayouts/slideLayout1.xml".to_string(),
            slide_layout(),
        ),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            relationships(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")]),
        ),
        ("ppt/theme/theme1.xml".to_string(), theme(&BRAND_THEME)),
    ];

    for (index, slide) in presentation.slides.iter().enumerate() {
        let number = index + 1;
        parts.push((format!("ppt/slides/slide{number}.xml"), slide_part(slide)));
        parts.push((
            format!("ppt/slides/_rels/slide{number}.xml.rels"),
            relationships(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")]),
        ));
    }

    parts
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        "{XML_DECLARATION}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"{CT_RELS}\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>"
    );

    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ];
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            "<Override PartName=\"{part}\" ContentType=\"{content_type}\"/>"
        ));
    }
    for number in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" ContentType=\"{CT_SLIDE}\"/>"
        ));
    }

    xml.push_str("</Types>");
    xml
}

fn relationships(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = format!("{XML_DECLARATION}<Relationships xmlns=\"{NS_PACKAGE_RELS}\">");
    for (id, rel_type, target) in entries {
        xml.push_str(&format!(
            "<Relationship Id=\"{id}\" Type=\"{rel_type}\" Target=\"{target}\"/>"
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn package_rels() -> String {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn core_properties(properties: &DocumentProperties) -> String {
    format!(
        "{XML_DECLARATION}<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{}</dc:title><dc:subject>{}</dc:subject>\
         <dc:creator>{}</dc:creator><dc:description>{}</dc:description>\
         </cp:coreProperties>",
        escape_xml(&properties.title),
        escape_xml(&properties.subject),
        escape_xml(&properties.creator),
        escape_xml(&properties.description),
    )
}

fn app_properties(slide_count: usize) -> String {
    format!(
        "{XML_DECLARATION}<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
         <Application>{}</Application><Slides>{slide_count}</Slides></Properties>",
        env!("CARGO_PKG_NAME"),
    )
}

fn presentation_part(presentation: &Presentation) -> String {
    let mut xml = format!(
        "{XML_DECLARATION}<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"{SLIDE_MASTER_ID}\" r:id=\"rId1\"/></p:sldMasterIdLst>"
    );

    if !presentation.slides.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for index in 0..presentation.slides.len() {
            xml.push_str(&format!(
                "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
                FIRST_SLIDE_ID + index,
                index + 3
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }

    xml.push_str(&format!(
        "<p:sldSz cx=\"{}\" cy=\"{}\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/></p:presentation>",
        presentation.width, presentation.height
    ));
    xml
}

fn presentation_rels(slide_count: usize) -> String {
    let mut entries = vec![
        (
            "rId1".to_string(),
            REL_SLIDE_MASTER,
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        ("rId2".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
    ];
    for number in 1..=slide_count {
        entries.push((
            format!("rId{}", number + 2),
            REL_SLIDE,
            format!("slides/slide{number}.xml"),
        ));
    }

    let borrowed: Vec<(&str, &str, &str)> = entries
        .iter()
        .map(|(id, rel_type, target)| (id.as_str(), *rel_type, target.as_str()))
        .collect();
    relationships(&borrowed)
}

fn group_header() -> &'static str {
    "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
     <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
}

fn default_text_style(size: f64, font: &str) -> String {
    format!(
        "<a:lvl1pPr><a:defRPr sz=\"{}\"><a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>\
         <a:latin typeface=\"{font}\"/></a:defRPr></a:lvl1pPr>",
        hundredths(size)
    )
}

fn slide_master() -> String {
    format!(
        "{XML_DECLARATION}<p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>\
         <p:spTree>{}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
         accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
         accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"{SLIDE_LAYOUT_ID}\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         <p:txStyles><p:titleStyle>{}</p:titleStyle><p:bodyStyle>{}</p:bodyStyle>\
         <p:otherStyle>{}</p:otherStyle></p:txStyles></p:sldMaster>",
        group_header(),
        default_text_style(FONT_SIZES.title, "+mj-lt"),
        default_text_style(FONT_SIZES.body, "+mn-lt"),
        default_text_style(FONT_SIZES.body, "+mn-lt"),
    )
}

fn slide_layout() -> String {
    format!(
        "{XML_DECLARATION}<p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" \
         type=\"blank\" preserve=\"1\"><p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        group_header()
    )
}

fn srgb(color: Rgb) -> String {
    format!("<a:srgbClr val=\"{}\"/>", color.to_hex())
}

fn solid_fill(color: Rgb) -> String {
    format!("<a:solidFill>{}</a:solidFill>", srgb(color))
}

fn theme(theme: &Theme) -> String {
    let mut colors = format!(
        "<a:dk1>{}</a:dk1><a:lt1>{}</a:lt1><a:dk2>{}</a:dk2><a:lt2>{}</a:lt2>",
        srgb(theme.dark_1),
        srgb(theme.light_1),
        srgb(theme.dark_2),
        srgb(theme.light_2),
    );
    for (index, accent) in theme.accents.iter().enumerate() {
        let n = index + 1;
        colors.push_str(&format!("<a:accent{n}>{}</a:accent{n}>", srgb(*accent)));
    }
    colors.push_str(&format!(
        "<a:hlink>{}</a:hlink><a:folHlink>{}</a:folHlink>",
        srgb(theme.hyperlink),
        srgb(theme.followed_hyperlink)
    ));

    let placeholder_fill = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let fills = placeholder_fill.repeat(3);
    let lines: String = [6350, 12700, 19050]
        .iter()
        .map(|width| format!("<a:ln w=\"{width}\">{placeholder_fill}</a:ln>"))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        "{XML_DECLARATION}<a:theme xmlns:a=\"{NS_A}\" name=\"{name}\"><a:themeElements>\
         <a:clrScheme name=\"{name}\">{colors}</a:clrScheme>\
         <a:fontScheme name=\"{name}\">\
         <a:majorFont><a:latin typeface=\"{major}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"{minor}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"{name}\"><a:fillStyleLst>{fills}</a:fillStyleLst>\
         <a:lnStyleLst>{lines}</a:lnStyleLst><a:effectStyleLst>{effects}</a:effectStyleLst>\
         <a:bgFillStyleLst>{fills}</a:bgFillStyleLst></a:fmtScheme>\
         </a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>",
        name = escape_xml(theme.name),
        major = escape_xml(theme.major_font),
        minor = escape_xml(theme.minor_font),
    )
}

fn slide_part(slide: &Slide) -> String {
    let mut xml = format!(
        "{XML_DECLARATION}<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\"><p:cSld>"
    );

    if let Some(background) = slide.background {
        xml.push_str(&format!(
            "<p:bg><p:bgPr>{}<a:effectLst/></p:bgPr></p:bg>",
            solid_fill(background)
        ));
    }

    xml.push_str("<p:spTree>");
    xml.push_str(group_header());
    for shape in &slide.shapes {
        xml.push_str(&shape_xml(shape));
    }
    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    xml
}

fn shape_xml(shape: &Shape) -> String {
    let non_visual = match shape.kind {
        ShapeKind::Rectangle => "<p:cNvSpPr/>",
        ShapeKind::TextBox => "<p:cNvSpPr txBox=\"1\"/>",
    };

    let fill = match (shape.fill, shape.kind) {
        (Some(color), _) => solid_fill(color),
        (None, ShapeKind::TextBox) => "<a:noFill/>".to_string(),
        (None, ShapeKind::Rectangle) => String::new(),
    };

    let line = match shape.line {
        Line::Default => String::new(),
        Line::None => "<a:ln><a:noFill/></a:ln>".to_string(),
        Line::Solid { width, color } => format!("<a:ln w=\"{width}\">{}</a:ln>", solid_fill(color)),
    };

    let frame = shape.frame;
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/>{non_visual}<p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>{fill}{line}</p:spPr>{body}</p:sp>",
        id = shape.id,
        name = escape_xml(&shape.name),
        x = frame.x,
        y = frame.y,
        cx = frame.cx,
        cy = frame.cy,
        body = text_body(shape),
    )
}

fn text_body(shape: &Shape) -> String {
    let text = &shape.text;
    let wrap = if text.word_wrap { "square" } else { "none" };
    let anchor = match text.anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
    };

    let mut xml = format!(
        "<p:txBody><a:bodyPr wrap=\"{wrap}\" rtlCol=\"0\" anchor=\"{anchor}\"/><a:lstStyle/>"
    );
    if text.paragraphs.is_empty() {
        xml.push_str("<a:p><a:endParaRPr lang=\"en-US\" dirty=\"0\"/></a:p>");
    }
    for paragraph in &text.paragraphs {
        xml.push_str(&paragraph_xml(paragraph));
    }
    xml.push_str("</p:txBody>");
    xml
}

fn hundredths(points: f64) -> i64 {
    (points * 100.0).round() as i64
}

fn run_properties(tag: &str, paragraph: &Paragraph) -> String {
    let mut attributes = String::from(" lang=\"en-US\"");
    if let Some(size) = paragraph.size {
        attributes.push_str(&format!(" sz=\"{}\"", hundredths(size)));
    }
    if paragraph.bold {
        attributes.push_str(" b=\"1\"");
    }
    if paragraph.italic {
        attributes.push_str(" i=\"1\"");
    }
    attributes.push_str(" dirty=\"0\"");

    let mut children = String::new();
    if let Some(color) = paragraph.color {
        children.push_str(&solid_fill(color));
    }
    if let Some(font) = &paragraph.font {
        children.push_str(&format!("<a:latin typeface=\"{}\"/>", escape_xml(font)));
    }

    if children.is_empty() {
        format!("<a:{tag}{attributes}/>")
    } else {
        format!("<a:{tag}{attributes}>{children}</a:{tag}>")
    }
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    let mut xml = String::from("<a:p>");
    if let Some(align) = paragraph.align {
        let algn = match align {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        };
        xml.push_str(&format!("<a:pPr algn=\"{algn}\"/>"));
    }

    if paragraph.text.is_empty() {
        xml.push_str(&run_properties("endParaRPr", paragraph));
    } else {
        xml.push_str(&format!(
            "<a:r>{}<a:t>{}</a:t></a:r>",
            run_properties("rPr", paragraph),
            escape_xml(&paragraph.text)
        ));
    }

    xml.push_str("</a:p>");
    xml
}
