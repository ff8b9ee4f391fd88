//! A small presentation model: slides made of rectangles and text boxes at absolute
//! positions, serialised to PPTX by [`pptx`].
//!
//! Coordinates are EMU (914 400 per inch). Building a deck performs no I/O, so the same
//! inputs always give an equal [`Presentation`].

pub mod color_palette;
pub mod pptx;
pub mod templates;

use crate::domain::model::Rgb;

pub type Emu = i64;

pub const EMU_PER_INCH: f64 = 914_400.0;
pub const EMU_PER_POINT: f64 = 12_700.0;

pub fn inches(value: f64) -> Emu {
    (value * EMU_PER_INCH).round() as Emu
}

pub fn points(value: f64) -> Emu {
    (value * EMU_PER_POINT).round() as Emu
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: inches(x),
            y: inches(y),
            cx: inches(width),
            cy: inches(height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Points.
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
    pub font: Option<String>,
    pub align: Option<Align>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
            bold: false,
            italic: false,
            color: None,
            font: None,
            align: None,
        }
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn centered(self) -> Self {
        self.align(Align::Center)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
    pub word_wrap: bool,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    TextBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Whatever the renderer's default outline is.
    Default,
    None,
    Solid { width: Emu, color: Rgb },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    pub frame: Frame,
    pub fill: Option<Rgb>,
    pub line: Line,
    pub text: TextFrame,
}

impl Shape {
    pub fn fill(&mut self, color: Rgb) -> &mut Self {
        self.fill = Some(color);
        self
    }

    /// Outline `width_pt` points wide; zero removes the outline.
    pub fn line(&mut self, width_pt: f64, color: Rgb) -> &mut Self {
        self.line = if width_pt <= 0.0 {
            Line::None
        } else {
            Line::Solid {
                width: points(width_pt),
                color,
            }
        };
        self
    }

    pub fn no_line(&mut self) -> &mut Self {
        self.line = Line::None;
        self
    }

    pub fn word_wrap(&mut self, wrap: bool) -> &mut Self {
        self.text.word_wrap = wrap;
        self
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.text.paragraphs.push(paragraph);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub background: Option<Rgb>,
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn set_background(&mut self, color: Rgb) -> &mut Self {
        self.background = Some(color);
        self
    }

    pub fn add_rectangle(&mut self, frame: Frame) -> &mut Shape {
        self.add_shape(ShapeKind::Rectangle, frame)
    }

    pub fn add_textbox(&mut self, frame: Frame) -> &mut Shape {
        self.add_shape(ShapeKind::TextBox, frame)
    }

    fn add_shape(&mut self, kind: ShapeKind, frame: Frame) -> &mut Shape {
        // id 1 belongs to the slide's shape tree.
        let id = self.shapes.len() as u32 + 2;
        let (name, text) = match kind {
            ShapeKind::Rectangle => (
                format!("Rectangle {}", id - 1),
                TextFrame {
                    paragraphs: Vec::new(),
                    word_wrap: true,
                    anchor: Anchor::Middle,
                },
            ),
            ShapeKind::TextBox => (
                format!("TextBox {}", id - 1),
                TextFrame {
                    paragraphs: Vec::new(),
                    word_wrap: false,
                    anchor: Anchor::Top,
                },
            ),
        };

        self.shapes.push(Shape {
            id,
            name,
            kind,
            frame,
            fill: None,
            line: Line::Default,
            text,
        });
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Every paragraph's text on the slide, in shape order.
    pub fn texts(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .flat_map(|shape| shape.text.paragraphs.iter())
            .map(|paragraph| paragraph.text.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub width: Emu,
    pub height: Emu,
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width: inches(width_in),
            height: inches(height_in),
            slides: Vec::new(),
        }
    }

    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::default());
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(|slide| slide.shapes.len()).sum()
    }
}
