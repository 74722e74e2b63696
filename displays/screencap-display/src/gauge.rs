//! Gauge face and needles

use embedded_graphics::image::{Image, ImageRawLE};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::geometry::{arrow_base, is_visible, needle_angle, needle_tip, polar};

/// Dial background of the drawn face
pub const FACE_COLOR: Rgb565 = Rgb565::new(3, 6, 3);

/// TFT light grey (0xD69A)
pub const LIGHT_GREY: Rgb565 = Rgb565::new(26, 52, 26);

const DIAL_RADIUS: u32 = 100;
const MAJOR_TICK_INNER: f32 = 84.0;
const MINOR_TICK_INNER: f32 = 90.0;
const TICK_OUTER: f32 = 98.0;
const LABEL_RADIUS: f32 = 70.0;

/// Disc at the arrow pivot
const HUB_DIAMETER: u32 = 21;
const HUB_DOT_DIAMETER: u32 = 5;

/// Background drawn under the needles
#[derive(Debug, Clone, Copy)]
pub enum GaugeFace<'a> {
    /// Dial drawn from primitives
    Drawn,
    /// Pre-rendered full-screen picture, little-endian RGB565
    Bitmap(ImageRawLE<'a, Rgb565>),
}

/// Screen center, the pivot of both needles
pub fn center_of<D: Dimensions + ?Sized>(target: &D) -> Point {
    let size = target.bounding_box().size;
    Point::new((size.width / 2) as i32, (size.height / 2) as i32)
}

/// Draw the face over the whole target
pub fn draw_face<D>(target: &mut D, face: &GaugeFace<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match face {
        GaugeFace::Bitmap(raw) => Image::new(raw, Point::zero()).draw(target),
        GaugeFace::Drawn => draw_dial(target),
    }
}

fn draw_dial<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let center = center_of(target);
    target.clear(Rgb565::BLACK)?;

    Circle::with_center(center, 2 * DIAL_RADIUS + 1)
        .into_styled(PrimitiveStyle::with_fill(FACE_COLOR))
        .draw(target)?;
    Circle::with_center(center, 2 * DIAL_RADIUS + 1)
        .into_styled(PrimitiveStyle::with_stroke(LIGHT_GREY, 2))
        .draw(target)?;

    for step in 0..=10u8 {
        let angle = needle_angle(f32::from(step) * 10.0);
        let (inner, width) = if step % 5 == 0 {
            (MAJOR_TICK_INNER, 2)
        } else {
            (MINOR_TICK_INNER, 1)
        };
        Line::new(polar(center, inner, angle), polar(center, TICK_OUTER, angle))
            .into_styled(PrimitiveStyle::with_stroke(LIGHT_GREY, width))
            .draw(target)?;
    }

    let label_style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    for (value, label) in [(0.0, "0"), (50.0, "50"), (100.0, "100")] {
        let at = polar(center, LABEL_RADIUS, needle_angle(value));
        Text::with_text_style(label, at, label_style, centered).draw(target)?;
    }

    Ok(())
}

/// Draw the green reference needle and the red arrow
///
/// Either needle is skipped when its value is outside 0..=100. The pivot
/// disc belongs to the arrow and is only drawn with it.
pub fn draw_needles<D>(target: &mut D, value: f32, reference: Option<f32>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let center = center_of(target);

    if let Some(reference) = reference.filter(|&r| is_visible(r)) {
        Line::new(center, needle_tip(center, reference))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::GREEN, 1))
            .draw(target)?;
    }

    if is_visible(value) {
        let tip = needle_tip(center, value);
        let (left, right) = arrow_base(center, tip);
        Triangle::new(tip, left, right)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(target)?;
        Circle::with_center(center, HUB_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(target)?;
        Circle::with_center(center, HUB_DOT_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(target)?;
    }

    Ok(())
}

/// Face plus needles
pub fn draw_gauge<D>(
    target: &mut D,
    face: &GaugeFace<'_>,
    value: f32,
    reference: Option<f32>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_face(target, face)?;
    draw_needles(target, value, reference)
}
