//! Boot screen

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_7X13};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::gauge::{center_of, LIGHT_GREY};

/// Distance of the title and status line centers from the top and bottom edges
pub const TEXT_MARGIN: i32 = 20;

/// Height of the band cleared before drawing a status line
const STATUS_BAND: u32 = 16;

fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// Black screen, logo in the middle, title near the top
pub fn draw_splash<D>(
    target: &mut D,
    logo: Option<&ImageRaw<'_, BinaryColor>>,
    title: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;
    let center = center_of(target);

    if let Some(logo) = logo {
        let size = logo.size();
        let top_left = center - Point::new((size.width / 2) as i32, (size.height / 2) as i32);
        Image::new(logo, top_left).draw(&mut target.color_converted())?;
    }

    let style = MonoTextStyle::new(&FONT_10X20, LIGHT_GREY);
    Text::with_text_style(title, Point::new(center.x, TEXT_MARGIN), style, centered())
        .draw(target)?;
    Ok(())
}

/// White status line near the bottom, replacing any previous one
pub fn draw_status<D>(target: &mut D, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = target.bounding_box().size;
    let y = size.height as i32 - TEXT_MARGIN;

    Rectangle::new(
        Point::new(0, y - (STATUS_BAND / 2) as i32),
        Size::new(size.width, STATUS_BAND),
    )
    .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
    .draw(target)?;

    let style = MonoTextStyle::new(&FONT_7X13, Rgb565::WHITE);
    Text::with_text_style(text, Point::new((size.width / 2) as i32, y), style, centered())
        .draw(target)?;
    Ok(())
}
