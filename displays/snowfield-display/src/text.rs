//! Anchored text rendering
//!
//! Places a single line of text against one of nine anchor points of the
//! draw target (corners, edge midpoints and center).

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_5X8, FONT_6X10, FONT_6X13_BOLD, FONT_7X13, FONT_7X14, FONT_8X13,
    FONT_9X15, FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

/// Capacity of a formatted greeting line
pub const GREETING_CAPACITY: usize = 32;

/// Fonts shown by the font showcase, smallest first
pub const DEMO_FONTS: &[&MonoFont<'static>] = &[
    &FONT_5X8,
    &FONT_6X10,
    &FONT_6X13_BOLD,
    &FONT_7X13,
    &FONT_7X14,
    &FONT_8X13,
    &FONT_9X15,
    &FONT_9X18_BOLD,
    &FONT_10X20,
];

/// Where a line of text is pinned on the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextAnchor {
    fn alignment(self) -> Alignment {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Alignment::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => Alignment::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Alignment::Right,
        }
    }

    fn baseline(self) -> Baseline {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Baseline::Top,
            Self::MiddleLeft | Self::Center | Self::MiddleRight => Baseline::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Baseline::Bottom,
        }
    }

    /// Anchor point on a target of the given size
    pub fn point(self, size: Size) -> Point {
        let w = size.width as i32;
        let h = size.height as i32;
        let x = match self.alignment() {
            Alignment::Left => 0,
            Alignment::Center => w / 2,
            Alignment::Right => w - 1,
        };
        let y = match self.baseline() {
            Baseline::Top => 0,
            Baseline::Middle => h / 2,
            _ => h - 1,
        };
        Point::new(x, y)
    }
}

/// Draw one line of text pinned to `anchor`
///
/// Returns the position just past the drawn text.
pub fn draw_anchored<D>(
    target: &mut D,
    text: &str,
    anchor: TextAnchor,
    font: &MonoFont<'_>,
) -> Result<Point, D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let character_style = MonoTextStyle::new(font, BinaryColor::On);
    let text_style = TextStyleBuilder::new()
        .alignment(anchor.alignment())
        .baseline(anchor.baseline())
        .build();

    Text::with_text_style(text, anchor.point(target.size()), character_style, text_style)
        .draw(target)
}

/// Format a `"<label>: <count>"` greeting line
///
/// Labels too long for the line are cut short; the count is always kept.
pub fn greeting(label: &str, count: u32) -> String<GREETING_CAPACITY> {
    let mut digits: String<10> = String::new();
    let _ = write!(digits, "{}", count);

    let room = GREETING_CAPACITY - ": ".len() - digits.len();
    let mut line = String::new();
    for c in label.chars() {
        if line.len() + c.len_utf8() > room {
            break;
        }
        let _ = line.push(c);
    }
    let _ = line.push_str(": ");
    let _ = line.push_str(&digits);
    line
}

/// Steps through a list of fonts, holding each one for a fixed time
///
/// Time is passed in by the caller, in milliseconds on any monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct FontCycle<'a> {
    fonts: &'a [&'a MonoFont<'a>],
    hold_ms: u64,
    started_ms: u64,
}

impl<'a> FontCycle<'a> {
    /// Start cycling at `now_ms`; a zero hold time is treated as 1 ms
    pub fn new(fonts: &'a [&'a MonoFont<'a>], hold_ms: u64, now_ms: u64) -> Self {
        Self {
            fonts,
            hold_ms: hold_ms.max(1),
            started_ms: now_ms,
        }
    }

    /// Index and font due at `now_ms`, or `None` once every font has had
    /// its turn
    pub fn font_at(&self, now_ms: u64) -> Option<(usize, &'a MonoFont<'a>)> {
        let index = usize::try_from(now_ms.saturating_sub(self.started_ms) / self.hold_ms).ok()?;
        self.fonts.get(index).map(|&font| (index, font))
    }

    /// Total time until the cycle is over
    pub fn duration_ms(&self) -> u64 {
        self.hold_ms.saturating_mul(self.fonts.len() as u64)
    }
}
