//! SSD1306 OLED display driver
//!
//! Frame-buffered driver for 128x64 and 128x32 SSD1306 panels over any
//! [`DisplayInterface`]. Pixels are drawn into a local buffer organised in
//! 8-row pages; [`Ssd1306::flush`] sends the buffer page by page.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use snowfield_core::config::Geometry;
use snowfield_core::traits::{Color, MonoCanvas};

use crate::backend::{DisplayError, DisplayInterface};

/// Widest supported panel
pub const MAX_WIDTH: u16 = 128;

/// Tallest supported panel
pub const MAX_HEIGHT: u16 = 64;

/// Rows per RAM page
const PAGE_HEIGHT: u16 = 8;

/// Frame buffer size for the largest panel
const BUFFER_SIZE: usize = (MAX_WIDTH as usize) * (MAX_HEIGHT as usize) / 8;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_NORMAL: u8 = 0xA0;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<DI> {
    interface: DI,
    geometry: Geometry,
    /// Frame buffer (1 bit per pixel, organised as pages)
    buffer: [u8; BUFFER_SIZE],
}

impl<DI> Ssd1306<DI>
where
    DI: DisplayInterface,
{
    /// Create a driver for a panel of the given geometry
    ///
    /// Width must be at most 128 and height a multiple of 8 up to 64.
    pub fn new(interface: DI, geometry: Geometry) -> Result<Self, DisplayError<DI::Error>> {
        if geometry.width() > MAX_WIDTH
            || geometry.height() > MAX_HEIGHT
            || geometry.height() % PAGE_HEIGHT != 0
        {
            return Err(DisplayError::UnsupportedGeometry);
        }

        Ok(Self {
            interface,
            geometry,
            buffer: [0; BUFFER_SIZE],
        })
    }

    /// Pulse the reset line
    pub async fn hard_reset<RST, D>(
        &mut self,
        rst: &mut RST,
        delay: &mut D,
    ) -> Result<(), DisplayError<DI::Error>>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        rst.set_high().map_err(|_| DisplayError::ResetPin)?;
        delay.delay_ms(1).await;
        rst.set_low().map_err(|_| DisplayError::ResetPin)?;
        delay.delay_ms(10).await;
        rst.set_high().map_err(|_| DisplayError::ResetPin)?;
        delay.delay_ms(10).await;
        Ok(())
    }

    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), DisplayError<DI::Error>> {
        let height = self.geometry.height();
        let com_pins = if height == 64 { 0x12 } else { 0x02 };

        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            (height - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x02,                  // Page addressing
            cmd::SET_SEG_REMAP,    // Column 127 mapped to SEG0
            cmd::SET_COM_SCAN_DEC, // Scan from COM[N-1]
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        self.command(init_cmds).await
    }

    async fn command(&mut self, cmds: &[u8]) -> Result<(), DisplayError<DI::Error>> {
        self.interface
            .send_commands(cmds)
            .await
            .map_err(DisplayError::Interface)
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), DisplayError<DI::Error>> {
        let width = self.geometry.width() as usize;
        let pages = (self.geometry.height() / PAGE_HEIGHT) as usize;

        for page in 0..pages {
            self.command(&[
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN,
                cmd::SET_HIGH_COLUMN,
            ])
            .await?;

            let start = page * width;
            self.interface
                .send_data(&self.buffer[start..start + width])
                .await
                .map_err(DisplayError::Interface)?;
        }

        Ok(())
    }

    /// Set display contrast (0-255)
    pub async fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<DI::Error>> {
        self.command(&[cmd::SET_CONTRAST, contrast]).await
    }

    /// Turn display on/off
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<DI::Error>> {
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(&[c]).await
    }

    /// Invert display colors
    pub async fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<DI::Error>> {
        let c = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.command(&[c]).await
    }

    /// Mirror the image horizontally and/or vertically
    pub async fn set_flip(&mut self, hflip: bool, vflip: bool) -> Result<(), DisplayError<DI::Error>> {
        let seg = if hflip {
            cmd::SET_SEG_NORMAL
        } else {
            cmd::SET_SEG_REMAP
        };
        let com = if vflip {
            cmd::SET_COM_SCAN_INC
        } else {
            cmd::SET_COM_SCAN_DEC
        };
        self.command(&[seg, com]).await
    }

    /// Give back the bus interface
    pub fn release(self) -> DI {
        self.interface
    }
}

impl<DI> Ssd1306<DI> {
    /// Panel geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Set or clear one pixel; out-of-bounds coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read one pixel from the frame buffer
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .map(|(index, mask)| self.buffer[index] & mask != 0)
            .unwrap_or(false)
    }

    /// Fill the frame buffer
    pub fn fill(&mut self, on: bool) {
        let len = self.frame_len();
        self.buffer[..len].fill(if on { 0xFF } else { 0x00 });
    }

    /// Bytes of the buffer backing the visible panel
    fn frame_len(&self) -> usize {
        self.geometry.width() as usize * (self.geometry.height() / PAGE_HEIGHT) as usize
    }

    /// Byte offset and bit mask of a pixel
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let width = self.geometry.width() as i32;
        let height = self.geometry.height() as i32;
        if x < 0 || y < 0 || x >= width || y >= height {
            return None;
        }
        let page = (y / PAGE_HEIGHT as i32) as usize;
        let index = page * width as usize + x as usize;
        Some((index, 1 << (y % PAGE_HEIGHT as i32)))
    }
}

impl<DI: DisplayInterface> MonoCanvas for Ssd1306<DI> {
    type Error = DisplayError<DI::Error>;

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn clear(&mut self, color: Color) {
        self.fill(color == Color::Foreground);
    }

    fn draw_point(&mut self, x: i16, y: i16, color: Color) {
        self.set_pixel(x as i32, y as i32, color == Color::Foreground);
    }

    fn draw_vertical_run(&mut self, x: i16, top: i16, length: i16, color: Color) {
        let on = color == Color::Foreground;
        let first = (top as i32).max(0);
        let end = (top as i32 + length as i32).min(self.geometry.height() as i32);
        for y in first..end {
            self.set_pixel(x as i32, y, on);
        }
    }

    async fn submit_frame(&mut self) -> Result<(), Self::Error> {
        self.flush().await
    }
}

impl<DI> OriginDimensions for Ssd1306<DI> {
    fn size(&self) -> Size {
        Size::new(
            self.geometry.width() as u32,
            self.geometry.height() as u32,
        )
    }
}

impl<DI> DrawTarget for Ssd1306<DI> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use embassy_futures::block_on;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Commands(Vec<u8>),
        Data(Vec<u8>),
    }

    #[derive(Default)]
    pub struct RecordingInterface {
        pub sent: Vec<Sent>,
    }

    impl DisplayInterface for RecordingInterface {
        type Error = ();

        async fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
            self.sent.push(Sent::Commands(commands.to_vec()));
            Ok(())
        }

        async fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.sent.push(Sent::Data(data.to_vec()));
            Ok(())
        }
    }

    struct FailingInterface;

    impl DisplayInterface for FailingInterface {
        type Error = &'static str;

        async fn send_commands(&mut self, _: &[u8]) -> Result<(), Self::Error> {
            Err("nack")
        }

        async fn send_data(&mut self, _: &[u8]) -> Result<(), Self::Error> {
            Err("nack")
        }
    }

    fn display(width: u16, height: u16) -> Ssd1306<RecordingInterface> {
        Ssd1306::new(
            RecordingInterface::default(),
            Geometry::new(width, height).unwrap(),
        )
        .unwrap()
    }

    fn lit(display: &Ssd1306<RecordingInterface>) -> usize {
        display.buffer.iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_rejects_unsupported_geometry() {
        let too_wide = Ssd1306::new(RecordingInterface::default(), Geometry::new(129, 64).unwrap());
        assert!(matches!(too_wide, Err(DisplayError::UnsupportedGeometry)));

        let odd_rows = Ssd1306::new(RecordingInterface::default(), Geometry::new(128, 20).unwrap());
        assert!(matches!(odd_rows, Err(DisplayError::UnsupportedGeometry)));
    }

    #[test]
    fn test_pixel_layout() {
        let mut display = display(128, 64);
        display.set_pixel(3, 10, true);
        // Page 1, column 3, bit 2
        assert_eq!(display.buffer[128 + 3], 0b0000_0100);
        assert!(display.pixel(3, 10));
        display.set_pixel(3, 10, false);
        assert!(!display.pixel(3, 10));
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut display = display(128, 32);
        display.set_pixel(-1, 0, true);
        display.set_pixel(0, -3, true);
        display.set_pixel(128, 0, true);
        display.set_pixel(0, 32, true);
        assert_eq!(lit(&display), 0);
    }

    #[test]
    fn test_vertical_run_is_clipped() {
        let mut display = display(128, 32);
        MonoCanvas::draw_vertical_run(&mut display, 5, -4, 10, Color::Foreground);
        assert_eq!(lit(&display), 6);
        assert!(display.pixel(5, 0));
        assert!(display.pixel(5, 5));
        assert!(!display.pixel(5, 6));

        MonoCanvas::clear(&mut display, Color::Background);
        MonoCanvas::draw_vertical_run(&mut display, 7, 28, 10, Color::Foreground);
        assert_eq!(lit(&display), 4);
        assert!(display.pixel(7, 31));
    }

    #[test]
    fn test_clear_fills_buffer() {
        let mut display = display(128, 32);
        MonoCanvas::clear(&mut display, Color::Foreground);
        assert_eq!(lit(&display), 128 * 32);
        // Pages past the panel are never touched
        assert!(display.buffer[128 * 4..].iter().all(|&b| b == 0));
        MonoCanvas::clear(&mut display, Color::Background);
        assert_eq!(lit(&display), 0);
    }

    #[test]
    fn test_init_matches_panel_height() {
        let mut display = display(128, 32);
        block_on(display.init()).unwrap();
        let Sent::Commands(cmds) = &display.release().sent[0] else {
            panic!("expected commands");
        };
        assert_eq!(cmds[0], cmd::DISPLAY_OFF);
        assert_eq!(cmds[3..5], [cmd::SET_MUX_RATIO, 31]);
        let com = cmds.iter().position(|&c| c == cmd::SET_COM_PINS).unwrap();
        assert_eq!(cmds[com + 1], 0x02);
        assert_eq!(cmds.last(), Some(&cmd::DISPLAY_ON));
    }

    #[test]
    fn test_flush_sends_every_page() {
        let mut display = display(128, 32);
        display.set_pixel(0, 31, true);
        block_on(display.flush()).unwrap();
        let sent = display.release().sent;

        assert_eq!(sent.len(), 8);
        for (page, pair) in sent.chunks(2).enumerate() {
            assert_eq!(
                pair[0],
                Sent::Commands(std::vec![cmd::SET_PAGE_ADDR | page as u8, 0x00, 0x10])
            );
            let Sent::Data(data) = &pair[1] else {
                panic!("expected data");
            };
            assert_eq!(data.len(), 128);
        }
        let Sent::Data(last) = &sent[7] else {
            panic!("expected data");
        };
        assert_eq!(last[0], 0b1000_0000);
    }

    #[test]
    fn test_submit_frame_propagates_errors() {
        let mut display = Ssd1306::new(FailingInterface, Geometry::W128_H64).unwrap();
        assert_eq!(
            block_on(display.submit_frame()),
            Err(DisplayError::Interface("nack"))
        );
    }

    #[test]
    fn test_contrast_and_flip_commands() {
        let mut display = display(128, 64);
        block_on(display.set_contrast(0xFF)).unwrap();
        block_on(display.set_flip(true, true)).unwrap();
        block_on(display.set_flip(false, false)).unwrap();
        assert_eq!(
            display.release().sent,
            [
                Sent::Commands(std::vec![cmd::SET_CONTRAST, 0xFF]),
                Sent::Commands(std::vec![cmd::SET_SEG_NORMAL, cmd::SET_COM_SCAN_INC]),
                Sent::Commands(std::vec![cmd::SET_SEG_REMAP, cmd::SET_COM_SCAN_DEC]),
            ]
        );
    }

    #[test]
    fn test_draw_target_line() {
        let mut display = display(128, 64);
        Line::new(Point::new(0, 0), Point::new(9, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut display)
            .unwrap();
        assert_eq!(lit(&display), 10);
        assert_eq!(display.size(), Size::new(128, 64));
    }
}
