use anyhow::{anyhow, Result};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture
const RGB_CHANNELS: usize = 3;

/// Bytes per texture row, passed to SDL as the pitch of each upload
const ROW_PITCH: usize = DISPLAY_WIDTH * RGB_CHANNELS;

/// # Display
/// An SDL2 window showing the 64x32 Chip-8 screen, each pixel drawn as a `scale`-sized square.
///
/// Every `render` uploads the whole frame into a 64x32 RGB24 streaming texture and lets SDL stretch
/// it over the window. Callers only render when the interpreter reports a new frame.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a centered `64*scale` by `32*scale` window and blanks it.
    ///
    /// Video, window and renderer failures are returned rather than unwrapped.
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let mut canvas = window.into_canvas().build()?;
        canvas.clear();
        canvas.present();

        Ok(Display { canvas })
    }

    /// Packs a FrameBuffer into RGB24 bytes, row after row, `ROW_PITCH` bytes per row.
    ///
    /// Lit pixels become white (255, 255, 255) and dark pixels black.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(pixel * 255).take(RGB_CHANNELS))
            .collect()
    }

    /// Uploads `frame` with `Texture::update` and presents it stretched over the whole window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.update(None, &pixels, ROW_PITCH)?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }
}
