use crate::consts;
use crate::core::ram::DisplayBuffer;
use crate::external::DriverError;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const BACKGROUND: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};
const FOREGROUND: Color = Color {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
};

pub struct DisplayDriver {
    pub screen: Canvas<Window>,
    scale: u32,
}

impl DisplayDriver {
    pub fn new(context: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, DriverError> {
        let video_subsystem = context.video()?;
        let window = video_subsystem
            .window(
                title,
                consts::CHIP8_WIDTH as u32 * scale,
                consts::CHIP8_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let mut canvas: Canvas<Window> = window.into_canvas().present_vsync().build()?;

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            scale,
        })
    }

    pub fn draw(&mut self, display: &DisplayBuffer) -> Result<(), DriverError> {
        self.screen.set_draw_color(BACKGROUND);
        self.screen.clear();
        self.screen.set_draw_color(FOREGROUND);
        for (index, &pixel) in display.as_slice().iter().enumerate() {
            if pixel == 0 {
                continue;
            }
            let x = (index % consts::CHIP8_WIDTH) as u32 * self.scale;
            let y = (index / consts::CHIP8_WIDTH) as u32 * self.scale;
            self.screen
                .fill_rect(Rect::new(x as i32, y as i32, self.scale, self.scale))?;
        }
        self.screen.present();
        Ok(())
    }
}
