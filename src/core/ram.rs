use crate::consts;
use crate::core::error::VmError;
use crate::utils;

#[derive(Debug, Clone)]
pub struct Ram {
    pub buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        let mut ram = Ram {
            buffer: [0; consts::RAM_BYTES],
        };
        ram.install_font();
        ram
    }
}

impl Ram {
    pub fn install_font(&mut self) {
        self.buffer[consts::FONT_OFFSET..consts::FONT_OFFSET + consts::FONT_SET_SIZE]
            .copy_from_slice(&consts::FONT_SET);
    }

    /// Copies a program image to 0x200. Nothing is written unless all of it fits.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), VmError> {
        if program.len() > consts::MAX_ROM_BYTES {
            return Err(VmError::RomTooLarge {
                len: program.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        self.buffer[consts::PROG_OFFSET..consts::PROG_OFFSET + program.len()]
            .copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: u16) -> u8 {
        self.buffer[utils::mask_address(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.buffer[utils::mask_address(address)] = value;
    }

    pub fn read_word(&self, address: u16) -> u16 {
        utils::join_word([self.read(address), self.read(address.wrapping_add(1))])
    }
}

/// 64x32 monochrome framebuffer, one byte (0 or 1) per cell, row-major.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    pub buffer: [u8; consts::DISPLAY_CELLS],
    redraw: bool,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [0; consts::DISPLAY_CELLS],
            redraw: false,
        }
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|x| *x = 0);
        self.redraw = true;
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[Self::index(x, y)]
    }

    /// XORs one pixel on, wrapping both coordinates. Returns true if it was already set.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.buffer[Self::index(x, y)];
        let collided = *cell == 1;
        *cell ^= 1;
        collided
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn index(x: usize, y: usize) -> usize {
        (x % consts::CHIP8_WIDTH) + (y % consts::CHIP8_HEIGHT) * consts::CHIP8_WIDTH
    }
}

#[derive(Default, Debug, Clone)]
pub struct KeyboardBuffer {
    pub buffer: [bool; consts::KEYBOARD_SIZE],
}

impl KeyboardBuffer {
    pub fn set(&mut self, index: usize, pressed: bool) -> Result<(), VmError> {
        match self.buffer.get_mut(index) {
            Some(key) => {
                *key = pressed;
                Ok(())
            }
            None => Err(VmError::KeyOutOfRange(index)),
        }
    }

    pub fn is_pressed(&self, index: u8) -> bool {
        self.buffer[(index & 0x0F) as usize]
    }

    pub fn first_pressed(&self) -> Option<u8> {
        self.buffer.iter().position(|&k| k).map(|i| i as u8)
    }

    pub fn release_all(&mut self) {
        self.buffer = [false; consts::KEYBOARD_SIZE];
    }
}
