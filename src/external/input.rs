use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::core::ram::KeyboardBuffer;
use crate::external::DriverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Continue,
    Quit,
}

pub struct KeyboardDriver {
    events: sdl2::EventPump,
}

/// 1234/QWER/ASDF/ZXCV mapped onto the hex keypad layout.
pub fn key_index(key: Keycode) -> Option<usize> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

impl KeyboardDriver {
    pub fn new(context: &sdl2::Sdl) -> Result<Self, DriverError> {
        Ok(KeyboardDriver {
            events: context.event_pump()?,
        })
    }

    /// Drains pending events into `keys`. Key-up clears, key-down sets.
    pub fn poll(&mut self, keys: &mut KeyboardBuffer) -> Result<HostEvent, DriverError> {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return Ok(HostEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(index) = key_index(key) {
                        keys.set(index, true)?;
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(index) = key_index(key) {
                        keys.set(index, false)?;
                    }
                }
                _ => continue,
            }
        }
        Ok(HostEvent::Continue)
    }
}
