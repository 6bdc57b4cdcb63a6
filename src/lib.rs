//! A CHIP-8 virtual machine core.
//!
//! [`Processor`] owns the whole machine state. The host
//! calls `cycle` as fast as it likes and `tick_timers` at 60 Hz, writes keys
//! with `set_key`, and reads the framebuffer after `take_redraw` returns true.
//!
//! ```
//! use chip8::core::processor::{CycleStatus, Processor};
//!
//! let mut chip8 = Processor::with_seed(1);
//! chip8.load_program(&[0x60, 0x05, 0xA0, 0x50]).unwrap();
//! assert_eq!(chip8.cycle(), CycleStatus::Continue);
//! assert_eq!(chip8.cycle(), CycleStatus::Continue);
//! assert_eq!(chip8.registers[0], 5);
//! assert_eq!(chip8.idx_register, 0x050);
//! ```
pub mod consts;
pub mod core;
#[cfg(feature = "sdl")]
pub mod external;
pub mod utils;

pub use crate::core::error::{Fault, UnknownOpcode, VmError};
pub use crate::core::processor::{CycleStatus, Processor};
pub use crate::core::quirks::Quirks;
