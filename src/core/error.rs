use std::io;
use thiserror::Error;

/// Errors surfaced by loading a program or writing host input.
#[derive(Debug, Error)]
pub enum VmError {
    #[error("program is {len} bytes, at most {max} fit above 0x200")]
    RomTooLarge { len: usize, max: usize },
    #[error("could not read program: {0}")]
    Io(#[from] io::Error),
    #[error("key index {0} is out of range (0x0-0xF)")]
    KeyOutOfRange(usize),
}

/// Conditions that halt the processor until it is reset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },
    #[error("return with empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}

/// An instruction word with no defined behaviour. Executed as a no-op.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown opcode {word:#06X} at {pc:#05X}")]
pub struct UnknownOpcode {
    pub word: u16,
    pub pc: u16,
}
