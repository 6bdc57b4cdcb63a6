use crate::consts;
use crate::core::decoder::{Instruction, Opcode};
use crate::core::error::{Fault, UnknownOpcode, VmError};
use crate::core::quirks::Quirks;
use crate::core::ram;
use crate::core::rom::Rom;
use crate::core::timer::Timers;
use crate::utils;
use log::{error, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OP_CODE_BYTES: u16 = consts::OP_CODE_BYTES as u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    /// The instruction completed and PC moved on.
    Continue,
    /// Fx0A found no key pressed; PC still points at it.
    Waiting,
    /// Execution stopped. Every later cycle returns the same fault until `reset`.
    Faulted(Fault),
}

/// How an instruction moves PC once its effect has been applied.
enum PcUpdate {
    Next,
    SkipIf(bool),
    Jump(u16),
    Stay,
}

/// CHIP-8 machine state plus the executor.
///
/// Not `Sync`: the host is expected to drive `cycle`, `tick_timers`, key writes
/// and framebuffer reads from a single thread, or wrap the processor in a lock.
#[derive(Debug, Clone)]
pub struct Processor {
    pub stack: [u16; consts::STACK_SIZE],
    pub registers: [u8; consts::REG_COUNT],
    pub idx_register: u16,
    pub pc: u16,
    pub stack_pointer: u8,
    pub timers: Timers,
    pub ram: ram::Ram,
    pub display_buffer: ram::DisplayBuffer,
    pub keyboard_buffer: ram::KeyboardBuffer,
    pub quirks: Quirks,
    fault: Option<Fault>,
    diagnostic: Option<UnknownOpcode>,
    rng: StdRng,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new()
    }
}

impl Processor {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but Cxnn draws from a deterministic sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    fn with_rng(rng: StdRng) -> Self {
        Processor {
            stack: [0; consts::STACK_SIZE],
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            stack_pointer: 0,
            timers: Timers::default(),
            ram: ram::Ram::default(),
            display_buffer: ram::DisplayBuffer::default(),
            keyboard_buffer: ram::KeyboardBuffer::default(),
            quirks: Quirks::default(),
            fault: None,
            diagnostic: None,
            rng,
        }
    }

    /// Back to power-on state. Quirks and the random sequence are kept.
    pub fn reset(&mut self) {
        self.stack = [0; consts::STACK_SIZE];
        self.registers = [0; consts::REG_COUNT];
        self.idx_register = 0;
        self.pc = consts::PROG_OFFSET as u16;
        self.stack_pointer = 0;
        self.timers = Timers::default();
        self.ram = ram::Ram::default();
        self.display_buffer = ram::DisplayBuffer::default();
        self.keyboard_buffer.release_all();
        self.fault = None;
        self.diagnostic = None;
    }

    /// Resets the machine and copies `program` to 0x200. On error nothing changes.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), VmError> {
        if program.len() > consts::MAX_ROM_BYTES {
            return Err(VmError::RomTooLarge {
                len: program.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        self.reset();
        self.ram.load_program(program)?;
        info!("loaded {} byte program at {:#05X}", program.len(), self.pc);
        Ok(())
    }

    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), VmError> {
        self.load_program(&rom.buffer)
    }

    pub fn fetch(&self) -> Opcode {
        Opcode::new(self.ram.read_word(self.pc))
    }

    /// Fetches, decodes and executes one instruction.
    pub fn cycle(&mut self) -> CycleStatus {
        if let Some(fault) = self.fault {
            return CycleStatus::Faulted(fault);
        }
        let opcode = self.fetch();
        match Instruction::decode(opcode, self.pc) {
            Ok(instruction) => {
                trace!("{:#05X}: {:#06X} {:?}", self.pc, opcode.word, instruction);
                self.execute(instruction)
            }
            Err(unknown) => {
                warn!("{}, skipping", unknown);
                self.diagnostic = Some(unknown);
                self.pc = self.pc.wrapping_add(OP_CODE_BYTES);
                CycleStatus::Continue
            }
        }
    }

    /// Applies one already-decoded instruction as if it were fetched from PC.
    pub fn execute(&mut self, instruction: Instruction) -> CycleStatus {
        if let Some(fault) = self.fault {
            return CycleStatus::Faulted(fault);
        }
        match self.apply(instruction) {
            Ok(PcUpdate::Next) => {
                self.pc = self.pc.wrapping_add(OP_CODE_BYTES);
                CycleStatus::Continue
            }
            Ok(PcUpdate::SkipIf(skip)) => {
                let step = if skip { 2 * OP_CODE_BYTES } else { OP_CODE_BYTES };
                self.pc = self.pc.wrapping_add(step);
                CycleStatus::Continue
            }
            Ok(PcUpdate::Jump(address)) => {
                self.pc = address;
                CycleStatus::Continue
            }
            Ok(PcUpdate::Stay) => CycleStatus::Waiting,
            Err(fault) => {
                error!("{}, halting", fault);
                self.fault = Some(fault);
                CycleStatus::Faulted(fault)
            }
        }
    }

    fn apply(&mut self, instruction: Instruction) -> Result<PcUpdate, Fault> {
        use Instruction::*;

        let update = match instruction {
            ClearScreen => {
                self.display_buffer.clear();
                PcUpdate::Next
            }
            Draw { x, y, height } => {
                self.draw(x, y, height);
                PcUpdate::Next
            }

            // Jumps and subroutines
            Jump(nnn) => PcUpdate::Jump(nnn),
            JumpOffset(nnn) => PcUpdate::Jump(nnn.wrapping_add(self.registers[0] as u16)),
            Call(nnn) => {
                if self.stack_pointer as usize >= consts::STACK_SIZE {
                    return Err(Fault::StackOverflow { pc: self.pc });
                }
                self.stack[self.stack_pointer as usize] = self.pc;
                self.stack_pointer += 1;
                PcUpdate::Jump(nnn)
            }
            Return => {
                if self.stack_pointer == 0 {
                    return Err(Fault::StackUnderflow { pc: self.pc });
                }
                self.stack_pointer -= 1;
                // The call's own address was saved, so step past it.
                let caller = self.stack[self.stack_pointer as usize];
                PcUpdate::Jump(caller.wrapping_add(OP_CODE_BYTES))
            }

            // Conditional skips
            SkipEqImm { x, nn } => PcUpdate::SkipIf(self.registers[x as usize] == nn),
            SkipNeImm { x, nn } => PcUpdate::SkipIf(self.registers[x as usize] != nn),
            SkipEqReg { x, y } => {
                PcUpdate::SkipIf(self.registers[x as usize] == self.registers[y as usize])
            }
            SkipNeReg { x, y } => {
                PcUpdate::SkipIf(self.registers[x as usize] != self.registers[y as usize])
            }
            SkipKeyPressed { x } => {
                PcUpdate::SkipIf(self.keyboard_buffer.is_pressed(self.registers[x as usize]))
            }
            SkipKeyNotPressed { x } => {
                PcUpdate::SkipIf(!self.keyboard_buffer.is_pressed(self.registers[x as usize]))
            }

            // Set register
            LoadImm { x, nn } => {
                self.registers[x as usize] = nn;
                PcUpdate::Next
            }
            Move { x, y } => {
                self.registers[x as usize] = self.registers[y as usize];
                PcUpdate::Next
            }
            SetIndex(nnn) => {
                self.idx_register = nnn;
                PcUpdate::Next
            }

            // Add/subtract instructions
            AddImm { x, nn } => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(nn);
                PcUpdate::Next
            }
            AddReg { x, y } => {
                let (sum, carry) =
                    self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.write_with_flag(x, sum, carry);
                PcUpdate::Next
            }
            Sub { x, y } => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.write_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
                PcUpdate::Next
            }
            SubReverse { x, y } => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.write_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
                PcUpdate::Next
            }

            // Logical instructions
            Or { x, y } => {
                self.registers[x as usize] |= self.registers[y as usize];
                PcUpdate::Next
            }
            And { x, y } => {
                self.registers[x as usize] &= self.registers[y as usize];
                PcUpdate::Next
            }
            Xor { x, y } => {
                self.registers[x as usize] ^= self.registers[y as usize];
                PcUpdate::Next
            }

            // Shifting instructions
            ShiftRight { x, y } => {
                let operand = self.shift_operand(x, y);
                self.write_with_flag(x, operand >> 1, operand & 0b0000_0001 != 0);
                PcUpdate::Next
            }
            ShiftLeft { x, y } => {
                let operand = self.shift_operand(x, y);
                self.write_with_flag(x, operand << 1, operand & 0b1000_0000 != 0);
                PcUpdate::Next
            }

            // Generate randomness
            Random { x, mask } => {
                let rand_val: u8 = self.rng.gen();
                self.registers[x as usize] = rand_val & mask;
                PcUpdate::Next
            }

            // Timers and keyboard
            LoadDelay { x } => {
                self.registers[x as usize] = self.timers.delay;
                PcUpdate::Next
            }
            SetDelay { x } => {
                self.timers.delay = self.registers[x as usize];
                PcUpdate::Next
            }
            SetSound { x } => {
                self.timers.sound = self.registers[x as usize];
                PcUpdate::Next
            }
            WaitKey { x } => match self.keyboard_buffer.first_pressed() {
                Some(key) => {
                    self.registers[x as usize] = key;
                    PcUpdate::Next
                }
                None => PcUpdate::Stay,
            },

            // Index register and memory
            AddIndex { x } => {
                let vx = self.registers[x as usize] as u16;
                let sum = self.idx_register as u32 + vx as u32;
                let overflow = sum > consts::ADDRESS_MASK as u32;
                self.idx_register = self.idx_register.wrapping_add(vx);
                self.registers[consts::FLAG_REGISTER] = overflow as u8;
                PcUpdate::Next
            }
            FontChar { x } => {
                let glyph = (self.registers[x as usize] & 0x0F) as usize;
                let address = consts::FONT_OFFSET + glyph * consts::FONT_GLYPH_BYTES;
                self.idx_register = address as u16;
                PcUpdate::Next
            }
            StoreBcd { x } => {
                let digits = utils::bcd_digits(self.registers[x as usize]);
                for (offset, digit) in digits.into_iter().enumerate() {
                    self.ram
                        .write(self.idx_register.wrapping_add(offset as u16), digit);
                }
                PcUpdate::Next
            }
            DumpRegs { x } => {
                for i in 0..=x {
                    self.ram.write(
                        self.idx_register.wrapping_add(i as u16),
                        self.registers[i as usize],
                    );
                }
                self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
                PcUpdate::Next
            }
            LoadRegs { x } => {
                for i in 0..=x {
                    self.registers[i as usize] =
                        self.ram.read(self.idx_register.wrapping_add(i as u16));
                }
                self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
                PcUpdate::Next
            }
        };
        Ok(update)
    }

    /// Result first, VF last, so VF keeps the flag when x is 0xF.
    fn write_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[consts::FLAG_REGISTER] = flag as u8;
    }

    fn shift_operand(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_uses_vy {
            self.registers[y as usize]
        } else {
            self.registers[x as usize]
        }
    }

    fn draw(&mut self, x: u8, y: u8, height: u8) {
        let x_coord = self.registers[x as usize] as usize;
        let y_coord = self.registers[y as usize] as usize;
        let mut collided = false;
        for row in 0..height {
            let sprite = self.ram.read(self.idx_register.wrapping_add(row as u16));
            for shift_pos in 0..8 {
                if sprite & (0x80 >> shift_pos) != 0 {
                    collided |= self
                        .display_buffer
                        .flip(x_coord + shift_pos, y_coord + row as usize);
                }
            }
        }
        self.display_buffer.request_redraw();
        self.registers[consts::FLAG_REGISTER] = collided as u8;
    }

    /// One 60 Hz timer step.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn set_key(&mut self, index: usize, pressed: bool) -> Result<(), VmError> {
        self.keyboard_buffer.set(index, pressed)
    }

    pub fn display(&self) -> &ram::DisplayBuffer {
        &self.display_buffer
    }

    pub fn take_redraw(&mut self) -> bool {
        self.display_buffer.take_redraw()
    }

    /// The most recent unknown opcode, if any, cleared by reading it.
    pub fn take_diagnostic(&mut self) -> Option<UnknownOpcode> {
        self.diagnostic.take()
    }

    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }
}
