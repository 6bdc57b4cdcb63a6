use crate::consts;
use crate::core::error::UnknownOpcode;
use crate::utils;

/// Field view over one 16-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub word: u16,
}

impl Opcode {
    pub fn new(word: u16) -> Self {
        Opcode { word }
    }

    pub fn from_bytes(bytes: [u8; consts::OP_CODE_BYTES]) -> Self {
        Opcode::new(utils::join_word(bytes))
    }

    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        utils::nibble_split(self.word.to_be_bytes())
    }

    /// Instruction family, bits 12-15.
    pub fn family(&self) -> u8 {
        (self.word >> 12) as u8
    }

    /// Bits 8-11.
    pub fn x(&self) -> u8 {
        ((self.word >> 8) & 0xF) as u8
    }

    /// Bits 4-7.
    pub fn y(&self) -> u8 {
        ((self.word >> 4) & 0xF) as u8
    }

    pub fn n(&self) -> u8 {
        (self.word & 0xF) as u8
    }

    pub fn nn(&self) -> u8 {
        (self.word & 0xFF) as u8
    }

    pub fn nnn(&self) -> u16 {
        self.word & 0x0FFF
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xnn
    SkipEqImm { x: u8, nn: u8 },
    /// 4xnn
    SkipNeImm { x: u8, nn: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xnn
    LoadImm { x: u8, nn: u8 },
    /// 7xnn
    AddImm { x: u8, nn: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8, y: u8 },
    /// 8xy7
    SubReverse { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    SetIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxnn
    Random { x: u8, mask: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, height: u8 },
    /// Ex9E
    SkipKeyPressed { x: u8 },
    /// ExA1
    SkipKeyNotPressed { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    FontChar { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    DumpRegs { x: u8 },
    /// Fx65
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Maps a word onto its instruction. `pc` is only carried into the error.
    pub fn decode(opcode: Opcode, pc: u16) -> Result<Instruction, UnknownOpcode> {
        let (family, x, y, n) = opcode.nibbles();
        let nn = opcode.nn();
        let nnn = opcode.nnn();

        let instruction = match (family, x, y, n) {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Jump(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, _, _, _) => Instruction::SkipEqImm { x, nn },
            (4, _, _, _) => Instruction::SkipNeImm { x, nn },
            (5, _, _, 0) => Instruction::SkipEqReg { x, y },
            (6, _, _, _) => Instruction::LoadImm { x, nn },
            (7, _, _, _) => Instruction::AddImm { x, nn },
            (8, _, _, 0) => Instruction::Move { x, y },
            (8, _, _, 1) => Instruction::Or { x, y },
            (8, _, _, 2) => Instruction::And { x, y },
            (8, _, _, 3) => Instruction::Xor { x, y },
            (8, _, _, 4) => Instruction::AddReg { x, y },
            (8, _, _, 5) => Instruction::Sub { x, y },
            (8, _, _, 6) => Instruction::ShiftRight { x, y },
            (8, _, _, 7) => Instruction::SubReverse { x, y },
            (8, _, _, 0xE) => Instruction::ShiftLeft { x, y },
            (9, _, _, 0) => Instruction::SkipNeReg { x, y },
            (0xA, _, _, _) => Instruction::SetIndex(nnn),
            (0xB, _, _, _) => Instruction::JumpOffset(nnn),
            (0xC, _, _, _) => Instruction::Random { x, mask: nn },
            (0xD, _, _, _) => Instruction::Draw { x, y, height: n },
            (0xE, _, 9, 0xE) => Instruction::SkipKeyPressed { x },
            (0xE, _, 0xA, 1) => Instruction::SkipKeyNotPressed { x },
            (0xF, _, 0, 7) => Instruction::LoadDelay { x },
            (0xF, _, 0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 1, 5) => Instruction::SetDelay { x },
            (0xF, _, 1, 8) => Instruction::SetSound { x },
            (0xF, _, 1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 2, 9) => Instruction::FontChar { x },
            (0xF, _, 3, 3) => Instruction::StoreBcd { x },
            (0xF, _, 5, 5) => Instruction::DumpRegs { x },
            (0xF, _, 6, 5) => Instruction::LoadRegs { x },
            (_, _, _, _) => {
                return Err(UnknownOpcode {
                    word: opcode.word,
                    pc,
                })
            }
        };
        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Result<Instruction, UnknownOpcode> {
        Instruction::decode(Opcode::new(word), 0x200)
    }

    #[test]
    fn test_fields() {
        let op = Opcode::from_bytes([0xD1, 0x2F]);
        assert_eq!(op.word, 0xD12F);
        assert_eq!(op.family(), 0xD);
        assert_eq!(op.x(), 0x1);
        assert_eq!(op.y(), 0x2);
        assert_eq!(op.n(), 0xF);
        assert_eq!(op.nn(), 0x2F);
        assert_eq!(op.nnn(), 0x12F);
        assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0xF));
    }

    #[test]
    fn test_decode_table() {
        assert_eq!(decode(0x00E0), Ok(Instruction::ClearScreen));
        assert_eq!(decode(0x00EE), Ok(Instruction::Return));
        assert_eq!(decode(0x1ABC), Ok(Instruction::Jump(0xABC)));
        assert_eq!(decode(0x2ABC), Ok(Instruction::Call(0xABC)));
        assert_eq!(decode(0x3A12), Ok(Instruction::SkipEqImm { x: 0xA, nn: 0x12 }));
        assert_eq!(decode(0x4A12), Ok(Instruction::SkipNeImm { x: 0xA, nn: 0x12 }));
        assert_eq!(decode(0x5AB0), Ok(Instruction::SkipEqReg { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x6A12), Ok(Instruction::LoadImm { x: 0xA, nn: 0x12 }));
        assert_eq!(decode(0x7A12), Ok(Instruction::AddImm { x: 0xA, nn: 0x12 }));
        assert_eq!(decode(0x8AB0), Ok(Instruction::Move { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB1), Ok(Instruction::Or { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB2), Ok(Instruction::And { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB3), Ok(Instruction::Xor { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB4), Ok(Instruction::AddReg { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB5), Ok(Instruction::Sub { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB6), Ok(Instruction::ShiftRight { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8AB7), Ok(Instruction::SubReverse { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x8ABE), Ok(Instruction::ShiftLeft { x: 0xA, y: 0xB }));
        assert_eq!(decode(0x9AB0), Ok(Instruction::SkipNeReg { x: 0xA, y: 0xB }));
        assert_eq!(decode(0xA123), Ok(Instruction::SetIndex(0x123)));
        assert_eq!(decode(0xB123), Ok(Instruction::JumpOffset(0x123)));
        assert_eq!(decode(0xC3F0), Ok(Instruction::Random { x: 3, mask: 0xF0 }));
        assert_eq!(decode(0xD125), Ok(Instruction::Draw { x: 1, y: 2, height: 5 }));
        assert_eq!(decode(0xE59E), Ok(Instruction::SkipKeyPressed { x: 5 }));
        assert_eq!(decode(0xE5A1), Ok(Instruction::SkipKeyNotPressed { x: 5 }));
        assert_eq!(decode(0xF507), Ok(Instruction::LoadDelay { x: 5 }));
        assert_eq!(decode(0xF50A), Ok(Instruction::WaitKey { x: 5 }));
        assert_eq!(decode(0xF515), Ok(Instruction::SetDelay { x: 5 }));
        assert_eq!(decode(0xF518), Ok(Instruction::SetSound { x: 5 }));
        assert_eq!(decode(0xF51E), Ok(Instruction::AddIndex { x: 5 }));
        assert_eq!(decode(0xF529), Ok(Instruction::FontChar { x: 5 }));
        assert_eq!(decode(0xF533), Ok(Instruction::StoreBcd { x: 5 }));
        assert_eq!(decode(0xF555), Ok(Instruction::DumpRegs { x: 5 }));
        assert_eq!(decode(0xF565), Ok(Instruction::LoadRegs { x: 5 }));
    }

    #[test]
    fn test_decode_unknown() {
        for word in [
            0x0000, 0x0123, 0x00E1, 0x5121, 0x8AB8, 0x8ABF, 0x9AB1, 0xE59F, 0xF500, 0xF566,
        ] {
            assert_eq!(decode(word), Err(UnknownOpcode { word, pc: 0x200 }));
        }
    }

    #[test]
    fn test_decode_is_total() {
        let known = (0..=u16::MAX).filter(|&w| decode(w).is_ok()).count();
        // 12-bit families: 1,2,3,4,6,7,A,B,C,D. Then 5/9 (256 each),
        // 8 (9 * 256), E (2 * 16), F (9 * 16) and the two 00Ex words.
        assert_eq!(known, 10 * 4096 + 2 * 256 + 9 * 256 + 2 * 16 + 9 * 16 + 2);
    }
}
