use crate::consts;

pub fn nibble_split(bytes: [u8; consts::OP_CODE_BYTES]) -> (u8, u8, u8, u8) {
    (
        (bytes[0] & 0xF0) >> 4,
        bytes[0] & 0x0F,
        (bytes[1] & 0xF0) >> 4,
        bytes[1] & 0x0F,
    )
}

/// Big-endian: high byte first.
pub fn join_word(bytes: [u8; consts::OP_CODE_BYTES]) -> u16 {
    ((bytes[0] as u16) << 8) | (bytes[1] as u16)
}

pub fn bcd_digits(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

pub fn mask_address(address: u16) -> usize {
    (address & consts::ADDRESS_MASK) as usize
}
