/// Switches between behaviours that historical interpreters disagree on.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy6/8xyE shift Vy into Vx (COSMAC VIP) instead of shifting Vx in place.
    pub shift_uses_vy: bool,
}

impl Quirks {
    pub fn cosmac_vip() -> Self {
        Quirks {
            shift_uses_vy: true,
        }
    }
}
