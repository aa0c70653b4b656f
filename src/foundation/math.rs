use rand::SeedableRng as _;
use rand::rngs::StdRng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Stable 64-bit FNV-1a hash of a seed label.
pub(crate) fn label_hash(label: &str) -> u64 {
    label
        .bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Deterministic random stream for a seed label.
pub(crate) fn seeded_rng(label: &str) -> StdRng {
    StdRng::seed_from_u64(label_hash(label))
}

/// `x * y / 255`, rounded; both inputs are channel-scale values.
pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255).min(255) as u8
}

/// Truncate toward zero and clamp into a channel value.
pub(crate) fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Rec. 601 luma of straight RGB, normalized to [0, 1].
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0
}
