//! Small xxHash variant used to seed lattice gradients
//!
//! `SmallXXHash` is a cut-down xxHash32: it keeps a single accumulator,
//! "eats" 32-bit integers (or bytes) one at a time and finishes with the
//! standard avalanche mix. `SmallXXHash4` runs the identical sequence on
//! four independent lanes so four lattice corners can be hashed at once.
//!
//! Both forms are deterministic and lane `i` of the 4-wide form always
//! equals the scalar form fed with the same seed and data.

use std::ops::Add;

use glam::{BVec4, IVec4, UVec4, Vec4};

const PRIME_A: u32 = 0b1001_1110_0011_0111_0111_1001_1011_0001;
const PRIME_B: u32 = 0b1000_0101_1110_1011_1100_1010_0111_0111;
const PRIME_C: u32 = 0b1100_0010_1011_0010_1010_1110_0011_1101;
const PRIME_D: u32 = 0b0010_0111_1101_0100_1110_1011_0010_1111;
const PRIME_E: u32 = 0b0001_0110_0101_0110_0110_0111_1011_0001;

/// Scalar hash state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SmallXXHash {
    accumulator: u32,
}

impl SmallXXHash {
    /// Wrap a raw accumulator value
    #[inline]
    pub const fn new(accumulator: u32) -> Self {
        Self { accumulator }
    }

    /// Start a new hash from a seed
    #[inline]
    pub fn seed(seed: i32) -> Self {
        Self::new((seed as u32).wrapping_add(PRIME_E))
    }

    /// Raw accumulator, before the avalanche mix
    #[inline]
    pub fn accumulator(self) -> u32 {
        self.accumulator
    }

    /// Feed a 32-bit integer into the hash
    #[inline]
    pub fn eat(self, data: i32) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add((data as u32).wrapping_mul(PRIME_C));
        Self::new(mixed.rotate_left(17).wrapping_mul(PRIME_D))
    }

    /// Feed a single byte into the hash
    #[inline]
    pub fn eat_byte(self, data: u8) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add((data as u32).wrapping_mul(PRIME_E));
        Self::new(mixed.rotate_left(11).wrapping_mul(PRIME_A))
    }

    /// Finish the hash with the avalanche mix
    #[inline]
    pub fn finalize(self) -> u32 {
        let mut avalanche = self.accumulator;
        avalanche ^= avalanche >> 15;
        avalanche = avalanche.wrapping_mul(PRIME_B);
        avalanche ^= avalanche >> 13;
        avalanche = avalanche.wrapping_mul(PRIME_C);
        avalanche ^= avalanche >> 16;
        avalanche
    }

    /// Bits 0-7 of the finalized hash
    #[inline]
    pub fn bytes_a(self) -> u32 {
        self.finalize() & 255
    }

    /// Bits 8-15 of the finalized hash
    #[inline]
    pub fn bytes_b(self) -> u32 {
        (self.finalize() >> 8) & 255
    }

    /// Bits 16-23 of the finalized hash
    #[inline]
    pub fn bytes_c(self) -> u32 {
        (self.finalize() >> 16) & 255
    }

    /// Bits 24-31 of the finalized hash
    #[inline]
    pub fn bytes_d(self) -> u32 {
        self.finalize() >> 24
    }

    /// [`Self::bytes_a`] mapped to [0, 1]
    #[inline]
    pub fn floats01_a(self) -> f32 {
        self.bytes_a() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_b(self) -> f32 {
        self.bytes_b() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_c(self) -> f32 {
        self.bytes_c() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_d(self) -> f32 {
        self.bytes_d() as f32 * (1.0 / 255.0)
    }

    /// Extract `count` bits starting at bit `shift`
    ///
    /// `count` must be in 1..=31 and `count + shift` must not exceed 32.
    #[inline]
    pub fn get_bits(self, count: u32, shift: u32) -> u32 {
        debug_assert!(count > 0 && count < 32 && count + shift <= 32);
        (self.finalize() >> shift) & ((1u32 << count) - 1)
    }

    /// [`Self::get_bits`] mapped to [0, 1]
    #[inline]
    pub fn get_bits_as_floats01(self, count: u32, shift: u32) -> f32 {
        self.get_bits(count, shift) as f32 * (1.0 / ((1u32 << count) - 1) as f32)
    }
}

impl Add<i32> for SmallXXHash {
    type Output = Self;

    /// Offset the accumulator, used to derive a distinct hash per octave
    #[inline]
    fn add(self, rhs: i32) -> Self {
        Self::new(self.accumulator.wrapping_add(rhs as u32))
    }
}

impl From<SmallXXHash> for u32 {
    #[inline]
    fn from(hash: SmallXXHash) -> u32 {
        hash.finalize()
    }
}

/// Four independent hash lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmallXXHash4 {
    accumulator: UVec4,
}

impl SmallXXHash4 {
    /// Wrap raw accumulator lanes
    #[inline]
    pub const fn new(accumulator: UVec4) -> Self {
        Self { accumulator }
    }

    /// Seed each lane independently
    #[inline]
    pub fn seed(seed: IVec4) -> Self {
        Self::new(seed.as_uvec4().wrapping_add(UVec4::splat(PRIME_E)))
    }

    /// The same scalar hash in every lane
    #[inline]
    pub fn splat(hash: SmallXXHash) -> Self {
        Self::new(UVec4::splat(hash.accumulator))
    }

    #[inline]
    pub fn from_lanes(lanes: [SmallXXHash; 4]) -> Self {
        Self::new(UVec4::from_array(lanes.map(SmallXXHash::accumulator)))
    }

    /// Scalar view of one lane
    #[inline]
    pub fn lane(self, index: usize) -> SmallXXHash {
        SmallXXHash::new(self.accumulator.to_array()[index])
    }

    #[inline]
    pub fn lanes(self) -> [SmallXXHash; 4] {
        self.accumulator.to_array().map(SmallXXHash::new)
    }

    #[inline]
    pub fn accumulator(self) -> UVec4 {
        self.accumulator
    }

    /// Feed one integer per lane
    #[inline]
    pub fn eat(self, data: IVec4) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add(data.as_uvec4().wrapping_mul(UVec4::splat(PRIME_C)));
        Self::new(rotate_left(mixed, 17).wrapping_mul(UVec4::splat(PRIME_D)))
    }

    /// Feed one byte per lane
    #[inline]
    pub fn eat_bytes(self, data: [u8; 4]) -> Self {
        let data = UVec4::from_array(data.map(u32::from));
        let mixed = self
            .accumulator
            .wrapping_add(data.wrapping_mul(UVec4::splat(PRIME_E)));
        Self::new(rotate_left(mixed, 11).wrapping_mul(UVec4::splat(PRIME_A)))
    }

    /// Avalanche every lane
    #[inline]
    pub fn finalize(self) -> UVec4 {
        let mut avalanche = self.accumulator;
        avalanche ^= avalanche >> 15u32;
        avalanche = avalanche.wrapping_mul(UVec4::splat(PRIME_B));
        avalanche ^= avalanche >> 13u32;
        avalanche = avalanche.wrapping_mul(UVec4::splat(PRIME_C));
        avalanche ^= avalanche >> 16u32;
        avalanche
    }

    #[inline]
    pub fn bytes_a(self) -> UVec4 {
        self.finalize() & UVec4::splat(255)
    }

    #[inline]
    pub fn bytes_b(self) -> UVec4 {
        (self.finalize() >> 8u32) & UVec4::splat(255)
    }

    #[inline]
    pub fn bytes_c(self) -> UVec4 {
        (self.finalize() >> 16u32) & UVec4::splat(255)
    }

    #[inline]
    pub fn bytes_d(self) -> UVec4 {
        self.finalize() >> 24u32
    }

    #[inline]
    pub fn floats01_a(self) -> Vec4 {
        self.bytes_a().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_b(self) -> Vec4 {
        self.bytes_b().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_c(self) -> Vec4 {
        self.bytes_c().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_d(self) -> Vec4 {
        self.bytes_d().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn get_bits(self, count: u32, shift: u32) -> UVec4 {
        debug_assert!(count > 0 && count < 32 && count + shift <= 32);
        (self.finalize() >> shift) & UVec4::splat((1u32 << count) - 1)
    }

    #[inline]
    pub fn get_bits_as_floats01(self, count: u32, shift: u32) -> Vec4 {
        self.get_bits(count, shift).as_vec4() * (1.0 / ((1u32 << count) - 1) as f32)
    }

    /// Pick lanes from `self` where `mask` is set, from `other` otherwise
    #[inline]
    pub fn select(self, other: Self, mask: BVec4) -> Self {
        Self::new(UVec4::select(mask, self.accumulator, other.accumulator))
    }
}

#[inline]
fn rotate_left(value: UVec4, bits: u32) -> UVec4 {
    (value << bits) | (value >> (32 - bits))
}

impl Add<i32> for SmallXXHash4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: i32) -> Self {
        Self::new(self.accumulator.wrapping_add(UVec4::splat(rhs as u32)))
    }
}

impl From<SmallXXHash> for SmallXXHash4 {
    #[inline]
    fn from(hash: SmallXXHash) -> Self {
        Self::splat(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        // Reference value for seed 0, eat(1), eat(2)
        let hash = SmallXXHash::seed(0).eat(1).eat(2);
        assert_eq!(hash.finalize(), 3_814_049_997);
    }

    #[test]
    fn test_determinism() {
        let a = SmallXXHash::seed(42).eat(-7).eat(13).finalize();
        let b = SmallXXHash::seed(42).eat(-7).eat(13).finalize();
        assert_eq!(a, b);
    }

    #[test]
    fn test_eat_is_order_dependent() {
        let ab = SmallXXHash::seed(5).eat(1).eat(2).finalize();
        let ba = SmallXXHash::seed(5).eat(2).eat(1).finalize();
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_lanes_match_scalar() {
        let seeds = IVec4::new(0, 1, -3, 1000);
        let xs = IVec4::new(4, -9, 17, 0);
        let ys = IVec4::new(-1, 2, 3, i32::MAX);
        let hash4 = SmallXXHash4::seed(seeds).eat(xs).eat(ys);

        for i in 0..4 {
            let scalar = SmallXXHash::seed(seeds.to_array()[i])
                .eat(xs.to_array()[i])
                .eat(ys.to_array()[i]);
            assert_eq!(hash4.lane(i), scalar);
            assert_eq!(hash4.finalize().to_array()[i], scalar.finalize());
        }
    }

    #[test]
    fn test_byte_lanes_match_scalar() {
        let hash4 = SmallXXHash4::splat(SmallXXHash::seed(9)).eat_bytes([0, 1, 128, 255]);
        for (i, byte) in [0u8, 1, 128, 255].into_iter().enumerate() {
            assert_eq!(hash4.lane(i), SmallXXHash::seed(9).eat_byte(byte));
        }
    }

    #[test]
    fn test_octave_offset() {
        let hash = SmallXXHash::seed(3);
        assert_eq!((hash + 2).accumulator(), hash.accumulator().wrapping_add(2));
        assert_ne!((hash + 1).eat(4).finalize(), hash.eat(4).finalize());
    }

    #[test]
    fn test_bit_accessors() {
        let hash = SmallXXHash::seed(11).eat(22);
        let value = hash.finalize();
        assert_eq!(hash.bytes_a(), value & 0xff);
        assert_eq!(hash.bytes_b(), (value >> 8) & 0xff);
        assert_eq!(hash.bytes_c(), (value >> 16) & 0xff);
        assert_eq!(hash.bytes_d(), value >> 24);
        assert_eq!(hash.get_bits(8, 0), hash.bytes_a());
        assert_eq!(hash.get_bits(8, 24), hash.bytes_d());

        for f in [
            hash.floats01_a(),
            hash.floats01_b(),
            hash.floats01_c(),
            hash.floats01_d(),
            hash.get_bits_as_floats01(6, 3),
        ] {
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn test_lane_accessors_match_scalar() {
        let hash4 = SmallXXHash4::seed(IVec4::new(-5, 0, 77, i32::MIN)).eat(IVec4::new(3, -3, 0, 9));
        let lanes = hash4.lanes();
        for i in 0..4 {
            let scalar = lanes[i];
            assert_eq!(hash4.bytes_a().to_array()[i], scalar.bytes_a());
            assert_eq!(hash4.bytes_b().to_array()[i], scalar.bytes_b());
            assert_eq!(hash4.bytes_c().to_array()[i], scalar.bytes_c());
            assert_eq!(hash4.bytes_d().to_array()[i], scalar.bytes_d());
            assert_eq!(hash4.floats01_a().to_array()[i], scalar.floats01_a());
            assert_eq!(hash4.floats01_d().to_array()[i], scalar.floats01_d());
            assert_eq!(hash4.get_bits(1, 8).to_array()[i], scalar.get_bits(1, 8));
            assert_eq!(
                hash4.get_bits_as_floats01(6, 3).to_array()[i],
                scalar.get_bits_as_floats01(6, 3)
            );
            assert_eq!((hash4 + 4).lane(i), scalar + 4);
        }
    }

    #[test]
    fn test_select() {
        let a = SmallXXHash4::splat(SmallXXHash::seed(1));
        let b = SmallXXHash4::splat(SmallXXHash::seed(2));
        let mixed = a.select(b, BVec4::new(true, false, true, false));
        assert_eq!(mixed.lane(0), a.lane(0));
        assert_eq!(mixed.lane(1), b.lane(1));
    }
}
