/// Deterministic xoshiro-style 64-bit generator, usable in `const` context.
/// The fixed seeding makes every table built from it identical across runs,
/// which the Zobrist scheme depends on.
pub struct PRNG {
    s: (u64, u64, u64, u64),
}

impl PRNG {
    pub const fn new(seed: u64) -> Self {
        let s0 = seed;
        let s1 = seed.wrapping_mul(2);
        let s2 = seed.wrapping_div(5);
        let s3 = seed.wrapping_add(seed.wrapping_div(2));

        PRNG {
            s: (s0, s1, s2, s3),
        }
    }

    #[inline]
    pub const fn random_u64(&mut self) -> u64 {
        let t = self.s.1 << 17;
        self.s.2 ^= self.s.0;
        self.s.3 ^= self.s.1;
        self.s.1 ^= self.s.2;
        self.s.0 ^= self.s.3;
        self.s.2 ^= t;
        self.s.3 = self.s.3.rotate_left(45);

        self.s.0
    }
}

impl Default for PRNG {
    fn default() -> Self {
        PRNG::new(0x6B51FF299F6A3AEE)
    }
}
