/// Sub-pixel grid dimension for stratified sampling: GRID x GRID samples
/// per pixel.
pub const GRID: usize = 4;

const GROUPS: usize = 64;
const SEED: u64 = 0x5eed;

/// Fixed table of intra-pixel sample offsets with a wrapping cursor.
///
/// The driver draws two offsets (x then y) per sub-sample; the cursor keeps
/// advancing across pixels so the pattern varies spatially but a render is
/// bit-identical run to run. A live RNG would not be.
pub struct JitterTable {
    values: Vec<f32>,
    cursor: usize,
}

impl JitterTable {
    /// Offsets jittered within a GRID x GRID stratification of the pixel,
    /// generated once from a seeded generator.
    pub fn stratified() -> Self {
        let mut rng = fastrand::Rng::with_seed(SEED);
        let mut values = Vec::with_capacity(GROUPS * GRID * GRID * 2);
        for _ in 0..GROUPS {
            for j in 0..GRID {
                for i in 0..GRID {
                    values.push((i as f32 + rng.f32()) / GRID as f32);
                    values.push((j as f32 + rng.f32()) / GRID as f32);
                }
            }
        }
        JitterTable { values, cursor: 0 }
    }

    /// Every offset at the pixel center. Sampling through this table
    /// reproduces the unsampled render exactly.
    pub fn centered() -> Self {
        JitterTable {
            values: vec![0.5; GRID * GRID * 2],
            cursor: 0,
        }
    }

    pub fn next(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
