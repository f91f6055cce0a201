use nalgebra::{Unit, Vector3};
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Error, Rng, RngCore};
use std::ops::RangeBounds;

// 픽셀마다, 프레임마다 독립적인 난수열.
// 스레드끼리 공유하는 상태가 없으니 병렬 실행 순서와 상관 없이 결과가 같음
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcgHash {
    state: u32,
}

impl PcgHash {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

pub fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747796405).wrapping_add(2891336453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277803737);
    (word >> 22) ^ word
}

// (x + y * width) * frame_index
// frame_index가 1부터 시작하니 0번 픽셀을 빼면 프레임마다 시드가 달라짐
pub fn pixel_seed(x: u32, y: u32, width: u32, frame_index: u32) -> u32 {
    x.wrapping_add(y.wrapping_mul(width))
        .wrapping_mul(frame_index)
}

impl RngCore for PcgHash {
    fn next_u32(&mut self) -> u32 {
        self.state = pcg_hash(self.state);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32() as u64;
        let high = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

pub fn random_vec<T, R, G>(rng: &mut G, range: R) -> Vector3<T>
where
    T: SampleUniform,
    R: RangeBounds<T> + SampleRange<T> + Clone,
    G: Rng + ?Sized,
{
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

// 반구로 제한하지 않음. 법선에 더해서 쓰는 용도
pub fn random_in_unit_sphere<G: Rng + ?Sized>(rng: &mut G) -> Unit<Vector3<f32>> {
    Unit::try_new(random_vec(rng, -1.0f32..1.0), f32::EPSILON).unwrap_or_else(Vector3::y_axis)
}
