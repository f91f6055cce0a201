use nalgebra::Vector4;

// 픽셀마다 지금까지 나온 샘플의 합. frame_index로 나누면 평균
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    samples: Vec<Vector4<f32>>,
    frame_index: u32,
}

impl AccumulationBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![Vector4::zeros(); width as usize * height as usize],
            frame_index: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn samples(&self) -> &[Vector4<f32>] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [Vector4<f32>] {
        &mut self.samples
    }

    pub fn sample(&self, x: u32, y: u32) -> Vector4<f32> {
        self.samples[y as usize * self.width as usize + x as usize]
    }

    pub fn reset(&mut self) {
        self.frame_index = 1;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.samples.fill(Vector4::zeros());
    }

    // 첫 프레임이면 이전에 쌓인 값을 버림
    pub fn begin_frame(&mut self) {
        if self.frame_index == 1 {
            self.clear();
        }
    }

    pub fn end_frame(&mut self, accumulate: bool) {
        if accumulate {
            self.frame_index += 1;
        } else {
            self.frame_index = 1;
        }
    }
}
