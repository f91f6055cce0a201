use std::path::Path;

use bytemuck::cast_slice;
use image::{imageops, ImageResult, RgbaImage};
use nalgebra::Vector4;

// 0~1 범위의 색을 ABGR로 묶음. 리틀 엔디안에서 바이트 순서는 R, G, B, A
pub fn vec4_to_rgba(color: &Vector4<f32>) -> u32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0) as u32;

    (channel(color.w) << 24) | (channel(color.z) << 16) | (channel(color.y) << 8) | channel(color.x)
}

// 화면에 띄우는 쪽에 넘겨줄 최종 결과. 매 프레임 통째로 덮어씀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl OutputImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.data)
    }

    // 0번 줄이 화면 아래쪽이라 파일로 내보낼 때는 위아래를 뒤집음
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes = self
            .data
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect::<Vec<u8>>();

        let mut image = RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height));
        imageops::flip_vertical_in_place(&mut image);
        image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_rgba_image().save(path)
    }
}
