#![allow(dead_code)]

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat as Codec, Rgb, RgbImage};
use image_compressor_lib::{FileInput, ImagePayload};

/// Smooth, photo-like content: gradients plus low-frequency waves.
pub fn photo(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let wave = ((fx * 9.0).sin() * (fy * 7.0).cos() * 40.0) as i32;
        let r = (fx * 200.0) as i32 + wave;
        let g = (fy * 180.0) as i32 - wave / 2;
        let b = ((fx + fy) * 90.0) as i32 + wave;
        Rgb([r.clamp(0, 255) as u8, g.clamp(0, 255) as u8, b.clamp(0, 255) as u8])
    })
}

/// Deterministic pseudo-random pixels; compresses terribly at high quality.
pub fn noise(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x9E37_79B9;
    RgbImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [a, b, c, _] = state.to_le_bytes();
        Rgb([a, b, c])
    })
}

pub fn jpeg_bytes(img: &RgbImage, quality: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    encode_with(img, Codec::Png)
}

pub fn gif_bytes(img: &RgbImage) -> Vec<u8> {
    let rgba = DynamicImage::ImageRgb8(img.clone()).to_rgba8();
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut bytes), Codec::Gif)
        .unwrap();
    bytes
}

pub fn webp_bytes(img: &RgbImage, quality: f32) -> Vec<u8> {
    let rgba = DynamicImage::ImageRgb8(img.clone()).to_rgba8();
    webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode_simple(false, quality)
        .unwrap()
        .to_vec()
}

fn encode_with(img: &RgbImage, codec: Codec) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), codec).unwrap();
    bytes
}

pub fn payload(bytes: Vec<u8>, mime_type: &str) -> ImagePayload {
    ImagePayload::new(bytes, mime_type)
}

pub fn file(name: &str, mime_type: &str, bytes: Vec<u8>) -> FileInput {
    FileInput {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        bytes,
    }
}

/// A high-quality JPEG photo; every tier can shrink it.
pub fn photo_jpeg_file() -> FileInput {
    file("photo.jpg", "image/jpeg", jpeg_bytes(&photo(96, 64), 100))
}
