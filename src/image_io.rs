//! # 图像读写模块
//!
//! 在图像文件与扁平的 RGBA 通道字节序列之间转换。
//! 输出只允许无损格式，否则隐藏的 bit 会在编码时被破坏。

use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// 解码后的载体图像：按 "像素-通道" 顺序排列的 RGBA 字节及其尺寸。
#[derive(Debug, Clone)]
pub struct Cover {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// 允许作为隐写输出的无损格式。
const LOSSLESS_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// 读取图像并转换为 RGBA8。
pub fn load_rgba(path: &Path) -> Result<Cover> {
    let img = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    log::debug!("decoded {}x{} image from {}", width, height, path.display());

    Ok(Cover {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// 根据扩展名确定输出格式，拒绝有损或不支持的格式。
pub fn lossless_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Cannot determine image format from: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_FORMATS.contains(&format),
        "Output format {:?} is not lossless and would destroy the hidden data. \nUse one of: png, bmp, tiff, webp, qoi",
        format
    );

    Ok(format)
}

/// 将 RGBA8 字节按给定尺寸编码并写入 `path`。
pub fn save_rgba(path: &Path, cover: Cover) -> Result<()> {
    let format = lossless_format(path)?;

    let img = RgbaImage::from_raw(cover.width, cover.height, cover.pixels)
        .context("Pixel buffer does not match the image dimensions.")?;

    img.save_with_format(path, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    log::debug!("encoded {:?} image to {}", format, path.display());
    Ok(())
}
