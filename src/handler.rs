//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_IMAGE_EXT, DEFAULT_TEXT_EXT, HIDDEN_PREFIX, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::image_io::{load_rgba, lossless_format, save_rgba};
use crate::steganography::{capacity_bits, embed, extract, max_payload_len, required_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 恢复内容为文本时，调试日志中预览的最大字符数。
const PREVIEW_CHARS: usize = 64;

/// 将 `payload` 隐藏到 `cover_path` 图像中，并把结果写入 `out_path`。
///
/// # Errors
///
/// * `out_path` 不是无损图像格式。
/// * 无法读取载体图像或写入输出图像。
/// * 图像没有足够的空间容纳头部和载荷，底层错误为 [`StegoError::Capacity`]。
pub fn hide(cover_path: &Path, out_path: &Path, payload: &[u8], password: &str) -> Result<()> {
    lossless_format(out_path)?;

    let mut cover = load_rgba(cover_path)?;

    let required = required_bits(payload.len());
    let available = capacity_bits(cover.pixels.len());
    log::debug!(
        "payload {} bytes, need {} bits, have {} bits, cipher {}",
        payload.len(),
        required,
        available,
        !password.is_empty()
    );

    cover.pixels = embed(cover.pixels, payload, password.as_bytes()).map_err(|err| {
        let message = match &err {
            StegoError::Capacity {
                required,
                available,
            } => format!(
                "Not enough space in the image to hide the data. \nRequired: {} bits, Available: {} bits",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            ),
            _ => format!(
                "Failed to embed the payload into '{}'.",
                cover_path.to_string_lossy().red().bold()
            ),
        };
        anyhow::Error::new(err).context(message)
    })?;

    save_rgba(out_path, cover)
}

/// 从 `stego_path` 图像中恢复隐藏的数据。
///
/// 密码错误时不会报错，而是返回与声明长度相同的错误数据。
///
/// # Errors
///
/// * 无法读取图像文件。
/// * 图像中没有隐藏数据，或声明的长度超出了图像数据范围。
pub fn reveal(stego_path: &Path, password: &str) -> Result<Vec<u8>> {
    let stego = load_rgba(stego_path)?;

    let payload = extract(&stego.pixels, password.as_bytes()).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            stego_path.to_string_lossy().red().bold()
        )
    })?;

    log::debug!("recovered {} bytes", payload.len());
    Ok(payload)
}

/// 在 `source` 同目录下生成 `<prefix><名称>.<ext>` 形式的默认路径。
fn default_path(source: &Path, prefix: &str, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{prefix}{stem}.{ext}"))
}

/// 除非指定了 `force`，否则拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 恢复内容是合法 UTF-8 时，在调试日志中输出开头的一小段。
fn log_preview(payload: &[u8]) {
    if let Ok(text) = std::str::from_utf8(payload) {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        log::debug!("preview: {preview:?}");
    }
}

/// 将恢复的数据原样写入 `out` (通常是标准输出) 并刷新。
pub fn write_payload(mut out: impl Write, payload: &[u8]) -> Result<()> {
    out.write_all(payload)
        .context("Unable to write recovered data to standard output.")?;
    out.flush()?;
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载荷 (文件或命令行文本)、确定输出路径并检查覆盖保护，
/// 然后调用 [`hide`] 完成嵌入。
///
/// # Errors
///
/// 除 [`hide`] 的错误外，还包括：
/// * 无法读取载荷文件。
/// * 输出文件已存在且未指定 `--force`。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let payload = match (&args.text, args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read payload file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.into_bytes(),
        (None, None) => anyhow::bail!("Nothing to hide: provide --text or --message."),
    };

    let dest = args
        .dest
        .unwrap_or_else(|| default_path(&args.image, HIDDEN_PREFIX, DEFAULT_IMAGE_EXT));
    ensure_writable(&dest, args.force)?;

    let password = args.password.unwrap_or_default();
    hide(&args.image, &dest, &payload, &password)?;

    println!(
        "The data has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责调用 [`reveal`] 取得隐藏数据，并将其写入目标文件或标准输出。
///
/// # Errors
///
/// 除 [`reveal`] 的错误外，还包括：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入输出文件或标准输出。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let password = args.password.unwrap_or_default();

    if args.stdout {
        let payload = reveal(&args.image, &password)?;
        log_preview(&payload);
        return write_payload(io::stdout().lock(), &payload);
    }

    let target = args
        .text
        .unwrap_or_else(|| default_path(&args.image, RECOVERED_PREFIX, DEFAULT_TEXT_EXT));
    ensure_writable(&target, args.force)?;

    let payload = reveal(&args.image, &password)?;
    log_preview(&payload);

    fs::write(&target, payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            target.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully recovered and saved: {}",
        target.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 无法读取图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let cover = load_rgba(&args.image)?;

    let slots = capacity_bits(cover.pixels.len());
    let max_bytes = max_payload_len(cover.pixels.len());

    println!(
        "{} ({}x{}): {} LSB slots, up to {} bytes of payload",
        args.image.to_string_lossy().bold(),
        cover.width,
        cover.height,
        slots.to_string().green().bold(),
        max_bytes.to_string().green().bold()
    );

    Ok(())
}
