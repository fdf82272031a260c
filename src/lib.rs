//! # lsb_vault 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容器格式、密钥流以及图像读写。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod keystream;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{embed, extract};
