//! # 错误类型模块
//!
//! 隐写编解码器返回的所有错误。这些都是确定性的、不可重试的条件，
//! 由调用方负责向用户展示。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 头部加载荷所需的 bit 数超过了图像可用的 LSB 槽位。
    #[error("Payload too large: need {required} bits, have {available}")]
    Capacity { required: usize, available: usize },

    /// 头部魔数不匹配，图像中没有可识别的隐藏数据。
    #[error("No payload found (bad magic)")]
    NoPayload,

    /// 头部声明的载荷长度超出了图像数据的末尾。
    #[error("Declared payload is truncated: need {required} bits, have {available}")]
    Truncated { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, StegoError>;
