//! # 隐写编解码模块
//!
//! 负责构建/解析容器头部、字节与 bit 之间的序列化、容量检查，
//! 以及在通道字节序列上执行嵌入与提取。本模块不做任何 I/O 或日志。

use crate::constants::{BITS_PER_BYTE, FLAG_CIPHER, HEADER_SIZE, MAGIC, NONCE_LEN};
use crate::error::{Result, StegoError};
use crate::keystream::xor_transform;
use rand::RngCore;

/// 嵌入在图像 LSB 中的容器头部。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub cipher: bool,
    pub payload_len: u32,
    pub nonce: [u8; NONCE_LEN],
}

impl Header {
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4] = if self.cipher { FLAG_CIPHER } else { 0 };
        buf[5..9].copy_from_slice(&self.payload_len.to_be_bytes());
        buf[9..HEADER_SIZE].copy_from_slice(&self.nonce);
        buf
    }

    /// 解析头部。魔数不匹配时返回 [`StegoError::NoPayload`]，
    /// 标志字节中的保留位被忽略。
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self> {
        if buf[0..4] != MAGIC {
            return Err(StegoError::NoPayload);
        }

        let mut len = [0u8; 4];
        len.copy_from_slice(&buf[5..9]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&buf[9..HEADER_SIZE]);

        Ok(Self {
            cipher: buf[4] & FLAG_CIPHER != 0,
            payload_len: u32::from_be_bytes(len),
            nonce,
        })
    }
}

/// 通道字节序列可提供的 LSB 槽位数。
pub fn capacity_bits(channel_len: usize) -> usize {
    channel_len
}

/// 嵌入 `payload_len` 字节的载荷 (含头部) 所需的 bit 数。
pub fn required_bits(payload_len: usize) -> usize {
    HEADER_SIZE.saturating_add(payload_len).saturating_mul(BITS_PER_BYTE)
}

/// 给定通道字节数时可容纳的最大载荷字节数。
pub fn max_payload_len(channel_len: usize) -> usize {
    (capacity_bits(channel_len) / BITS_PER_BYTE).saturating_sub(HEADER_SIZE)
}

/// 将 `data` 按大端顺序 (每字节先写最高位) 写入 `pix` 从 `start` 开始的 LSB。
///
/// 调用方必须保证 `start + data.len() * 8 <= pix.len()`。
fn write_bits(pix: &mut [u8], start: usize, data: &[u8]) {
    for i in 0..data.len() * BITS_PER_BYTE {
        let bit = (data[i / 8] >> (7 - i % 8)) & 1;
        let slot = &mut pix[start + i];
        *slot = (*slot & 0xFE) | bit;
    }
}

/// 从 `pix` 的 `start` 处读取 `out.len() * 8` 个 LSB，按大端顺序组装成字节。
///
/// 调用方必须保证读取范围不越界。
fn read_bits(pix: &[u8], start: usize, out: &mut [u8]) {
    out.fill(0);
    for i in 0..out.len() * BITS_PER_BYTE {
        out[i / 8] |= (pix[start + i] & 1) << (7 - i % 8);
    }
}

/// 将 `payload` 嵌入 `pix` 并返回修改后的通道字节序列。
///
/// 密码非空时，载荷先与由密码和新生成的 nonce 派生的密钥流异或。
/// 只修改前 `bit_count` 个字节的最低位，其余位与字节保持不变。
///
/// # Errors
///
/// 若容量不足，在修改任何数据之前返回 [`StegoError::Capacity`]。
pub fn embed(mut pix: Vec<u8>, payload: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let available = capacity_bits(pix.len());
    let required = required_bits(payload.len());
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| StegoError::Capacity { required, available })?;

    if required > available {
        return Err(StegoError::Capacity { required, available });
    }

    let cipher = !password.is_empty();
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);

    let encoded = if cipher {
        xor_transform(payload, password, nonce)
    } else {
        payload.to_vec()
    };

    let header = Header {
        cipher,
        payload_len,
        nonce,
    };

    write_bits(&mut pix, 0, &header.to_bytes());
    write_bits(&mut pix, HEADER_SIZE * BITS_PER_BYTE, &encoded);

    Ok(pix)
}

/// 只读取并解析头部。
///
/// 数据不足以容纳头部时同样视为没有隐藏数据。
pub fn read_header(pix: &[u8]) -> Result<Header> {
    if pix.len() < HEADER_SIZE * BITS_PER_BYTE {
        return Err(StegoError::NoPayload);
    }

    let mut buf = [0u8; HEADER_SIZE];
    read_bits(pix, 0, &mut buf);
    Header::from_bytes(&buf)
}

/// 从通道字节序列中提取载荷。
///
/// 密码错误不会报错：返回的是声明长度的错误字节，因为格式本身不含完整性校验。
///
/// # Errors
///
/// * [`StegoError::NoPayload`] - 魔数不匹配。
/// * [`StegoError::Truncated`] - 声明的长度超出了数据末尾，在读取之前检测。
pub fn extract(pix: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let header = read_header(pix)?;

    let payload_len = header.payload_len as usize;
    let required = required_bits(payload_len);
    let available = capacity_bits(pix.len());
    if required > available {
        return Err(StegoError::Truncated { required, available });
    }

    let mut encoded = vec![0u8; payload_len];
    read_bits(pix, HEADER_SIZE * BITS_PER_BYTE, &mut encoded);

    Ok(if header.cipher {
        xor_transform(&encoded, password, header.nonce)
    } else {
        encoded
    })
}
