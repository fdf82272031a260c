//! # 密钥流模块
//!
//! 由密码和 nonce 派生出无限长的确定性伪随机字节流，仅用于 XOR 掩码。
//! 第 n 个块为 `SHA-256(password || nonce || n)`，其中 n 为 8 字节大端计数器。

use crate::constants::{KEYSTREAM_BLOCK_LEN, NONCE_LEN};
use sha2::{Digest, Sha256};

/// 拉取式的密钥流生成器。
///
/// 只能从头开始：若要重放同一段密钥流，需用相同的输入重新构造。
#[derive(Debug, Clone)]
pub struct Keystream {
    password: Vec<u8>,
    nonce: [u8; NONCE_LEN],
    counter: u64,
    block: [u8; KEYSTREAM_BLOCK_LEN],
    pos: usize,
}

impl Keystream {
    pub fn new(password: &[u8], nonce: [u8; NONCE_LEN]) -> Self {
        Self {
            password: password.to_vec(),
            nonce,
            counter: 0,
            block: [0; KEYSTREAM_BLOCK_LEN],
            // 首次调用 next() 时触发生成第一个块
            pos: KEYSTREAM_BLOCK_LEN,
        }
    }

    /// 计算当前计数器对应的摘要块，然后递增计数器。
    pub fn next_block(&mut self) -> [u8; KEYSTREAM_BLOCK_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(&self.password);
        hasher.update(self.nonce);
        hasher.update(self.counter.to_be_bytes());
        self.counter = self.counter.wrapping_add(1);
        hasher.finalize().into()
    }
}

impl Iterator for Keystream {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == KEYSTREAM_BLOCK_LEN {
            self.block = self.next_block();
            self.pos = 0;
        }

        let byte = self.block[self.pos];
        self.pos += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// 将 `data` 与密钥流逐字节异或。
///
/// 密码为空时原样返回 `data`，即使提供了 nonce。
/// 对同一组 (password, nonce) 调用两次会还原原始数据。
pub fn xor_transform(data: &[u8], password: &[u8], nonce: [u8; NONCE_LEN]) -> Vec<u8> {
    if password.is_empty() {
        return data.to_vec();
    }

    data.iter()
        .zip(Keystream::new(password, nonce))
        .map(|(&byte, key)| byte ^ key)
        .collect()
}
