/// 容器头部的魔数。
/// 提取时头部前 4 字节不等于此值即视为图像中没有隐藏数据。
pub const MAGIC: [u8; 4] = *b"ISTJ";

/// 标志字节中表示"已启用密钥流加密"的位。
pub const FLAG_CIPHER: u8 = 0x01;

/// 随机数 (nonce) 的字节数。
pub const NONCE_LEN: usize = 8;

/// 容器头部的固定大小 (字节)：magic 4 + flags 1 + 长度 4 + nonce 8。
pub const HEADER_SIZE: usize = MAGIC.len() + 1 + 4 + NONCE_LEN;

/// 每个通道字节只承载 1 bit (最低有效位)。
pub const BITS_PER_BYTE: usize = 8;

/// SHA-256 摘要长度，即密钥流每个块的字节数。
pub const KEYSTREAM_BLOCK_LEN: usize = 32;

/// 未指定输出图像路径时，默认文件名的前缀。
pub const HIDDEN_PREFIX: &str = "doctored_";

/// 未指定恢复输出路径时，默认文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 未指定输出图像路径时使用的扩展名。
/// 载体图像可能是有损格式，因此默认始终输出 PNG。
pub const DEFAULT_IMAGE_EXT: &str = "png";

/// 未指定恢复输出路径时使用的扩展名。
pub const DEFAULT_TEXT_EXT: &str = "txt";
