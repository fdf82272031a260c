use lsb_vault::StegoError;
use lsb_vault::constants::{FLAG_CIPHER, HEADER_SIZE, MAGIC};
use lsb_vault::steganography::{
    Header, embed, extract, max_payload_len, read_header, required_bits,
};
use proptest::prelude::*;
use rand::RngCore;

fn random_cover(len: usize) -> Vec<u8> {
    let mut cover = vec![0u8; len];
    rand::rng().fill_bytes(&mut cover);
    cover
}

/// 10000 个零字节、载荷 "hi" 的具体场景
#[test]
fn test_hi_scenario_without_password() -> anyhow::Result<()> {
    let cover = vec![0u8; 10_000];
    assert_eq!(required_bits(2), 152);

    let stego = embed(cover, b"hi", b"")?;
    let header = read_header(&stego)?;
    assert!(!header.cipher);
    assert_eq!(header.payload_len, 2);

    assert_eq!(extract(&stego, b"")?, b"hi");
    Ok(())
}

#[test]
fn test_hi_scenario_with_password() -> anyhow::Result<()> {
    let stego = embed(vec![0u8; 10_000], b"hi", b"secret")?;

    // flags 字节位于第 32..40 个 LSB
    let flags = stego[32..40].iter().fold(0u8, |acc, b| (acc << 1) | (b & 1));
    assert_eq!(flags & FLAG_CIPHER, FLAG_CIPHER);
    assert!(read_header(&stego)?.cipher);

    assert_eq!(extract(&stego, b"secret")?, b"hi");

    let wrong = extract(&stego, b"wrong")?;
    assert_eq!(wrong.len(), 2);
    assert_ne!(wrong, b"hi");
    Ok(())
}

#[test]
fn test_wrong_or_empty_password_yields_garbage_not_error() -> anyhow::Result<()> {
    let payload = b"a reasonably long message so collisions are impossible in practice";
    let stego = embed(random_cover(4096), payload, b"pw1")?;

    let wrong = extract(&stego, b"pw2")?;
    assert_eq!(wrong.len(), payload.len());
    assert_ne!(wrong.as_slice(), payload.as_slice());

    let empty = extract(&stego, b"")?;
    assert_eq!(empty.len(), payload.len());
    assert_ne!(empty.as_slice(), payload.as_slice());
    Ok(())
}

#[test]
fn test_capacity_boundary() {
    let n = 10;
    let exact = (HEADER_SIZE + n) * 8;

    let payload = vec![0xA5u8; n];
    assert!(embed(vec![0u8; exact], &payload, b"").is_ok());

    let too_big = vec![0xA5u8; n + 1];
    assert_eq!(
        embed(vec![0u8; exact], &too_big, b""),
        Err(StegoError::Capacity {
            required: exact + 8,
            available: exact,
        })
    );

    assert_eq!(max_payload_len(exact), n);
    assert_eq!(max_payload_len(0), 0);
}

#[test]
fn test_empty_payload_needs_only_header() -> anyhow::Result<()> {
    let stego = embed(vec![0xFFu8; HEADER_SIZE * 8], b"", b"secret")?;
    assert!(extract(&stego, b"secret")?.is_empty());
    Ok(())
}

/// 只修改前 bit_count 个字节的最低位
#[test]
fn test_high_bits_untouched() -> anyhow::Result<()> {
    let cover = random_cover(2048);
    let payload = b"only the lowest bit may change";
    let bit_count = required_bits(payload.len());

    let stego = embed(cover.clone(), payload, b"key")?;
    assert_eq!(stego.len(), cover.len());

    for (i, (&before, &after)) in cover.iter().zip(&stego).enumerate() {
        if i < bit_count {
            assert_eq!(before & 0xFE, after & 0xFE, "high bits changed at {i}");
        } else {
            assert_eq!(before, after, "byte beyond the container changed at {i}");
        }
    }
    Ok(())
}

#[test]
fn test_rejects_buffer_without_container() {
    assert_eq!(extract(&vec![0u8; 1000], b""), Err(StegoError::NoPayload));
    assert_eq!(extract(&vec![1u8; 1000], b""), Err(StegoError::NoPayload));
    // 不足以容纳头部
    assert_eq!(extract(&[0u8; 10], b""), Err(StegoError::NoPayload));
}

/// 声明长度超出数据末尾时，在读取之前报错
#[test]
fn test_truncated_length_is_detected() -> anyhow::Result<()> {
    let stego = embed(vec![0u8; 10_000], b"hi", b"")?;
    let cut = &stego[..(HEADER_SIZE + 1) * 8];
    assert_eq!(
        extract(cut, b""),
        Err(StegoError::Truncated {
            required: (HEADER_SIZE + 2) * 8,
            available: (HEADER_SIZE + 1) * 8,
        })
    );

    // 伪造一个声明了最大长度的头部
    let forged = Header {
        cipher: false,
        payload_len: u32::MAX,
        nonce: [7; 8],
    };
    let mut pix = vec![0u8; 4096];
    for (i, slot) in pix.iter_mut().take(HEADER_SIZE * 8).enumerate() {
        *slot = (forged.to_bytes()[i / 8] >> (7 - i % 8)) & 1;
    }
    assert!(matches!(
        extract(&pix, b""),
        Err(StegoError::Truncated { .. })
    ));
    Ok(())
}

#[test]
fn test_header_layout_and_reserved_bits() -> anyhow::Result<()> {
    let header = Header {
        cipher: true,
        payload_len: 0x0102_0304,
        nonce: [9, 8, 7, 6, 5, 4, 3, 2],
    };
    let mut bytes = header.to_bytes();
    assert_eq!(&bytes[0..4], &MAGIC);
    assert_eq!(bytes[4], 0x01);
    assert_eq!(&bytes[5..9], &[1, 2, 3, 4]);
    assert_eq!(&bytes[9..], &[9, 8, 7, 6, 5, 4, 3, 2]);

    // 保留位在读取时被忽略
    bytes[4] = 0xFE;
    let parsed = Header::from_bytes(&bytes)?;
    assert!(!parsed.cipher);
    assert_eq!(parsed.payload_len, header.payload_len);

    bytes[0] = b'X';
    assert_eq!(Header::from_bytes(&bytes), Err(StegoError::NoPayload));
    Ok(())
}

#[test]
fn test_nonce_is_fresh_per_embed() -> anyhow::Result<()> {
    let a = read_header(&embed(vec![0u8; 1024], b"x", b"pw")?)?;
    let b = read_header(&embed(vec![0u8; 1024], b"x", b"pw")?)?;
    assert_ne!(a.nonce, b.nonce);
    Ok(())
}

proptest! {
    #[test]
    fn prop_round_trip_without_password(
        payload in proptest::collection::vec(any::<u8>(), 0..512),
        slack in 0usize..64,
    ) {
        let cover = random_cover(required_bits(payload.len()) + slack);
        let stego = embed(cover, &payload, b"").unwrap();
        prop_assert_eq!(extract(&stego, b"").unwrap(), payload);
    }

    #[test]
    fn prop_round_trip_with_password(
        payload in proptest::collection::vec(any::<u8>(), 0..512),
        password in "[a-zA-Z0-9]{1,24}",
    ) {
        let cover = random_cover(required_bits(payload.len()));
        let stego = embed(cover, &payload, password.as_bytes()).unwrap();
        prop_assert_eq!(extract(&stego, password.as_bytes()).unwrap(), payload);
    }
}
