//! MurmurHash2 哈希
//!
//! 节点的缓存哈希值（符号的规范名哈希、标量子查询的命令哈希）都通过这里计算，
//! 保证同一进程内对同一结构总是得到同一个值，与 `std` 的随机种子无关。

use std::hash::{Hash, Hasher};

const M: u32 = 0x5bd1e995;
const R: u8 = 24;

/// 计算字节序列的 MurmurHash2
pub fn murmurhash2(data: &[u8], seed: u32) -> u32 {
    let mut h: u32 = seed ^ (data.len() as u32);
    let mut pos = 0;

    while pos + 4 <= data.len() {
        let mut k = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h = h.wrapping_mul(M) ^ k;
        pos += 4;
    }

    let remaining = data.len() - pos;
    if remaining >= 3 {
        h ^= (data[pos + 2] as u32) << 16;
    }
    if remaining >= 2 {
        h ^= (data[pos + 1] as u32) << 8;
    }
    if remaining >= 1 {
        h ^= data[pos] as u32;
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^ (h >> 15)
}

/// 计算字符串的 MurmurHash2
pub fn murmurhash2_str(s: &str, seed: u32) -> u32 {
    murmurhash2(s.as_bytes(), seed)
}

/// 计算任意可哈希值的哈希码
///
/// 用于需要缓存哈希值的节点：缓存的是这个函数的结果，
/// `Hash` 实现只把缓存值写入外部 hasher。
pub fn hash_code<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = MurmurHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// 基于 MurmurHash2 的 Hasher
#[derive(Debug)]
pub struct MurmurHasher {
    seed: u32,
    buffer: Vec<u8>,
}

impl MurmurHasher {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u32) -> Self {
        MurmurHasher {
            seed,
            buffer: Vec::new(),
        }
    }
}

impl Default for MurmurHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for MurmurHasher {
    fn finish(&self) -> u64 {
        murmurhash2(&self.buffer, self.seed) as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn write_u8(&mut self, i: u8) {
        self.buffer.push(i);
    }

    fn write_u32(&mut self, i: u32) {
        self.buffer.extend_from_slice(&i.to_le_bytes());
    }

    fn write_u64(&mut self, i: u64) {
        self.buffer.extend_from_slice(&i.to_le_bytes());
    }

    fn write_usize(&mut self, i: usize) {
        self.buffer.extend_from_slice(&(i as u64).to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_murmurhash2_consistency() {
        let data = b"PM1.G1";
        assert_eq!(murmurhash2(data, 42), murmurhash2(data, 42));
    }

    #[test]
    fn test_murmurhash2_different_inputs() {
        assert_ne!(murmurhash2(b"PM1.G1", 0), murmurhash2(b"PM1.G2", 0));
    }

    #[test]
    fn test_murmurhash2_str() {
        assert_eq!(murmurhash2(b"E1", 7), murmurhash2_str("E1", 7));
    }

    #[test]
    fn test_hash_code_is_stable() {
        // 同一结构两次计算得到同一个哈希码
        let left = hash_code(&("T", 1u32));
        let right = hash_code(&("T", 1u32));
        assert_eq!(left, right);
        assert_ne!(left, hash_code(&("T", 2u32)));
    }
}
