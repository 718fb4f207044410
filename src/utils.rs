use num::bigint::{BigInt, BigUint, Sign};

pub fn new_bigint(i: i64) -> BigInt {
    BigInt::from(i)
}

// 大端字节序，结果始终为非负数
pub fn bigint_from_be_bytes(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

pub fn biguint_from_be_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
