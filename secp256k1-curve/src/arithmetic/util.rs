//! Test helpers converting between big-endian byte strings and `BigUint`.

use num_bigint::BigUint;

/// Converts a big-endian byte array to `BigUint`.
pub fn bytes_to_biguint(bytes: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Converts a `BigUint` below 2²⁵⁶ to a big-endian byte array.
pub fn biguint_to_bytes(x: &BigUint) -> [u8; 32] {
    let be = x.to_bytes_be();
    assert!(be.len() <= 32, "integer does not fit in 32 bytes");
    let mut bytes = [0u8; 32];
    bytes[32 - be.len()..].copy_from_slice(&be);
    bytes
}

/// secp256k1 base field modulus `p`.
pub fn field_modulus() -> BigUint {
    (BigUint::from(1u8) << 256) - (BigUint::from(1u8) << 32) - BigUint::from(977u16)
}

/// secp256k1 group order `n`.
pub fn group_order() -> BigUint {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        16,
    )
    .unwrap()
}
