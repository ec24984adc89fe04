use num_bigint::BigUint;

use crate::constants::{COMPACT_FLAG_BASE, COMPACT_FLAG_COMPRESSED, COMPACT_SIGNATURE_SIZE};
use crate::errors::EcError;
use crate::signatures::{CompactSignature, checked_bytes32};

/// 65-byte recoverable encoding: flag byte, then 32-byte `r` and `s`.
pub struct CompactSignatureSerializer;

impl CompactSignatureSerializer {
    pub fn serialize(signature: &CompactSignature) -> Result<[u8; COMPACT_SIGNATURE_SIZE], EcError> {
        let mut out = [0u8; COMPACT_SIGNATURE_SIZE];
        out[0] = signature.flag();
        out[1..33].copy_from_slice(&checked_bytes32(signature.r())?);
        out[33..].copy_from_slice(&checked_bytes32(signature.s())?);
        Ok(out)
    }

    pub fn parse(bytes: &[u8]) -> Result<CompactSignature, EcError> {
        if bytes.len() != COMPACT_SIGNATURE_SIZE {
            return Err(EcError::InvalidLength {
                expected: COMPACT_SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }

        let flag = bytes[0];
        let max_flag = COMPACT_FLAG_BASE + COMPACT_FLAG_COMPRESSED + 3;
        if !(COMPACT_FLAG_BASE..=max_flag).contains(&flag) {
            return Err(EcError::InvalidCompactFlag(flag));
        }

        let mut recovery_id = flag - COMPACT_FLAG_BASE;
        let compressed = recovery_id >= COMPACT_FLAG_COMPRESSED;
        if compressed {
            recovery_id -= COMPACT_FLAG_COMPRESSED;
        }

        CompactSignature::new(
            BigUint::from_bytes_be(&bytes[1..33]),
            BigUint::from_bytes_be(&bytes[33..]),
            recovery_id,
            compressed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_decoding() {
        let mut bytes = [0u8; 65];
        bytes[32] = 1;
        bytes[64] = 2;
        for flag in 27u8..=34 {
            bytes[0] = flag;
            let sig = CompactSignatureSerializer::parse(&bytes).unwrap();
            assert_eq!(sig.recovery_id(), (flag - 27) % 4);
            assert_eq!(sig.is_compressed(), flag >= 31);
            assert_eq!(sig.r(), &BigUint::from(1u8));
            assert_eq!(sig.s(), &BigUint::from(2u8));
            assert_eq!(CompactSignatureSerializer::serialize(&sig).unwrap(), bytes);
        }
    }

    #[test]
    fn test_rejects_bad_flag_and_length() {
        let mut bytes = [0u8; 65];
        for flag in [0u8, 26, 35, 255] {
            bytes[0] = flag;
            assert_eq!(
                CompactSignatureSerializer::parse(&bytes),
                Err(EcError::InvalidCompactFlag(flag))
            );
        }
        assert_eq!(
            CompactSignatureSerializer::parse(&bytes[..64]),
            Err(EcError::InvalidLength { expected: 65, actual: 64 })
        );
    }

    #[test]
    fn test_serialize_rejects_wide_element() {
        let wide = (BigUint::from(1u8) << 256u32) + 5u8;
        let sig = CompactSignature::new(wide, BigUint::from(2u8), 1, true).unwrap();
        assert_eq!(CompactSignatureSerializer::serialize(&sig), Err(EcError::ElementTooLarge));
    }
}
