use num_bigint::BigUint;

use crate::constants::SCHNORR_SIGNATURE_SIZE;
use crate::errors::EcError;
use crate::signatures::{SchnorrSignature, checked_bytes32};

/// Raw 64-byte `r || s`.
pub struct SchnorrSignatureSerializer;

impl SchnorrSignatureSerializer {
    pub fn serialize(signature: &SchnorrSignature) -> Result<[u8; SCHNORR_SIGNATURE_SIZE], EcError> {
        let mut out = [0u8; SCHNORR_SIGNATURE_SIZE];
        out[..32].copy_from_slice(&checked_bytes32(&signature.r)?);
        out[32..].copy_from_slice(&checked_bytes32(&signature.s)?);
        Ok(out)
    }

    pub fn parse(bytes: &[u8]) -> Result<SchnorrSignature, EcError> {
        if bytes.len() != SCHNORR_SIGNATURE_SIZE {
            return Err(EcError::InvalidLength {
                expected: SCHNORR_SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(SchnorrSignature::new(
            BigUint::from_bytes_be(&bytes[..32]),
            BigUint::from_bytes_be(&bytes[32..]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let sig = SchnorrSignature::new(BigUint::from(0xabu8), BigUint::from(0xcdu8));
        let bytes = SchnorrSignatureSerializer::serialize(&sig).unwrap();
        assert_eq!(bytes[31], 0xab);
        assert_eq!(bytes[63], 0xcd);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(SchnorrSignatureSerializer::parse(&bytes).unwrap(), sig);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            SchnorrSignatureSerializer::parse(&[0u8; 65]),
            Err(EcError::InvalidLength { expected: 64, actual: 65 })
        );
    }

    #[test]
    fn test_serialize_rejects_wide_element() {
        let wide = BigUint::from(1u8) << 300u32;
        let sig = SchnorrSignature::new(wide.clone(), BigUint::from(1u8));
        assert_eq!(SchnorrSignatureSerializer::serialize(&sig), Err(EcError::ElementTooLarge));
        let sig = SchnorrSignature::new(BigUint::from(1u8), wide);
        assert_eq!(SchnorrSignatureSerializer::serialize(&sig), Err(EcError::ElementTooLarge));
    }
}
