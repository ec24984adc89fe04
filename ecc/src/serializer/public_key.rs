use crate::adapter::EcAdapter;
use crate::constants::{
    COMPRESSED_PUBLIC_KEY_SIZE, KEY_COMPRESSED_EVEN, KEY_COMPRESSED_ODD, KEY_HYBRID_EVEN, KEY_HYBRID_ODD,
    KEY_UNCOMPRESSED, UNCOMPRESSED_PUBLIC_KEY_SIZE,
};
use crate::errors::EcError;
use crate::keys::PublicKey;
use crate::signatures::to_bytes32;

/// SEC1 public key encoding, plus the legacy hybrid prefixes on input.
pub struct PublicKeySerializer<A: EcAdapter> {
    adapter: A,
}

impl<A: EcAdapter> PublicKeySerializer<A> {
    pub fn new(adapter: A) -> Self {
        PublicKeySerializer { adapter }
    }

    /// The parse prefix if the key has one, else `02`/`03` or `04`.
    pub fn prefix(key: &PublicKey<A>) -> u8 {
        match key.prefix() {
            Some(prefix) => prefix,
            None if !key.is_compressed() => KEY_UNCOMPRESSED,
            None if key.point().is_y_odd() => KEY_COMPRESSED_ODD,
            None => KEY_COMPRESSED_EVEN,
        }
    }

    pub fn serialize(key: &PublicKey<A>) -> Vec<u8> {
        let point = key.point();
        let len = if key.is_compressed() {
            COMPRESSED_PUBLIC_KEY_SIZE
        } else {
            UNCOMPRESSED_PUBLIC_KEY_SIZE
        };

        let mut out = Vec::with_capacity(len);
        out.push(Self::prefix(key));
        out.extend_from_slice(&to_bytes32(&point.x));
        if !key.is_compressed() {
            out.extend_from_slice(&to_bytes32(&point.y));
        }
        out
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<PublicKey<A>, EcError> {
        let Some(&prefix) = bytes.first() else {
            return Err(EcError::InvalidLength {
                expected: COMPRESSED_PUBLIC_KEY_SIZE,
                actual: 0,
            });
        };

        match prefix {
            KEY_COMPRESSED_EVEN | KEY_COMPRESSED_ODD => {
                check_len(bytes, COMPRESSED_PUBLIC_KEY_SIZE)?;
                let point = self.adapter.decode_point(bytes)?;
                Ok(PublicKey::from_parts(self.adapter.clone(), point, true, Some(prefix)))
            }
            KEY_UNCOMPRESSED | KEY_HYBRID_EVEN | KEY_HYBRID_ODD => {
                check_len(bytes, UNCOMPRESSED_PUBLIC_KEY_SIZE)?;
                let mut encoded = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
                encoded.copy_from_slice(bytes);
                encoded[0] = KEY_UNCOMPRESSED;

                let point = self.adapter.decode_point(&encoded)?;
                if prefix != KEY_UNCOMPRESSED && point.is_y_odd() != (prefix == KEY_HYBRID_ODD) {
                    return Err(EcError::InvalidPublicKey("hybrid prefix does not match y parity"));
                }
                Ok(PublicKey::from_parts(self.adapter.clone(), point, false, Some(prefix)))
            }
            _ => Err(EcError::InvalidPublicKey("unknown prefix")),
        }
    }
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), EcError> {
    if bytes.len() != expected {
        return Err(EcError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
