use num_bigint::BigUint;

use crate::errors::EcError;
use crate::signatures::Signature;

const TAG_SEQUENCE: u8 = 0x30;
const TAG_INTEGER: u8 = 0x02;
const MAX_SHORT_LENGTH: usize = 0x7f;

/// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }` with short-form lengths.
pub struct DerSignatureSerializer;

impl DerSignatureSerializer {
    /// Fails with [`EcError::ElementTooLarge`] when the SEQUENCE body would
    /// need a long-form length.
    pub fn serialize(signature: &Signature) -> Result<Vec<u8>, EcError> {
        let r = encode_integer(&signature.r)?;
        let s = encode_integer(&signature.s)?;

        let body_len = short_length(r.len() + s.len())?;
        let mut out = Vec::with_capacity(2 + r.len() + s.len());
        out.push(TAG_SEQUENCE);
        out.push(body_len);
        out.extend_from_slice(&r);
        out.extend_from_slice(&s);
        Ok(out)
    }

    pub fn parse(bytes: &[u8]) -> Result<Signature, EcError> {
        let (tag, body, rest) = read_element(bytes)?;
        if tag != TAG_SEQUENCE {
            return Err(EcError::InvalidDer("expected SEQUENCE"));
        }
        if !rest.is_empty() {
            return Err(EcError::InvalidDer("trailing bytes after SEQUENCE"));
        }

        let (r, body) = read_integer(body)?;
        let (s, body) = read_integer(body)?;
        if !body.is_empty() {
            return Err(EcError::InvalidDer("trailing bytes inside SEQUENCE"));
        }

        Ok(Signature::new(r, s))
    }
}

/// Minimal big-endian INTEGER, with a 0x00 pad when the top bit is set.
fn encode_integer(value: &BigUint) -> Result<Vec<u8>, EcError> {
    let bytes = value.to_bytes_be();
    let pad = bytes[0] & 0x80 != 0;

    let len = bytes.len() + usize::from(pad);
    let mut out = Vec::with_capacity(2 + len);
    out.push(TAG_INTEGER);
    out.push(short_length(len)?);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes);
    Ok(out)
}

fn short_length(len: usize) -> Result<u8, EcError> {
    if len > MAX_SHORT_LENGTH {
        return Err(EcError::ElementTooLarge);
    }
    Ok(len as u8)
}

fn read_element(bytes: &[u8]) -> Result<(u8, &[u8], &[u8]), EcError> {
    let [tag, len, rest @ ..] = bytes else {
        return Err(EcError::InvalidDer("truncated element header"));
    };
    if len & 0x80 != 0 {
        return Err(EcError::InvalidDer("long-form length"));
    }
    let len = usize::from(*len);
    if rest.len() < len {
        return Err(EcError::InvalidDer("length exceeds input"));
    }
    Ok((*tag, &rest[..len], &rest[len..]))
}

fn read_integer(bytes: &[u8]) -> Result<(BigUint, &[u8]), EcError> {
    let (tag, body, rest) = read_element(bytes)?;
    if tag != TAG_INTEGER {
        return Err(EcError::InvalidDer("expected INTEGER"));
    }
    match body.first() {
        None => return Err(EcError::InvalidDer("empty INTEGER")),
        Some(first) if first & 0x80 != 0 => return Err(EcError::InvalidDer("negative INTEGER")),
        Some(_) => {}
    }
    Ok((BigUint::from_bytes_be(body), rest))
}
