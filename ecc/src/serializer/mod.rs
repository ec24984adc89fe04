//! Byte encodings for signatures and public keys.

mod compact;
mod der;
mod public_key;
mod schnorr;

pub use compact::CompactSignatureSerializer;
pub use der::DerSignatureSerializer;
pub use public_key::PublicKeySerializer;
pub use schnorr::SchnorrSignatureSerializer;
