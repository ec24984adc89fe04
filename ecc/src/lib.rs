//! ECDSA and Schnorr signatures over secp256k1 behind a pluggable backend.
//!
//! This library provides:
//! - Private, public and x-only public keys with tweaking and Taproot-style
//!   pay-to-contract checks
//! - Deterministic ECDSA (RFC 6979) with low-S normalization, DER and compact
//!   recoverable encodings, and public key recovery
//! - Schnorr signatures over x-only keys with square-y normalization
//!
//! # Overview
//!
//! All operations go through an [`EcAdapter`]. Two backends are available:
//! - [`PortableAdapter`] runs on the `curve` crate's big-integer arithmetic
//!   and accepts any curve descriptor
//! - [`NativeAdapter`] delegates to the constant-time `k256` crate and only
//!   accepts secp256k1
//!
//! Both backends produce identical keys and signatures for identical inputs.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use curve::Curve;
//! use ecc::{EcAdapter, NativeAdapter};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let adapter = NativeAdapter::new(Arc::new(Curve::secp256k1())).expect("secp256k1");
//!
//! // Generate a random private key
//! let mut rng = StdRng::seed_from_u64(42);
//! let key = adapter.random_private_key(&mut rng, true);
//!
//! // Sign a 32-byte message digest
//! let msg = [7u8; 32];
//! let signature = key.sign_compact(&msg).expect("signing failed");
//!
//! // Recover the signer from the signature alone
//! let recovered = adapter.recover(&msg, &signature).expect("recovery failed");
//! assert_eq!(&recovered, key.public_key());
//! assert!(recovered.verify(&msg, &signature.signature()));
//! ```
//!
//! # Security Considerations
//!
//! - Secret key bytes are zeroized on drop and never printed by `Debug`
//! - A caller-supplied [`NonceSource`] must never repeat a nonce across messages
//! - The portable backend is not constant-time; prefer [`NativeAdapter`] for
//!   signing with long-lived keys
//! - Messages are 32-byte digests; hashing the payload is the caller's job

mod adapter;
mod constants;
mod errors;
mod hash;
mod keys;
mod native;
mod nonce;
mod portable;
mod serializer;
mod signatures;


pub use adapter::EcAdapter;
pub use constants::*;
pub use errors::EcError;
pub use hash::{tagged_sha256, taproot_tweak};
pub use keys::{PrivateKey, PublicKey, XOnlyPublicKey};
pub use native::NativeAdapter;
pub use nonce::{FixedNonce, HmacDrbg, NonceSource, RandomNonce, Rfc6979};
pub use portable::PortableAdapter;
pub use serializer::{
    CompactSignatureSerializer, DerSignatureSerializer, PublicKeySerializer, SchnorrSignatureSerializer,
};
pub use signatures::{CompactSignature, SchnorrSignature, Signature};
