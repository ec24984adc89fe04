//! Private, public and x-only public keys.
//!
//! Every key carries the adapter it was created by, so operations on a key
//! always run on the same backend and curve context.

use core::fmt;

use curve::Affine;
use num_bigint::BigUint;
use once_cell::sync::OnceCell;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::adapter::EcAdapter;
use crate::errors::EcError;
use crate::nonce::NonceSource;
use crate::serializer::PublicKeySerializer;
use crate::signatures::{CompactSignature, SchnorrSignature, Signature, to_bytes32};

/// A secret scalar in `[1, n-1]` with a compression hint for its public key.
///
/// The secret bytes are wiped when the key is dropped, and `Debug` never
/// prints them. The public key is derived on first use and cached.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use curve::Curve;
/// use ecc::{EcAdapter, PortableAdapter};
///
/// let adapter = PortableAdapter::new(Arc::new(Curve::secp256k1())).unwrap();
/// let mut secret = [0u8; 32];
/// secret[31] = 1;
/// let key = adapter.private_key(&secret, true).unwrap();
/// assert_eq!(key.public_key().point(), adapter.curve().generator());
/// ```
#[derive(Clone)]
pub struct PrivateKey<A: EcAdapter> {
    adapter: A,
    secret: Zeroizing<[u8; 32]>,
    compressed: bool,
    public_key: OnceCell<PublicKey<A>>,
}

/// A curve point other than infinity, with its serialization preferences.
///
/// `prefix` records the first byte the key was parsed from, so hybrid
/// (`0x06`/`0x07`) keys re-serialize byte for byte.
#[derive(Clone)]
pub struct PublicKey<A: EcAdapter> {
    adapter: A,
    point: Affine,
    compressed: bool,
    prefix: Option<u8>,
}

/// A public key identified by its x-coordinate alone.
///
/// The stored point is always the lift of `x` whose `y` is a quadratic
/// residue. `has_square_y` remembers whether the point this key was derived
/// from already had that property, which Taproot-style commitments need.
#[derive(Clone)]
pub struct XOnlyPublicKey<A: EcAdapter> {
    adapter: A,
    point: Affine,
    has_square_y: bool,
}

impl<A: EcAdapter> PrivateKey<A> {
    /// Wrap a secret that the adapter has already range-checked.
    pub(crate) fn from_validated(adapter: A, secret: Zeroizing<[u8; 32]>, compressed: bool) -> Self {
        PrivateKey {
            adapter,
            secret,
            compressed,
            public_key: OnceCell::new(),
        }
    }

    /// The 32-byte big-endian secret.
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    pub(crate) fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.secret[..])
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns the public key `d * G`, computing it on the first call.
    ///
    /// The public key inherits this key's compressed flag.
    pub fn public_key(&self) -> &PublicKey<A> {
        self.public_key.get_or_init(|| {
            let point = self.adapter.derive_public_point(&self.secret);
            PublicKey::from_parts(self.adapter.clone(), point, self.compressed, None)
        })
    }

    /// The x-only form of [`PrivateKey::public_key`].
    pub fn xonly_public_key(&self) -> XOnlyPublicKey<A> {
        self.public_key().as_xonly()
    }

    /// Signs a 32-byte message hash with an RFC 6979 nonce.
    ///
    /// # Arguments
    ///
    /// * `msg` - The message hash; the caller is responsible for hashing
    ///
    /// # Returns
    ///
    /// A low-S signature, or an error if the nonce yields `r = 0` or `s = 0`.
    pub fn sign(&self, msg: &[u8; 32]) -> Result<Signature, EcError> {
        self.adapter.sign(msg, self, None)
    }

    /// Signs with nonces drawn from `nonce` instead of RFC 6979.
    ///
    /// # Returns
    ///
    /// `EcError::InvalidNonce` if the source produces a value outside `[1, n-1]`.
    pub fn sign_with(&self, msg: &[u8; 32], nonce: &mut dyn NonceSource) -> Result<Signature, EcError> {
        self.adapter.sign(msg, self, Some(nonce))
    }

    /// Signs and attaches the recovery id of this key's public key.
    pub fn sign_compact(&self, msg: &[u8; 32]) -> Result<CompactSignature, EcError> {
        self.adapter.sign_compact(msg, self, None)
    }

    pub fn sign_compact_with(
        &self,
        msg: &[u8; 32],
        nonce: &mut dyn NonceSource,
    ) -> Result<CompactSignature, EcError> {
        self.adapter.sign_compact(msg, self, Some(nonce))
    }

    /// Produces a deterministic Schnorr signature over a 32-byte message.
    ///
    /// The secret is negated internally when its public key does not have a
    /// square `y`, so the signature verifies against [`PrivateKey::xonly_public_key`].
    pub fn sign_schnorr(&self, msg: &[u8; 32]) -> Result<SchnorrSignature, EcError> {
        self.adapter.sign_schnorr(msg, self)
    }

    /// Returns the key `(d + tweak) mod n`.
    ///
    /// # Returns
    ///
    /// - `EcError::InvalidTweak` if `tweak >= n`
    /// - `EcError::InvalidPrivateKey` if the result is zero
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, EcError> {
        let secret = Zeroizing::new(self.adapter.secret_tweak_add(&self.secret, tweak)?);
        self.adapter.private_key(&secret[..], self.compressed)
    }

    /// Returns the key `(d * tweak) mod n`. Same errors as [`PrivateKey::tweak_add`].
    pub fn tweak_mul(&self, tweak: &[u8; 32]) -> Result<Self, EcError> {
        let secret = Zeroizing::new(self.adapter.secret_tweak_mul(&self.secret, tweak)?);
        self.adapter.private_key(&secret[..], self.compressed)
    }
}

impl<A: EcAdapter> fmt::Debug for PrivateKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("secret", &"<redacted>")
            .field("compressed", &self.compressed)
            .finish()
    }
}

impl<A: EcAdapter> PartialEq for PrivateKey<A> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.secret[..].ct_eq(&other.secret[..])) && self.compressed == other.compressed
    }
}

impl<A: EcAdapter> Eq for PrivateKey<A> {}

impl<A: EcAdapter> PublicKey<A> {
    pub(crate) fn from_parts(adapter: A, point: Affine, compressed: bool, prefix: Option<u8>) -> Self {
        PublicKey {
            adapter,
            point,
            compressed,
            prefix,
        }
    }

    pub fn point(&self) -> &Affine {
        &self.point
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The prefix byte this key was parsed with, if any.
    pub fn prefix(&self) -> Option<u8> {
        self.prefix
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// SEC1 encoding: 33 bytes when compressed, 65 otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        PublicKeySerializer::<A>::serialize(self)
    }

    pub fn has_square_y(&self) -> bool {
        self.adapter.has_square_y(&self.point)
    }

    /// Drops `y`, keeping whether it was a quadratic residue.
    pub fn as_xonly(&self) -> XOnlyPublicKey<A> {
        let has_square_y = self.has_square_y();
        let point = if has_square_y {
            self.point.clone()
        } else {
            self.adapter.curve().negate(&self.point)
        };
        XOnlyPublicKey::from_parts(self.adapter.clone(), point, has_square_y)
    }

    /// Verifies an ECDSA signature over a 32-byte message hash.
    ///
    /// Returns `false` for out-of-range `r` or `s`; never errors.
    pub fn verify(&self, msg: &[u8; 32], signature: &Signature) -> bool {
        self.adapter.verify(msg, self, signature)
    }

    /// Returns `Q + tweak * G`.
    ///
    /// # Returns
    ///
    /// - `EcError::InvalidTweak` if `tweak >= n`
    /// - `EcError::PointAtInfinity` if the result is the identity
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, EcError> {
        let point = self.adapter.point_tweak_add(&self.point, tweak)?;
        Ok(PublicKey::from_parts(self.adapter.clone(), point, self.compressed, None))
    }

    /// Returns `tweak * Q`. Same errors as [`PublicKey::tweak_add`].
    pub fn tweak_mul(&self, tweak: &[u8; 32]) -> Result<Self, EcError> {
        let point = self.adapter.point_tweak_mul(&self.point, tweak)?;
        Ok(PublicKey::from_parts(self.adapter.clone(), point, self.compressed, None))
    }
}

impl<A: EcAdapter> fmt::Debug for PublicKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("x", &format_args!("{:064x}", self.point.x))
            .field("y", &format_args!("{:064x}", self.point.y))
            .field("compressed", &self.compressed)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Points and compression must match; prefixes are compared only when both keys have one.
///
/// A derived key has no prefix, so it equals both the `0x04` and the hybrid
/// parse of the same point while those two differ. The relation is not
/// transitive and `PublicKey` does not implement `Eq` or `Hash`; key maps
/// should use [`PublicKey::to_bytes`] or the point.
impl<A: EcAdapter> PartialEq for PublicKey<A> {
    fn eq(&self, other: &Self) -> bool {
        let prefix_eq = match (self.prefix, other.prefix) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        self.point == other.point && self.compressed == other.compressed && prefix_eq
    }
}

impl<A: EcAdapter> XOnlyPublicKey<A> {
    pub(crate) fn from_parts(adapter: A, point: Affine, has_square_y: bool) -> Self {
        XOnlyPublicKey {
            adapter,
            point,
            has_square_y,
        }
    }

    pub fn x(&self) -> &BigUint {
        &self.point.x
    }

    /// The square-y lift of `x`.
    pub fn point(&self) -> &Affine {
        &self.point
    }

    pub fn has_square_y(&self) -> bool {
        self.has_square_y
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        to_bytes32(&self.point.x)
    }

    pub fn verify_schnorr(&self, msg: &[u8; 32], signature: &SchnorrSignature) -> bool {
        self.adapter.verify_schnorr(msg, self, signature)
    }

    /// Returns the x-only form of `P + tweak * G`, recording whether that
    /// point had a square `y` before it was normalized.
    ///
    /// # Returns
    ///
    /// - `EcError::InvalidTweak` if `tweak >= n`
    /// - `EcError::PointAtInfinity` if the sum is the identity
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, EcError> {
        let tweaked = self.adapter.point_tweak_add(&self.point, tweak)?;
        let has_square_y = self.adapter.has_square_y(&tweaked);
        let point = if has_square_y {
            tweaked
        } else {
            self.adapter.curve().negate(&tweaked)
        };
        Ok(XOnlyPublicKey::from_parts(self.adapter.clone(), point, has_square_y))
    }

    /// Checks that this key commits to `tweak` on top of `base`.
    ///
    /// `parity` is the control bit published alongside the commitment: set
    /// when the tweaked point's `y` was not a square.
    pub fn check_pay_to_contract(&self, base: &XOnlyPublicKey<A>, tweak: &[u8; 32], parity: bool) -> bool {
        let Ok(expected) = base.tweak_add(tweak) else {
            return false;
        };
        let x_equal: bool = expected.to_bytes()[..].ct_eq(&self.to_bytes()[..]).into();
        x_equal && expected.has_square_y == !parity
    }
}

impl<A: EcAdapter> fmt::Debug for XOnlyPublicKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XOnlyPublicKey")
            .field("x", &format_args!("{:064x}", self.point.x))
            .field("has_square_y", &self.has_square_y)
            .finish()
    }
}

impl<A: EcAdapter> PartialEq for XOnlyPublicKey<A> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.has_square_y == other.has_square_y
    }
}

impl<A: EcAdapter> Eq for XOnlyPublicKey<A> {}

impl<A: EcAdapter> From<&PrivateKey<A>> for PublicKey<A> {
    /// Equivalent to `private_key.public_key().clone()`.
    fn from(key: &PrivateKey<A>) -> Self {
        key.public_key().clone()
    }
}
