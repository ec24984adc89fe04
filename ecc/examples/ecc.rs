use std::sync::Arc;

use curve::Curve;
use ecc::{
    CompactSignature, CompactSignatureSerializer, DerSignatureSerializer, EcAdapter, NativeAdapter, SchnorrSignature,
    Signature, taproot_tweak,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

fn main() {
    let adapter = NativeAdapter::new(Arc::new(Curve::secp256k1())).expect("secp256k1");
    let mut rng = StdRng::seed_from_u64(42);
    let key = adapter.random_private_key(&mut rng, true);
    let public = key.public_key();

    let msg: [u8; 32] = Sha256::digest(b"hello ecc").into();

    let sig = key.sign(&msg).expect("sign");
    let der = DerSignatureSerializer::serialize(&sig).expect("encode der");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");
    assert_eq!(DerSignatureSerializer::parse(&der).expect("parse der"), sig2);
    assert!(public.verify(&msg, &sig2));

    let compact = key.sign_compact(&msg).expect("sign compact");
    let compact_bytes = CompactSignatureSerializer::serialize(&compact).expect("encode compact");
    let compact2: CompactSignature = bincode::deserialize(&bincode::serialize(&compact).expect("serialize compact"))
        .expect("deserialize compact");
    assert_eq!(CompactSignatureSerializer::parse(&compact_bytes).expect("parse compact"), compact2);
    let recovered = adapter.recover(&msg, &compact2).expect("recover");
    assert_eq!(&recovered, public);

    let internal = key.xonly_public_key();
    let tweak = taproot_tweak(&internal.to_bytes(), None);
    let output = internal.tweak_add(&tweak).expect("tweak");
    assert!(output.check_pay_to_contract(&internal, &tweak, !output.has_square_y()));

    let schnorr = key.sign_schnorr(&msg).expect("sign schnorr");
    let schnorr2: SchnorrSignature = bincode::deserialize(&bincode::serialize(&schnorr).expect("serialize schnorr"))
        .expect("deserialize schnorr");
    assert!(internal.verify_schnorr(&msg, &schnorr2));

    println!("public key  {}", hex::encode(public.to_bytes()));
    println!("der         {}", hex::encode(der));
    println!("compact     {}", hex::encode(compact_bytes));
    println!("taproot     {}", hex::encode(output.to_bytes()));
}
