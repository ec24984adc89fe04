use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use curve::Curve;
use ecc::{EcAdapter, NativeAdapter, PortableAdapter};
use rand::SeedableRng;
use rand::rngs::StdRng;

const MSG: [u8; 32] = [0x5a; 32];

fn bench_backend<A: EcAdapter>(c: &mut Criterion, name: &str, adapter: A) {
    let mut rng = StdRng::seed_from_u64(42);
    let key = adapter.random_private_key(&mut rng, true);
    let public = key.public_key().clone();
    let signature = key.sign(&MSG).expect("sign");
    let compact = key.sign_compact(&MSG).expect("sign compact");

    c.bench_function(&format!("{name}_ecdsa_sign"), |bencher| {
        bencher.iter(|| {
            let sig = key.sign(black_box(&MSG)).expect("sign");
            black_box(sig);
        })
    });

    c.bench_function(&format!("{name}_ecdsa_verify"), |bencher| {
        bencher.iter(|| {
            let ok = public.verify(black_box(&MSG), black_box(&signature));
            black_box(ok);
        })
    });

    c.bench_function(&format!("{name}_ecdsa_recover"), |bencher| {
        bencher.iter(|| {
            let recovered = adapter.recover(black_box(&MSG), black_box(&compact)).expect("recover");
            black_box(recovered);
        })
    });
}

fn bench_schnorr<A: EcAdapter>(c: &mut Criterion, name: &str, adapter: A) {
    let mut rng = StdRng::seed_from_u64(42);
    let key = adapter.random_private_key(&mut rng, true);
    let public = key.xonly_public_key();
    let signature = key.sign_schnorr(&MSG).expect("sign");

    c.bench_function(&format!("{name}_schnorr_sign"), |bencher| {
        bencher.iter(|| {
            let sig = key.sign_schnorr(black_box(&MSG)).expect("sign");
            black_box(sig);
        })
    });

    c.bench_function(&format!("{name}_schnorr_verify"), |bencher| {
        bencher.iter(|| {
            let ok = public.verify_schnorr(black_box(&MSG), black_box(&signature));
            black_box(ok);
        })
    });
}

fn bench_portable(c: &mut Criterion) {
    let adapter = PortableAdapter::new(Arc::new(Curve::secp256k1())).expect("secp256k1");
    bench_backend(c, "portable", adapter.clone());
    bench_schnorr(c, "portable", adapter);
}

fn bench_native(c: &mut Criterion) {
    let adapter = NativeAdapter::new(Arc::new(Curve::secp256k1())).expect("secp256k1");
    bench_backend(c, "native", adapter.clone());
    bench_schnorr(c, "native", adapter);
}

criterion_group!(benches, bench_portable, bench_native);
criterion_main!(benches);
