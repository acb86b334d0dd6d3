use bitmessage_codec::{Behaviour, PubkeyEncryptedV4, PubkeyV2, PubkeyV3, WireObject};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn sample_v3(sig_len: usize) -> PubkeyV3 {
    PubkeyV3 {
        behaviour: Behaviour(Behaviour::DOES_ACK),
        signing_key: [0x11; 64],
        encryption_key: [0x22; 64],
        nonce_trials_per_byte: 1000,
        extra_bytes: 1000,
        signature: vec![0x30; sig_len],
    }
}

fn bench_pubkey_plaintext(c: &mut Criterion) {
    let mut group = c.benchmark_group("pubkey_plaintext");

    let v2 = PubkeyV2 {
        behaviour: Behaviour(Behaviour::DOES_ACK),
        signing_key: [0x11; 64],
        encryption_key: [0x22; 64],
    };
    let v2_bytes = v2.to_wire();
    group.bench_function("v2_serialize", |b| b.iter(|| v2.to_wire()));
    group.bench_function("v2_deserialize", |b| {
        b.iter(|| {
            let decoded = PubkeyV2::from_wire(&v2_bytes);
            assert!(decoded.is_ok());
        })
    });

    for sig_len in [0usize, 71, 1024] {
        let bytes = sample_v3(sig_len).to_wire();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("v3_serialize_sig{sig_len}"), |b| {
            b.iter_batched(
                || sample_v3(sig_len),
                |key| key.to_wire(),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("v3_deserialize_sig{sig_len}"), |b| {
            b.iter(|| {
                let decoded = PubkeyV3::from_wire(&bytes);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

fn bench_pubkey_encrypted(c: &mut Criterion) {
    let mut group = c.benchmark_group("pubkey_encrypted_v4");
    let sizes = [256usize, 4096, 65536];

    for &size in &sizes {
        let mut payload = vec![0x5a; 32];
        payload.extend(std::iter::repeat(0xee).take(size));
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_function(format!("deserialize_{size}b"), |b| {
            b.iter(|| {
                let decoded = PubkeyEncryptedV4::from_wire(&payload);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pubkey_plaintext, bench_pubkey_encrypted);
criterion_main!(benches);
