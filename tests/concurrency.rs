use bitmessage_codec::config::{KEY_LEN, TAG_LEN};
use bitmessage_codec::{Address, Behaviour, PubkeyEncryptedV4, PubkeyV3, WireObject};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_address_roundtrip() {
    use tokio::task::JoinSet;

    let iterations = 2_000u64;

    let mut tasks = JoinSet::new();
    for version in [2u64, 3, 4] {
        for worker in 0..4u64 {
            tasks.spawn_blocking(move || {
                for i in 0..iterations {
                    let stream = worker * iterations + i;
                    let mut ripe = [(i & 0xFF) as u8 | 1; 20];
                    ripe[0] = 0;
                    let addr = Address {
                        version,
                        stream,
                        ripe,
                    };
                    let text = addr.encode().unwrap();
                    assert_eq!(Address::decode(&text).unwrap(), addr);
                }
            });
        }
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_pubkey_decode() {
    use tokio::task::JoinSet;

    let sig_sizes = [0usize, 1, 71, 72, 500];

    let mut tasks = JoinSet::new();
    for &size in &sig_sizes {
        tasks.spawn_blocking(move || {
            for i in 0..5_000usize {
                let key = PubkeyV3 {
                    behaviour: Behaviour(i as u32),
                    signing_key: [(i & 0xFF) as u8; KEY_LEN],
                    encryption_key: [0x04; KEY_LEN],
                    nonce_trials_per_byte: i as u64,
                    extra_bytes: 1000,
                    signature: vec![0x30; size],
                };
                let bytes = key.to_wire();
                assert_eq!(PubkeyV3::from_wire(&bytes).unwrap(), key);

                let encrypted = PubkeyEncryptedV4 {
                    tag: [0x01; TAG_LEN],
                    encrypted_data: bytes,
                };
                assert!(PubkeyEncryptedV4::from_wire(&encrypted.to_wire()).is_ok());
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}
