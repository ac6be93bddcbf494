use rand::SeedableRng;
use rand::rngs::StdRng;
use zkid::{Identity, Proof, PublicKey, SecretKey};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let identity = Identity::generate(&mut rng).expect("generate");
    let (sk, pk) = identity.into_parts();

    let sk_hex = sk.to_hex();
    let pk_bytes = bincode::serialize(&pk).expect("serialize pk");

    let context = b"hello schnorr";
    let proof = sk.prove(&mut rng, context).expect("prove");
    let proof_bytes = bincode::serialize(&proof).expect("serialize proof");
    println!(
        "{}",
        serde_json::to_string_pretty(&proof.to_payload()).expect("json")
    );

    let sk2 = SecretKey::from_hex(&sk_hex).expect("parse sk");
    let pk2: PublicKey = bincode::deserialize(&pk_bytes).expect("deserialize pk");
    let proof2: Proof = bincode::deserialize(&proof_bytes).expect("deserialize proof");

    let ok = pk2.verify(&proof2, context);
    assert!(ok);
    assert_eq!(sk2.public_key(), pk2);
}
