#![no_main]
// BIP340 verification must never panic, and signatures from valid keys verify.
use libfuzzer_sys::fuzz_target;
use secp256k1_curve::schnorr;

fuzz_target!(|data: &[u8]| {
    // Arbitrary-length garbage: only the verdict matters.
    let third = data.len() / 3;
    let (sig, rest) = data.split_at(third);
    let (msg, pk) = rest.split_at(third);
    let _ = schnorr::verify(sig, msg, pk);

    if data.len() < 96 {
        return;
    }

    let (sk, rest) = data.split_at(32);
    let (msg, aux) = rest.split_at(32);
    let aux = &aux[..32];

    let Ok(pk) = schnorr::get_public_key(sk) else {
        return;
    };

    let sig = schnorr::sign(msg, sk, aux).unwrap();
    assert!(schnorr::verify(&sig, msg, &pk));
    assert!(schnorr::lift_x(&pk).is_ok());

    let mut tampered = sig;
    tampered[usize::from(data[0]) % 64] ^= 1 << (data[1] % 8);
    assert!(!schnorr::verify(&tampered, msg, &pk));
});
