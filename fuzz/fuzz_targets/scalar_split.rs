#![no_main]
// Scalar decomposition and GLV multiplication against the generic ladder.
use elliptic_curve::{bigint::U256, ops::Reduce, Field};
use libfuzzer_sys::fuzz_target;
use secp256k1_curve::{glv, FieldElement, ProjectivePoint, Scalar};

const HALF_BOUND: U256 =
    U256::from_be_hex("0000000000000000000000000000000100000000000000000000000000000000");

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    let k = <Scalar as Reduce<U256>>::reduce_bytes(data[0..32].into());
    let a = <Scalar as Reduce<U256>>::reduce_bytes(data[32..64].into());

    let split = glv::split_scalar(&k).unwrap();
    assert_eq!(split.recombine(), k);
    assert!(split.k1.to_uint() < HALF_BOUND);
    assert!(split.k2.to_uint() < HALF_BOUND);

    // Only every 16th input pays for the point multiplications.
    if data[0] & 0x0f == 0 {
        let p = ProjectivePoint::GENERATOR * a;
        assert_eq!(glv::mul(&p, &k).unwrap(), p * k);
        assert_eq!(
            glv::lincomb(&p, &k, &ProjectivePoint::GENERATOR, &a).unwrap(),
            p * k + ProjectivePoint::GENERATOR * a
        );
    }

    // Square roots from the addition chain square back.
    let fe = Option::<FieldElement>::from(FieldElement::from_bytes(data[32..64].into()));
    if let Some(fe) = fe {
        if let Some(root) = Option::<FieldElement>::from(fe.sqrt()) {
            assert_eq!(root.square(), fe);
        }
        if !bool::from(fe.is_zero()) {
            assert!(bool::from(fe.sqrt().is_some()) ^ bool::from(fe.neg().sqrt().is_some()));
        }
    }
    assert_eq!(k.is_zero_vartime(), bool::from(k.is_zero()));
});
