//! Algebraic identities on 256 to 512-bit operands.
//!
//! These operands are past any native width, so results are checked through
//! identities that tie the operations to each other instead of a reference
//! integer.

use fil_codec_bigint::{ops, BigIntValue};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn wide() -> impl Strategy<Value = BigIntValue> {
    (prop::collection::vec(any::<u8>(), 32..=64), any::<bool>())
        .prop_map(|(bytes, neg)| BigIntValue::new(bytes, neg))
}

fn wide_non_zero() -> impl Strategy<Value = BigIntValue> {
    wide().prop_filter("non-zero", |v| !v.is_zero())
}

fn one() -> BigIntValue {
    BigIntValue::from(1u8)
}

proptest! {
    #[test]
    fn div_and_remainder_rebuild_dividend(a in wide(), b in wide_non_zero()) {
        let q = ops::div(&a, &b).unwrap();
        let rem = ops::sub(&a, &ops::mul(&q, &b));
        prop_assert_eq!(ops::add(&ops::mul(&q, &b), &rem), a.clone());
        prop_assert_eq!(ops::cmp(&rem, &b, false), -1);
        // truncation keeps the remainder on the dividend's side
        prop_assert!(rem.is_zero() || rem.is_negative() == a.is_negative());
    }

    #[test]
    fn modulo_lands_in_range(a in wide(), n in wide_non_zero()) {
        let r = ops::modulo(&a, &n).unwrap();
        prop_assert!(!r.is_negative());
        prop_assert_eq!(ops::cmp(&r, &n, false), -1);
        let shifted = ops::add(&a, &BigIntValue::new(n.magnitude().to_vec(), false));
        prop_assert_eq!(ops::modulo(&shifted, &n).unwrap(), r);
    }

    #[test]
    fn add_then_sub_is_identity(a in wide(), b in wide()) {
        prop_assert_eq!(ops::sub(&ops::add(&a, &b), &b), a);
    }

    #[test]
    fn invmod_inverts_when_valid(a in wide(), m in wide_non_zero()) {
        let r = ops::invmod(&a, &m).unwrap();
        prop_assert!(!r.value.is_negative());
        let check = ops::modmul(&a, &r.value, &m).unwrap();
        prop_assert_eq!(r.valid, check == one());
        if r.valid {
            prop_assert_eq!(ops::cmp(&r.value, &m, false), -1);
        }
    }

    #[test]
    fn shifts_are_inverse_on_magnitude(a in wide(), bits in 0usize..600) {
        let shifted = ops::shl(&a, bits).unwrap();
        prop_assert_eq!(ops::shr(&shifted, bits), a);
    }
}

#[test]
fn seeded_modexp_matches_repeated_modmul() {
    let mut rng = StdRng::seed_from_u64(0x0256_0512);
    for case in 0..100 {
        let len = rng.gen_range(32..=64);
        let a = BigIntValue::new((0..len).map(|_| rng.gen()).collect::<Vec<u8>>(), rng.gen());
        let n = BigIntValue::new((0..len).map(|_| rng.gen()).collect::<Vec<u8>>(), false);
        if n.is_zero() {
            continue;
        }
        let e: u8 = rng.gen_range(0..40);

        let mut expected = ops::modulo(&one(), &n).unwrap();
        for _ in 0..e {
            expected = ops::modmul(&expected, &a, &n).unwrap();
        }
        assert_eq!(
            ops::modexp(&a, &BigIntValue::from(e), &n).unwrap(),
            expected,
            "modexp case {case}"
        );
    }
}
