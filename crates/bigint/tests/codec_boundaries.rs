//! Round trips and canonical form at the usual integer width boundaries.

use fil_codec_bigint::{from_bytes, ops, to_bytes, BigInt, BigIntValue, WORD_BYTES};
use num_traits::{One, Zero};
use proptest::prelude::*;

const WIDTHS: [usize; 6] = [8, 16, 32, 64, 128, 256];

fn boundary_values() -> Vec<BigInt> {
    let mut out = vec![BigInt::zero(), BigInt::one(), -BigInt::one()];
    for w in WIDTHS {
        let p = BigInt::one() << w;
        let half = BigInt::one() << (w - 1);
        out.push(&p - 1);
        out.push(p.clone());
        out.push(-&p);
        out.push(-(&p - 1u32));
        out.push(&half - 1);
        out.push(-half);
    }
    out
}

#[test]
fn round_trip_at_every_width_boundary() {
    for x in boundary_values() {
        let encoded = to_bytes(&x);
        assert_eq!(from_bytes(&encoded), x, "round trip of {x}");
        if encoded.magnitude().is_empty() {
            assert!(!encoded.is_negative());
        } else {
            assert_ne!(encoded.magnitude()[0], 0, "non-minimal magnitude for {x}");
        }
    }
}

#[test]
fn magnitude_lengths_at_powers_of_two() {
    for w in WIDTHS {
        let p = BigInt::one() << w;
        assert_eq!(to_bytes(&(&p - 1)).magnitude().len(), w / 8);
        assert_eq!(to_bytes(&p).magnitude().len(), w / 8 + 1);
    }
}

#[test]
fn signed_word_bridge_at_extremes() {
    let min = -(BigInt::one() << 255usize);
    let max = (BigInt::one() << 255) - 1;

    let min_word = to_bytes(&min).to_word_signed().unwrap();
    assert_eq!(min_word[0], 0x80);
    assert!(min_word[1..].iter().all(|&b| b == 0));
    assert_eq!(from_bytes(&BigIntValue::from_word_signed(&min_word)), min);

    let max_word = to_bytes(&max).to_word_signed().unwrap();
    assert_eq!(max_word[0], 0x7f);
    assert_eq!(from_bytes(&BigIntValue::from_word_signed(&max_word)), max);

    assert!(to_bytes(&(max + 1)).to_word_signed().is_err());
    assert!(to_bytes(&(min - 1)).to_word_signed().is_err());
}

#[test]
fn word_arithmetic_does_not_wrap() {
    let max = BigIntValue::from_word_unsigned(&[0xff; WORD_BYTES]);
    let sum = ops::add(&max, &BigIntValue::from(1u8));
    assert_eq!(sum.magnitude().len(), WORD_BYTES + 1);
    assert_eq!(sum.magnitude()[0], 0x01);
    assert!(sum.to_word_unsigned().is_err());
}

#[test]
fn fvm_bytes_round_trip_at_boundaries() {
    for x in boundary_values() {
        let v = to_bytes(&x);
        assert_eq!(BigIntValue::from_fvm_bytes(&v.to_fvm_bytes()).unwrap(), v);
    }
}

proptest! {
    #[test]
    fn native_round_trip(x in any::<i128>()) {
        let v = BigIntValue::from(x);
        prop_assert_eq!(i128::try_from(&v).unwrap(), x);
        prop_assert_eq!(v.is_negative(), x < 0);
    }

    #[test]
    fn raw_producer_bytes_normalize(lead in 0usize..4, body in proptest::collection::vec(any::<u8>(), 0..40), neg in any::<bool>()) {
        let mut raw = vec![0u8; lead];
        raw.extend_from_slice(&body);
        let v = BigIntValue::new(raw.clone(), neg);
        let expected = BigInt::from_bytes_be(
            if neg { num_bigint::Sign::Minus } else { num_bigint::Sign::Plus },
            &raw,
        );
        prop_assert_eq!(from_bytes(&v), expected);
        prop_assert!(v.magnitude().first().map_or(true, |&b| b != 0));
        prop_assert!(!(v.is_zero() && v.is_negative()));
    }
}
