//! Oracle output checked against native `i128` arithmetic on random operands.

use fil_codec::oracle::run;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn hex_of(x: i128) -> (String, &'static str) {
    let mag = x.unsigned_abs();
    (format!("0x{mag:x}"), if x < 0 { "true" } else { "false" })
}

fn decode(out: &str) -> Vec<u8> {
    hex::decode(out.strip_prefix("0x").unwrap()).unwrap()
}

/// Decodes `(bool, bytes)` back into a signed integer.
fn signed_result(out: &str) -> i128 {
    let raw = decode(out);
    assert_eq!(&raw[32..64], &{
        let mut w = [0u8; 32];
        w[31] = 0x40;
        w
    });
    let neg = raw[31] == 1;
    let len = raw[95] as usize;
    let mag = raw[96..96 + len]
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | b as u128) as i128;
    if neg {
        assert_ne!(mag, 0, "negative zero in oracle output");
        -mag
    } else {
        mag
    }
}

fn cmp_result(out: &str) -> i8 {
    let raw = decode(out);
    assert_eq!(raw.len(), 32);
    raw[31] as i8
}

fn call(args: &[&str]) -> String {
    run(args).unwrap()
}

#[test]
fn seeded_signed_operations() {
    let mut rng = StdRng::seed_from_u64(0x00f1_1c0d);
    for _ in 0..500 {
        let a = rng.gen_range(i64::MIN..=i64::MAX) as i128;
        let b = rng.gen_range(i64::MIN..=i64::MAX) as i128;
        let (ah, an) = hex_of(a);
        let (bh, bn) = hex_of(b);

        assert_eq!(signed_result(&call(&["add", &ah, &bh, an, bn])), a + b);
        assert_eq!(signed_result(&call(&["sub", &ah, &bh, an, bn])), a - b);
        assert_eq!(signed_result(&call(&["mul", &ah, &bh, an, bn])), a * b);
        if b != 0 {
            assert_eq!(signed_result(&call(&["div", &ah, &bh, an, bn])), a / b);
        }
    }
}

#[test]
fn seeded_modular_operations() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let a = rng.gen_range(i64::MIN..=i64::MAX) as i128;
        let b = rng.gen_range(i64::MIN..=i64::MAX) as i128;
        let n = rng.gen_range(1..=i64::MAX) as i128;
        let (ah, an) = hex_of(a);
        let (bh, bn) = hex_of(b);
        let (nh, _) = hex_of(n);

        assert_eq!(signed_result(&call(&["mod", &ah, &nh, an])), a.rem_euclid(n));
        let expected = ((a % n) * (b % n)).rem_euclid(n);
        assert_eq!(
            signed_result(&call(&["modmul", &ah, &bh, &nh, an, bn])),
            expected
        );
    }
}

#[test]
fn modexp_matches_square_and_multiply() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a: u64 = rng.gen();
        let e: u16 = rng.gen();
        let n = rng.gen_range(1..=u32::MAX) as u128;
        let mut expected = 1u128 % n;
        let mut base = a as u128 % n;
        let mut k = e;
        while k > 0 {
            if k & 1 == 1 {
                expected = expected * base % n;
            }
            base = base * base % n;
            k >>= 1;
        }
        let out = call(&[
            "modexp",
            &format!("0x{a:x}"),
            &format!("0x{e:x}"),
            &format!("0x{n:x}"),
        ]);
        assert_eq!(signed_result(&out), expected as i128, "{a}^{e} mod {n}");
    }
}

#[test]
fn invmod_valid_iff_coprime() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let a = rng.gen_range(1..=u32::MAX as u64);
        let m = rng.gen_range(2..=u32::MAX as u64);
        let raw = decode(&call(&["invmod", &format!("0x{a:x}"), &format!("0x{m:x}")]));
        let valid = raw[31] == 1;
        assert_eq!(raw[63], 0, "inverse is never negative");
        let len = raw[127] as usize;
        let inv = raw[128..128 + len]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64);
        let gcd = {
            let (mut x, mut y) = (a, m);
            while y != 0 {
                (x, y) = (y, x % y);
            }
            x
        };
        assert_eq!(valid, gcd == 1, "invmod({a}, {m})");
        if valid {
            assert_eq!((a as u128 * inv as u128) % m as u128, 1);
        }
    }
}

#[test]
fn cmp_scenarios() {
    assert_eq!(cmp_result(&call(&["cmp", "0x05", "0x03", "false", "false", "true"])), 1);
    assert_eq!(cmp_result(&call(&["cmp", "0x05", "0x03", "true", "false", "true"])), -1);
    assert_eq!(cmp_result(&call(&["cmp", "0x05", "0x03", "true", "false", "false"])), 1);
    assert_eq!(cmp_result(&call(&["cmp", "0x03", "0x03", "true", "false", "false"])), 0);
}

proptest! {
    #[test]
    fn signed_cmp_matches_native(a in any::<i64>(), b in any::<i64>()) {
        let (ah, an) = hex_of(a as i128);
        let (bh, bn) = hex_of(b as i128);
        let expected = a.cmp(&b) as i8;
        prop_assert_eq!(cmp_result(&call(&["cmp", &ah, &bh, an, bn, "true"])), expected);
        let expected = a.unsigned_abs().cmp(&b.unsigned_abs()) as i8;
        prop_assert_eq!(cmp_result(&call(&["cmp", &ah, &bh, an, bn, "false"])), expected);
    }

    #[test]
    fn shifts_match_native(a in any::<u64>(), bits in 0usize..64) {
        let ah = format!("0x{a:x}");
        let bits_s = bits.to_string();
        prop_assert_eq!(
            signed_result(&call(&["shl", &ah, &bits_s])),
            (a as i128) << bits
        );
        prop_assert_eq!(
            signed_result(&call(&["shr", &ah, &bits_s])),
            (a >> bits) as i128
        );
    }
}
