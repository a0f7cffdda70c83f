//! Integration tests for bitbased
//!
//! These tests exercise the public API end to end: bit string algebra,
//! address arithmetic, CIDR containment and covering sets.

use bitbased::models::Member;
use bitbased::output::{aligned_bit_table, hex_table};
use bitbased::{covering_set, BitError, BitString, ByteOrder, CidrV4, IpV4};
use num_bigint::BigInt;
use proptest::prelude::*;

fn bitstring_strat() -> impl Strategy<Value = BitString> {
    proptest::collection::vec(any::<bool>(), 0..96).prop_map(BitString::from_bits)
}

fn equal_length_pair() -> impl Strategy<Value = (BitString, BitString)> {
    (0usize..96).prop_flat_map(|len| {
        (
            proptest::collection::vec(any::<bool>(), len),
            proptest::collection::vec(any::<bool>(), len),
        )
            .prop_map(|(a, b)| (BitString::from_bits(a), BitString::from_bits(b)))
    })
}

proptest! {
    #[test]
    fn bit_sequences_round_trip(seq in proptest::collection::vec(any::<bool>(), 0..128)) {
        let bs = BitString::from_bits(seq.clone());
        let charstring: String = seq.iter().map(|&b| if b { '1' } else { '0' }).collect();

        prop_assert_eq!(bs.to_string(), charstring.clone());
        prop_assert_eq!(BitString::parse(&charstring).unwrap(), bs.clone());
        prop_assert_eq!(BitString::parse(&format!("0b{charstring}")).unwrap(), bs.clone());
        prop_assert_eq!(bs.len(), seq.len());
        prop_assert_eq!(bs.iter().collect::<Vec<_>>(), seq);
    }

    #[test]
    fn value_fits_length(bs in bitstring_strat()) {
        prop_assert!(bs.value().bits() <= bs.len() as u64);
    }

    #[test]
    fn invariants_validated(value in -1000i64..1000, length in -4i64..12) {
        let result = BitString::from_signed(&BigInt::from(value), length);
        if value < 0 {
            prop_assert!(matches!(result, Err(BitError::UnsupportedValue(_))));
        } else if length < 0 {
            prop_assert!(matches!(result, Err(BitError::Argument(_))));
        } else if (value >> length) > 0 {
            prop_assert!(matches!(result, Err(BitError::Length(_))));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..32), little in any::<bool>()) {
        let order = if little { ByteOrder::Little } else { ByteOrder::Big };
        let bs = BitString::from_bytes(&data, order);
        prop_assert_eq!(bs.len(), 8 * data.len());
        prop_assert_eq!(bs.to_bytes(order, false).unwrap(), data.clone());

        let mut expected = data.clone();
        if little {
            expected.reverse();
        }
        let bytes: Vec<u64> = bs.iter_bytes(false).unwrap().filter_map(|b| b.to_u64()).collect();
        prop_assert_eq!(bytes, expected.into_iter().map(u64::from).collect::<Vec<_>>());
    }

    #[test]
    fn bitwise_algebra((a, b) in equal_length_pair()) {
        // De Morgan
        prop_assert_eq!(
            a.bit_and(&b).unwrap().negate(),
            a.negate().bit_or(&b.negate()).unwrap()
        );
        prop_assert_eq!(a.bit_xor(&a).unwrap(), BitString::zeroes(a.len()));
        prop_assert_eq!(a.negate().negate(), a.clone());
    }

    #[test]
    fn padding_identity(bs in bitstring_strat()) {
        prop_assert_eq!(bs.pad_left(0), bs.clone());
        prop_assert_eq!(bs.pad_right(0), bs.clone());
    }

    #[test]
    fn negative_index(bs in bitstring_strat()) {
        if !bs.is_empty() {
            let last = bs.len() as isize - 1;
            prop_assert_eq!(bs.get(-1).unwrap(), bs.get(last).unwrap());
        }
        let out_of_range = matches!(bs.get(bs.len() as isize), Err(BitError::Index { .. }));
        prop_assert!(out_of_range);
    }

    #[test]
    fn reverse_iteration(bs in bitstring_strat()) {
        let mut forward: Vec<bool> = bs.iter().collect();
        forward.reverse();
        prop_assert_eq!(bs.iter().rev().collect::<Vec<_>>(), forward);
    }

    #[test]
    fn covering_set_spans_range(a in any::<u32>(), b in any::<u32>()) {
        let (p, q) = (IpV4::from(a), IpV4::from(b));
        let blocks = covering_set(&p, &q);
        let (start, end) = if a <= b { (&p, &q) } else { (&q, &p) };
        let total: u64 = blocks.iter().map(|c| 1u64 << c.nbits()).sum();
        prop_assert_eq!(total, u64::from(end.to_u32() - start.to_u32()) + 1);
        for block in &blocks {
            prop_assert!(block.contains(block));
        }
    }
}

#[test]
fn test_index_error_on_short_string() {
    let bs = BitString::parse("01").unwrap();
    assert!(matches!(bs.get(2), Err(BitError::Index { .. })));
}

#[test]
fn test_slice_step_larger_than_string() {
    let bs = BitString::parse("110010").unwrap();
    assert_eq!(bs.slice_step(Some(1), None, isize::MAX).unwrap().to_string(), "1");
    assert_eq!(bs.slice_step(None, None, isize::MIN).unwrap().to_string(), "0");
}

#[test]
fn test_wraparound() {
    assert_eq!(
        IpV4::parse("255.255.255.255").unwrap().next(),
        IpV4::parse("0.0.0.0").unwrap()
    );
}

#[test]
fn test_cidr_containment() {
    let cidr = CidrV4::parse("1.14.32.0/13").unwrap();
    assert!(cidr.contains(&IpV4::parse("1.14.35.200").unwrap()));
    assert!(!cidr.contains(&IpV4::parse("1.14.30.200").unwrap()));
    assert!(cidr.contains(&cidr));

    let nested = CidrV4::parse("1.14.35.0/8").unwrap();
    assert!(cidr.contains(Member::Range(&nested)));
    assert!(!nested.contains(Member::Range(&cidr)));
}

#[test]
fn test_covering_set_scenarios() {
    let cases: [(&str, &str, &[&str]); 5] = [
        ("1.1.1.1", "1.1.1.1", &["1.1.1.1/0"]),
        ("1.1.1.0", "1.1.1.255", &["1.1.1.0/8"]),
        ("1.1.0.0", "1.1.1.255", &["1.1.0.0/9"]),
        ("1.1.1.0", "1.1.2.255", &["1.1.1.0/8", "1.1.2.0/8"]),
        (
            "1.1.0.254",
            "1.1.3.1",
            &["1.1.0.254/1", "1.1.1.0/8", "1.1.2.0/8", "1.1.3.0/1"],
        ),
    ];
    for (start, end, expected) in cases {
        let start = IpV4::parse(start).unwrap();
        let end = IpV4::parse(end).unwrap();
        let rendered: Vec<String> = covering_set(&start, &end)
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(rendered, expected, "covering_set({start}, {end})");
    }
}

#[test]
fn test_human_readable_range() {
    let cidr = CidrV4::parse("128.25.16.0/12").unwrap();
    assert_eq!(cidr.human_readable_range(), "128.25.[16-31].[0-255]");
}

#[test]
fn test_tables_from_parsed_literals() {
    let bs = BitString::parse("0x0102_0304_05").unwrap();
    let lines = hex_table(&bs, 4, ByteOrder::Big).unwrap();
    assert_eq!(
        lines,
        vec![" ___|  0  1  2  3", "  0 | 01 02 03 04", "  1 | 05"]
    );

    let lines = aligned_bit_table(&[bs.slice(..4), bs.slice(..6)], "'").unwrap();
    assert_eq!(lines, vec!["   4↓   0↓", "      0000", "   00'0000"]);
}
