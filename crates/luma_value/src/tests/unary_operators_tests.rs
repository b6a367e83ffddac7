//! Tests for unary operator implementations.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::{returning, with_meta};
use crate::{evaluate_unary, multi, ErrorCategory, MultiValue, UnaryOp, Value};

mod negation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbers() {
        assert_eq!(evaluate_unary(&Value::from(5), UnaryOp::Neg).unwrap(), Value::from(-5));
        assert_eq!(Value::from(-2.5).negate().unwrap(), Value::from(2.5));
    }

    #[test]
    fn test_numeral_strings_coerce() {
        assert_eq!(Value::from("3").negate().unwrap(), Value::from(-3));
    }

    #[test]
    fn test_unm_handler_receives_operand() {
        let unm = Value::function(|args: MultiValue| {
            assert_eq!(args.len(), 1);
            let n = args.get(1).raw_get("n")?;
            Ok(multi![n.negate()?])
        });
        let t = with_meta(&[("__unm", unm)]);
        t.raw_set("n", 4).unwrap();
        assert_eq!(t.negate().unwrap(), Value::from(-4));
    }

    #[test]
    fn test_non_numeric_fails() {
        let err = Value::from(true).negate().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        assert_eq!(err.message, "attempt to perform arithmetic on a boolean value");
    }
}

mod logical_not {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uses_truthiness() {
        assert_eq!(evaluate_unary(&Value::nil(), UnaryOp::Not).unwrap(), Value::from(true));
        assert_eq!(evaluate_unary(&Value::from(0), UnaryOp::Not).unwrap(), Value::from(false));
    }

    #[test]
    fn test_never_consults_handlers() {
        let t = with_meta(&[("__unm", returning("nope"))]);
        assert_eq!(evaluate_unary(&t, UnaryOp::Not).unwrap(), Value::from(false));
    }
}

mod length {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_counts_characters() {
        assert_eq!(Value::from("hello").length().unwrap(), Value::from(5));
        assert_eq!(Value::from("héllo").length().unwrap(), Value::from(5));
        assert_eq!(Value::from("").length().unwrap(), Value::from(0));
    }

    #[test]
    fn test_sequence_length() {
        assert_eq!(Value::sequence([1, 2, 3]).length().unwrap(), Value::from(3));
        assert_eq!(Value::table().length().unwrap(), Value::from(0));
    }

    #[test]
    fn test_sparse_table_reports_greatest_integer_key() {
        let t = Value::table_from_pairs([(1, "a"), (2, "b"), (10, "c")]).unwrap();
        assert_eq!(t.length().unwrap(), Value::from(10));
        assert_eq!(t.raw_len().unwrap(), 10.0);
    }

    #[test]
    fn test_len_handler_for_non_tables() {
        let n = Value::from(true)
            .with_metatable(&super::super::metatable(&[("__len", returning(99))]))
            .unwrap();
        assert_eq!(n.length().unwrap(), Value::from(99));
        assert!(n.raw_len().is_err());
    }

    #[test]
    fn test_tables_use_native_length_first() {
        let t = with_meta(&[("__len", returning(99))]);
        t.raw_set(1, "x").unwrap();
        assert_eq!(t.length().unwrap(), Value::from(1));
    }

    #[test]
    fn test_no_length_fails() {
        let err = Value::from(1).length().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Indexing);
        assert_eq!(err.message, "attempt to get length of a number value");
    }
}

mod bitwise_not {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integers() {
        assert_eq!(evaluate_unary(&Value::from(0), UnaryOp::BitNot).unwrap(), Value::from(-1));
        assert_eq!(evaluate_unary(&Value::from(5), UnaryOp::BitNot).unwrap(), Value::from(-6));
    }

    #[test]
    fn test_non_integral_fails() {
        let err = evaluate_unary(&Value::from(0.5), UnaryOp::BitNot).unwrap_err();
        assert_eq!(err.message, "number has no integer representation");
    }

    #[test]
    fn test_bnot_handler() {
        let t = with_meta(&[("__bnot", returning("flipped"))]);
        assert_eq!(evaluate_unary(&t, UnaryOp::BitNot).unwrap(), Value::from("flipped"));
    }
}
