//! Tests for binary operator implementations.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{returning, with_meta};
use crate::{evaluate_binary, multi, BinaryOp, ErrorCategory, MultiValue, Value};

fn num(n: f64) -> Value {
    Value::number(n)
}

fn eval(a: impl Into<Value>, op: BinaryOp, b: impl Into<Value>) -> Value {
    evaluate_binary(&a.into(), &b.into(), op).unwrap()
}

fn eval_err(a: impl Into<Value>, op: BinaryOp, b: impl Into<Value>) -> crate::EvalError {
    evaluate_binary(&a.into(), &b.into(), op).unwrap_err()
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_native_number_ops() {
        assert_eq!(eval(2, BinaryOp::Add, 3), num(5.0));
        assert_eq!(eval(5, BinaryOp::Sub, 3), num(2.0));
        assert_eq!(eval(2, BinaryOp::Mul, 3), num(6.0));
        assert_eq!(eval(7, BinaryOp::Div, 2), num(3.5));
        assert_eq!(eval(2, BinaryOp::Pow, 10), num(1024.0));
    }

    #[test]
    fn test_modulo_is_floored() {
        assert_eq!(eval(-2.5, BinaryOp::Mod, 1), num(0.5));
        assert_eq!(eval(-2.5, BinaryOp::Mod, 1.5), num(0.5));
        assert_eq!(eval(1, BinaryOp::Mod, 2.5), num(1.0));
        assert_eq!(eval(5, BinaryOp::Mod, -3), num(-1.0));
        assert_eq!(eval(7, BinaryOp::Mod, 2), num(1.0));
    }

    #[test]
    fn test_division_by_zero_follows_floats() {
        assert_eq!(eval(1, BinaryOp::Div, 0), num(f64::INFINITY));
        assert!(eval(1, BinaryOp::Mod, 0).as_number().unwrap().is_nan());
    }

    #[test]
    fn test_numeral_strings_coerce() {
        assert_eq!(eval(1, BinaryOp::Add, "2.5"), num(3.5));
        assert_eq!(eval("10", BinaryOp::Mul, "0x2"), num(20.0));
    }

    #[test]
    fn test_non_numeric_operand_is_named() {
        let err = eval_err(1, BinaryOp::Add, "threeve");
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        assert_eq!(err.message, "attempt to perform arithmetic on a string value");

        let err = eval_err(Value::nil(), BinaryOp::Sub, 1);
        assert_eq!(err.message, "attempt to perform arithmetic on a nil value");

        let err = eval_err(1, BinaryOp::Mul, Value::table());
        assert_eq!(err.message, "attempt to perform arithmetic on a table value");
    }

    #[test]
    fn test_add_handler_overrides() {
        // __add(self, x) = self.foo * x
        let add = Value::function(|args: MultiValue| {
            let this = args.get(1);
            let x = args.get(2);
            let foo = this.index("foo")?;
            Ok(multi![(&foo * &x)?])
        });
        let t = with_meta(&[("__add", add)]);
        t.set_index("foo", 21).unwrap();
        assert_eq!(eval(&t, BinaryOp::Add, 2), num(42.0));
    }

    #[test]
    fn test_right_operand_handler_is_used() {
        let t = with_meta(&[("__sub", returning("right"))]);
        assert_eq!(eval(1, BinaryOp::Sub, &t), Value::from("right"));
    }

    #[test]
    fn test_left_handler_wins() {
        let a = with_meta(&[("__mul", returning("left"))]);
        let b = with_meta(&[("__mul", returning("right"))]);
        assert_eq!(eval(&a, BinaryOp::Mul, &b), Value::from("left"));
    }

    #[test]
    fn test_handler_receives_operands_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let handler = Value::function(move |args: MultiValue| {
            log.borrow_mut().extend(args.iter().map(Value::explicit_to_text));
            Ok(MultiValue::new())
        });
        let t = with_meta(&[("__div", handler)]);
        let result = eval(5, BinaryOp::Div, &t);
        assert!(result.is_nil());
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], "5");
        assert!(seen[1].starts_with("table: "));
    }

    #[test]
    fn test_std_ops_dispatch() {
        let (a, b) = (num(7.0), num(2.0));
        assert_eq!((&a + &b).unwrap(), num(9.0));
        assert_eq!((&a - &b).unwrap(), num(5.0));
        assert_eq!((&a * &b).unwrap(), num(14.0));
        assert_eq!((&a / &b).unwrap(), num(3.5));
        assert_eq!((&a % &b).unwrap(), num(1.0));
        assert_eq!((-&a).unwrap(), num(-7.0));
        assert!((&a + &Value::nil()).is_err());
    }
}

mod concatenation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(eval(2, BinaryOp::Concat, 2), Value::from("22"));
        assert_eq!(eval("a", BinaryOp::Concat, 2), Value::from("a2"));
        assert_eq!(eval(1.5, BinaryOp::Concat, "x"), Value::from("1.5x"));
    }

    #[test]
    fn test_boolean_operand_fails() {
        let err = eval_err(true, BinaryOp::Concat, 1);
        assert_eq!(err.category(), ErrorCategory::Concatenation);
        assert_eq!(err.message, "attempt to concatenate a boolean value");

        let err = eval_err("a", BinaryOp::Concat, Value::nil());
        assert_eq!(err.message, "attempt to concatenate a nil value");
    }

    #[test]
    fn test_concat_handler() {
        let t = with_meta(&[("__concat", returning("joined"))]);
        assert_eq!(Value::from("x").concat(&t).unwrap(), Value::from("joined"));
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars() {
        assert_eq!(eval(1, BinaryOp::Eq, 1), Value::from(true));
        assert_eq!(eval(1, BinaryOp::Eq, 2), Value::from(false));
        assert_eq!(eval(1, BinaryOp::NotEq, 2), Value::from(true));
        assert_eq!(eval("a", BinaryOp::Eq, "a"), Value::from(true));
        assert_eq!(eval(Value::nil(), BinaryOp::Eq, Value::nil()), Value::from(true));
    }

    #[test]
    fn test_different_kinds_never_equal() {
        assert_eq!(eval("2", BinaryOp::Eq, 2), Value::from(false));
        assert_eq!(eval(false, BinaryOp::Eq, Value::nil()), Value::from(false));
    }

    #[test]
    fn test_identity_bypasses_handlers() {
        let t = with_meta(&[("__eq", returning(false))]);
        assert!(t.equals(&t.clone()).unwrap());
    }

    #[test]
    fn test_shared_eq_handler_is_consulted() {
        let meta = super::super::metatable(&[("__eq", returning(true))]);
        let a = Value::table().with_metatable(&meta).unwrap();
        let b = Value::table().with_metatable(&meta).unwrap();
        assert!(a.equals(&b).unwrap());
        assert!(!a.not_equals(&b).unwrap());
    }

    #[test]
    fn test_different_eq_handlers_mean_unequal() {
        let a = with_meta(&[("__eq", returning(true))]);
        let b = with_meta(&[("__eq", returning(true))]);
        assert!(!a.equals(&b).unwrap());
        assert!(!a.equals(&Value::table()).unwrap());
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(eval(1, BinaryOp::Lt, 2), Value::from(true));
        assert_eq!(eval(2, BinaryOp::GtEq, 2), Value::from(true));
        assert_eq!(eval(3, BinaryOp::Gt, 2), Value::from(true));
        assert_eq!(eval(3, BinaryOp::LtEq, 2), Value::from(false));
        assert_eq!(eval("a", BinaryOp::Lt, "b"), Value::from(true));
        assert_eq!(eval("b", BinaryOp::LtEq, "a"), Value::from(false));
    }

    #[test]
    fn test_incompatible_kinds_fail() {
        let err = eval_err(1, BinaryOp::Lt, "2");
        assert_eq!(err.category(), ErrorCategory::Ordering);
        assert_eq!(err.message, "attempt to compare number with string");

        let err = eval_err(Value::table(), BinaryOp::LtEq, Value::table());
        assert_eq!(err.message, "attempt to compare table with table");
    }

    #[test]
    fn test_greater_than_swaps_operands() {
        let err = Value::from(1).greater_than(&Value::nil()).unwrap_err();
        assert_eq!(err.message, "attempt to compare nil with number");
    }

    fn ranked(rank: f64, meta: &Value) -> Value {
        let t = Value::table().with_metatable(meta).unwrap();
        t.raw_set("rank", rank).unwrap();
        t
    }

    fn rank_lt() -> Value {
        Value::function(|args: MultiValue| {
            let a = args.get(1).raw_get("rank")?;
            let b = args.get(2).raw_get("rank")?;
            Ok(multi![a.less_than(&b)?])
        })
    }

    #[test]
    fn test_lt_handler() {
        let meta = super::super::metatable(&[("__lt", rank_lt())]);
        let low = ranked(1.0, &meta);
        let high = ranked(2.0, &meta);
        assert!(low.less_than(&high).unwrap());
        assert!(!high.less_than(&low).unwrap());
        assert!(high.greater_than(&low).unwrap());
    }

    #[test]
    fn test_le_falls_back_to_negated_swapped_lt() {
        let meta = super::super::metatable(&[("__lt", rank_lt())]);
        let low = ranked(1.0, &meta);
        let high = ranked(2.0, &meta);
        let same = ranked(1.0, &meta);
        assert!(low.less_equal(&high).unwrap());
        assert!(low.less_equal(&same).unwrap());
        assert!(!high.less_equal(&low).unwrap());
        assert!(high.greater_equal(&low).unwrap());
    }

    #[test]
    fn test_le_handler_preferred() {
        let meta = super::super::metatable(&[
            ("__lt", returning(true)),
            ("__le", returning(false)),
        ]);
        let a = Value::table().with_metatable(&meta).unwrap();
        let b = Value::table().with_metatable(&meta).unwrap();
        assert!(!a.less_equal(&b).unwrap());
    }
}

mod bitwise {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_ops() {
        assert_eq!(eval(6, BinaryOp::BitAnd, 3), num(2.0));
        assert_eq!(eval(6, BinaryOp::BitOr, 3), num(7.0));
        assert_eq!(eval(6, BinaryOp::BitXor, 3), num(5.0));
        assert_eq!(eval("0xF0", BinaryOp::BitAnd, 0x3C), num(48.0));
    }

    #[test]
    fn test_shifts_are_logical() {
        assert_eq!(eval(1, BinaryOp::Shl, 4), num(16.0));
        assert_eq!(eval(16, BinaryOp::Shr, 4), num(1.0));
        assert_eq!(eval(1, BinaryOp::Shl, 64), num(0.0));
        assert_eq!(eval(1, BinaryOp::Shl, -1), num(0.0));
        assert_eq!(eval(2, BinaryOp::Shr, -1), num(4.0));
        assert_eq!(eval(-1, BinaryOp::Shr, 60), num(15.0));
    }

    #[test]
    fn test_non_integral_fails() {
        let err = eval_err(1.5, BinaryOp::BitOr, 1);
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        assert_eq!(err.message, "number has no integer representation");
    }

    #[test]
    fn test_non_numeric_fails_or_dispatches() {
        let err = eval_err(true, BinaryOp::BitAnd, 1);
        assert_eq!(err.message, "attempt to perform bitwise operation on a boolean value");

        let t = with_meta(&[("__shl", returning("shifted"))]);
        assert_eq!(eval(&t, BinaryOp::Shl, 1), Value::from("shifted"));
    }
}
