//! The base library: global functions.
//!
//! Functions here take their arguments as a whole [`MultiValue`] when
//! they are variadic or inspect argument presence (`type`, `select`,
//! `pcall`), and go through [`native`] otherwise.

#![allow(
    clippy::needless_pass_by_value,
    reason = "library functions share the `MultiValue -> CallResult` shape"
)]

use luma_value::{bad_argument, multi, CallResult, EvalError, MultiValue, Value};

use crate::native::{argument, native};
use crate::print_handler::SharedPrintHandler;

/// Upper bound on the number of results `unpack` may produce.
const MAX_UNPACK: i64 = 1 << 20;

/// Name/function pairs installed directly into the globals table.
pub(crate) fn library(print_handler: &SharedPrintHandler) -> Vec<(&'static str, Value)> {
    vec![
        ("print", print(print_handler)),
        ("type", Value::function(type_of)),
        ("tostring", native("tostring", |v: Value| v.explicit_to_text())),
        ("tonumber", Value::function(tonumber)),
        ("getmetatable", native("getmetatable", |v: Value| v.metatable())),
        ("setmetatable", Value::function(setmetatable)),
        ("rawget", Value::function(rawget)),
        ("rawset", Value::function(rawset)),
        ("rawequal", Value::function(rawequal)),
        ("rawlen", Value::function(rawlen)),
        ("next", Value::function(next)),
        ("pairs", Value::function(pairs)),
        ("select", Value::function(select)),
        ("assert", Value::function(assert)),
        ("error", Value::function(error)),
        ("pcall", Value::function(pcall)),
        ("unpack", Value::function(unpack)),
    ]
}

fn print(print_handler: &SharedPrintHandler) -> Value {
    let sink = SharedPrintHandler::clone(print_handler);
    Value::function(move |args: MultiValue| {
        sink.println(&args.to_string());
        Ok(MultiValue::new())
    })
}

fn type_of(args: MultiValue) -> CallResult {
    if args.is_empty() {
        return Err(bad_argument(1, "type", "value expected"));
    }
    Ok(multi![args.first().type_name()])
}

/// `tonumber(v)` coerces numerals; `tonumber(s, base)` parses digits in
/// `base`. Anything unparseable yields nil.
fn tonumber(args: MultiValue) -> CallResult {
    let base: Option<i64> = argument(&args, 2, "tonumber")?;
    let Some(base) = base else {
        if args.is_empty() {
            return Err(bad_argument(1, "tonumber", "value expected"));
        }
        return Ok(multi![args.first().try_number().map_or_else(Value::nil, Value::from)]);
    };
    let radix = u32::try_from(base)
        .ok()
        .filter(|radix| (2..=36).contains(radix))
        .ok_or_else(|| bad_argument(2, "tonumber", "base out of range"))?;
    let text: String = argument(&args, 1, "tonumber")?;
    Ok(multi![parse_in_base(&text, radix).map_or_else(Value::nil, Value::from)])
}

/// Parse an optionally signed integer numeral in `radix`, ignoring
/// surrounding whitespace.
fn parse_in_base(text: &str, radix: u32) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })?;
    Some(if negative { -magnitude } else { magnitude })
}

/// `setmetatable(t, mt)` attaches `mt` (or detaches on nil) and returns `t`.
fn setmetatable(args: MultiValue) -> CallResult {
    let target = table_argument(&args, 1, "setmetatable")?;
    let metatable = args.get(2);
    if !(metatable.is_nil() || metatable.is_table()) {
        return Err(bad_argument(2, "setmetatable", "nil or table expected"));
    }
    target.set_metatable(&metatable)?;
    Ok(multi![target])
}

fn rawget(args: MultiValue) -> CallResult {
    let table = table_argument(&args, 1, "rawget")?;
    Ok(multi![table.raw_get(args.get(2))?])
}

fn rawset(args: MultiValue) -> CallResult {
    let table = table_argument(&args, 1, "rawset")?;
    table.raw_set(args.get(2), args.get(3))?;
    Ok(multi![table])
}

fn rawequal(args: MultiValue) -> CallResult {
    if args.len() < 2 {
        return Err(bad_argument(args.len() + 1, "rawequal", "value expected"));
    }
    Ok(multi![args.get(1).raw_equal(&args.get(2))])
}

fn rawlen(args: MultiValue) -> CallResult {
    let value = args.first();
    if !(value.is_table() || value.is_string()) {
        return Err(bad_argument(1, "rawlen", "table or string expected"));
    }
    Ok(multi![value.raw_len()?])
}

/// `next(t [, k])` returns the entry after `k`, or a single nil at the end.
fn next(args: MultiValue) -> CallResult {
    let table = table_argument(&args, 1, "next")?;
    match table.next(&args.get(2))? {
        Some((key, value)) => Ok(multi![key, value]),
        None => Ok(multi![Value::nil()]),
    }
}

/// `pairs(t)` returns the iterator triple `next, t, nil`.
fn pairs(args: MultiValue) -> CallResult {
    let table = table_argument(&args, 1, "pairs")?;
    Ok(multi![Value::function(next), table, Value::nil()])
}

/// `select('#', ...)` counts the varargs; `select(n, ...)` drops the first
/// `n - 1` of them. Negative `n` counts from the end.
fn select(args: MultiValue) -> CallResult {
    let rest = args.len().saturating_sub(1);
    if args.first().as_str() == Some("#") {
        return Ok(multi![rest]);
    }
    let n: i64 = argument(&args, 1, "select")?;
    let rest_len = i64::try_from(rest).unwrap_or(i64::MAX);
    let start = if n < 0 { rest_len + n } else { n - 1 };
    if n == 0 || start < 0 {
        return Err(bad_argument(1, "select", "index out of range"));
    }
    let skip = usize::try_from(start).unwrap_or(usize::MAX);
    Ok(args.into_iter().skip(1).skip(skip).collect())
}

/// `assert(v [, msg])` passes all its arguments through when `v` is true.
fn assert(args: MultiValue) -> CallResult {
    if args.is_empty() {
        return Err(bad_argument(1, "assert", "value expected"));
    }
    if args.first().to_boolean() {
        return Ok(args);
    }
    let message = args.get(2);
    if message.is_nil() {
        Err(EvalError::new("assertion failed!"))
    } else {
        Err(EvalError::new(message.explicit_to_text()))
    }
}

/// `error(msg)` raises `msg` as a host error.
fn error(args: MultiValue) -> CallResult {
    Err(EvalError::new(args.first().explicit_to_text()))
}

/// `pcall(f, ...)` returns `true, results...` or `false, message`.
fn pcall(args: MultiValue) -> CallResult {
    if args.is_empty() {
        return Err(bad_argument(1, "pcall", "value expected"));
    }
    let mut args = args.into_iter();
    let callee = args.next().unwrap_or_default();
    match callee.call(args.collect::<MultiValue>()) {
        Ok(mut results) => {
            results.prepend(true);
            Ok(results)
        }
        Err(err) => {
            tracing::trace!(error = %err, "pcall caught error");
            Ok(multi![false, err.message])
        }
    }
}

/// `unpack(t [, i [, j]])` returns `t[i], ..., t[j]`; `j` defaults to the
/// table's length.
fn unpack(args: MultiValue) -> CallResult {
    let table = table_argument(&args, 1, "unpack")?;
    let first: Option<i64> = argument(&args, 2, "unpack")?;
    let last: Option<i64> = argument(&args, 3, "unpack")?;
    let first = first.unwrap_or(1);
    let last = match last {
        Some(last) => last,
        None => table.raw_len()? as i64,
    };
    if first > last {
        return Ok(MultiValue::new());
    }
    if last.saturating_sub(first) >= MAX_UNPACK {
        return Err(EvalError::new("too many results to unpack"));
    }
    (first..=last).map(|i| table.raw_get(i)).collect()
}

fn table_argument(args: &MultiValue, position: usize, function: &str) -> Result<Value, EvalError> {
    let value = args.get(position);
    if value.is_table() {
        return Ok(value);
    }
    let got = if position > args.len() { "no value" } else { value.type_name() };
    Err(bad_argument(position, function, format!("table expected, got {got}")))
}
