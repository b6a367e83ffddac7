//! The `math` library table.

use rand::{Rng, SeedableRng};

use luma_value::{bad_argument, multi, CallResult, EvalError, MultiValue, Value};

use crate::environment::SharedRng;
use crate::native::{argument, native};

pub(crate) const NAME: &str = "math";

/// Name/value pairs of the `math` table.
pub(crate) fn library(rng: SharedRng) -> Vec<(&'static str, Value)> {
    let mut entries = vec![
        ("abs", native("abs", f64::abs)),
        ("acos", native("acos", f64::acos)),
        ("asin", native("asin", f64::asin)),
        ("atan", native("atan", f64::atan)),
        ("atan2", native("atan2", f64::atan2)),
        ("ceil", native("ceil", f64::ceil)),
        ("cos", native("cos", f64::cos)),
        ("cosh", native("cosh", f64::cosh)),
        ("deg", native("deg", f64::to_degrees)),
        ("exp", native("exp", f64::exp)),
        ("floor", native("floor", f64::floor)),
        ("fmod", native("fmod", fmod)),
        ("frexp", native("frexp", frexp)),
        ("huge", Value::from(f64::INFINITY)),
        ("ldexp", native("ldexp", ldexp)),
        ("log", native("log", log)),
        ("log10", native("log10", f64::log10)),
        ("max", Value::function(|args| extremum(&args, "max", f64::max))),
        ("min", Value::function(|args| extremum(&args, "min", f64::min))),
        ("mod", native("mod", fmod)),
        ("modf", native("modf", modf)),
        ("pi", Value::from(std::f64::consts::PI)),
        ("pow", native("pow", f64::powf)),
        ("rad", native("rad", f64::to_radians)),
        ("sin", native("sin", f64::sin)),
        ("sinh", native("sinh", f64::sinh)),
        ("sqrt", native("sqrt", f64::sqrt)),
        ("tan", native("tan", f64::tan)),
        ("tanh", native("tanh", f64::tanh)),
    ];
    let seeded = SharedRng::clone(&rng);
    entries.push(("random", Value::function(move |args| random(&rng, &args))));
    entries.push((
        "randomseed",
        native("randomseed", move |seed: f64| {
            *seeded.borrow_mut() = SeedableRng::seed_from_u64(seed_bits(seed));
        }),
    ));
    entries
}

/// Truncated remainder: the result takes the sign of the dividend.
fn fmod(a: f64, b: f64) -> f64 {
    a % b
}

/// `log(x [, base])`, natural by default.
fn log(x: f64, base: Option<f64>) -> f64 {
    match base {
        None => x.ln(),
        Some(base) if base == 2.0 => x.log2(),
        Some(base) if base == 10.0 => x.log10(),
        Some(base) => x.ln() / base.ln(),
    }
}

/// Split `x` into `(m, e)` with `x == m * 2^e` and `0.5 <= |m| < 1`.
///
/// Zero, infinities and NaN return `(x, 0)`.
fn frexp(x: f64) -> (f64, i32) {
    const EXPONENT_MASK: u64 = 0x7ff << 52;
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let biased = ((bits & EXPONENT_MASK) >> 52) as i32;
    if biased == 0 {
        // Subnormal: scale into the normal range first.
        let (mantissa, exponent) = frexp(x * 2f64.powi(54));
        return (mantissa, exponent - 54);
    }
    let mantissa = f64::from_bits((bits & !EXPONENT_MASK) | (1022 << 52));
    (mantissa, biased - 1022)
}

/// `m * 2^e`, scaling in steps so no intermediate power overflows.
fn ldexp(m: f64, e: i32) -> f64 {
    // Past this range every finite nonzero `m` saturates to inf or zero.
    let mut exponent = e.clamp(-2200, 2200);
    let mut x = m;
    while exponent > 1023 {
        x *= 2f64.powi(1023);
        exponent -= 1023;
    }
    // 2^-969 keeps the partial product normal, so subnormal results round once.
    while exponent < -1022 {
        x *= 2f64.powi(-969);
        exponent += 969;
    }
    x * 2f64.powi(exponent)
}

/// `(integral, fractional)` parts, both carrying the sign of `x`.
fn modf(x: f64) -> (f64, f64) {
    if x.is_infinite() {
        return (x, 0.0);
    }
    (x.trunc(), x.fract())
}

/// `max`/`min` over one or more numbers.
fn extremum(args: &MultiValue, name: &str, pick: fn(f64, f64) -> f64) -> CallResult {
    let mut best: f64 = argument(args, 1, name)?;
    for position in 2..=args.len() {
        best = pick(best, argument(args, position, name)?);
    }
    Ok(multi![best])
}

/// `random()` in `[0, 1)`, `random(m)` in `[1, m]`, `random(m, n)` in `[m, n]`.
fn random(rng: &SharedRng, args: &MultiValue) -> CallResult {
    let (low, high) = match args.len() {
        0 => return Ok(multi![rng.borrow_mut().gen::<f64>()]),
        1 => (1, floored(args, 1)?),
        2 => (floored(args, 1)?, floored(args, 2)?),
        _ => return Err(EvalError::new("wrong number of arguments")),
    };
    if low > high {
        return Err(bad_argument(args.len(), "random", "interval is empty"));
    }
    Ok(multi![rng.borrow_mut().gen_range(low..=high)])
}

/// Interval bounds are floored to integers.
fn floored(args: &MultiValue, position: usize) -> Result<i64, EvalError> {
    let bound: f64 = argument(args, position, "random")?;
    Ok(bound.floor() as i64)
}

/// Integral seeds seed exactly like the builder's `random_seed`.
#[expect(clippy::cast_sign_loss, reason = "negative seeds wrap to distinct u64 seeds")]
fn seed_bits(seed: f64) -> u64 {
    if seed.fract() == 0.0 && seed.abs() < 9_223_372_036_854_775_808.0 {
        seed as i64 as u64
    } else {
        seed.to_bits()
    }
}
