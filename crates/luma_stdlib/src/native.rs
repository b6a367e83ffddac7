//! Adapters between native Rust closures and luma functions.
//!
//! Every luma function has the same shape: a [`MultiValue`] in, a
//! [`MultiValue`] out. This module lets library code write ordinary typed
//! closures instead:
//!
//! ```
//! use luma_stdlib::native;
//! use luma_value::{multi, Value};
//!
//! let hypot = native("hypot", |x: f64, y: f64| x.hypot(y));
//! assert_eq!(hypot.call_first(multi![3, 4]).unwrap(), Value::from(5));
//!
//! let err = hypot.call(multi!["three"]).unwrap_err();
//! assert_eq!(err.message, "bad argument #1 to 'hypot' (number expected, got string)");
//! ```
//!
//! Arguments convert through [`FromValue`], results through
//! [`IntoResults`]. Missing arguments read as nil, so `Option<T>`
//! parameters are optional.

use luma_value::{bad_argument, CallResult, EvalError, MultiValue, Value};

/// 2^63, the first magnitude outside `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Conversion from a luma argument to a native parameter.
pub trait FromValue: Sized {
    /// Name of the accepted kind, used in `bad argument` messages.
    const EXPECTED: &'static str;

    /// Convert, or `None` when the value is not acceptable.
    fn from_value(value: &Value) -> Option<Self>;

    /// Reason a present value was rejected.
    fn mismatch(value: &Value) -> String {
        format!("{} expected, got {}", Self::EXPECTED, value.type_name())
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        value.try_number()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        let n = value.try_number()?;
        (n.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&n)).then_some(n as i64)
    }

    fn mismatch(value: &Value) -> String {
        if value.is_number_convertible() {
            "number has no integer representation".to_string()
        } else {
            format!("{} expected, got {}", Self::EXPECTED, value.type_name())
        }
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|n| i32::try_from(n).ok())
    }

    fn mismatch(value: &Value) -> String {
        i64::mismatch(value)
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|n| u64::try_from(n).ok())
    }

    fn mismatch(value: &Value) -> String {
        i64::mismatch(value)
    }
}

/// Any value converts by truthiness.
impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.to_boolean())
    }
}

/// Strings as-is, numbers in their default text form.
impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.to_text().ok()
    }
}

/// Nil (or a missing argument) becomes `None`.
impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_nil() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }

    fn mismatch(value: &Value) -> String {
        T::mismatch(value)
    }
}

/// Convert the 1-based argument `position` of `function`.
///
/// Failures read `bad argument #n to 'function' (T expected, got K)`, with
/// `no value` for arguments past the end of `args`.
pub fn argument<T: FromValue>(
    args: &MultiValue,
    position: usize,
    function: &str,
) -> Result<T, EvalError> {
    let value = args.get(position);
    T::from_value(&value).ok_or_else(|| {
        let message = if position > args.len() {
            format!("{} expected, got no value", T::EXPECTED)
        } else {
            T::mismatch(&value)
        };
        bad_argument(position, function, message)
    })
}

/// Conversion from a native return value to call results.
pub trait IntoResults {
    fn into_results(self) -> CallResult;
}

impl IntoResults for () {
    fn into_results(self) -> CallResult {
        Ok(MultiValue::new())
    }
}

impl IntoResults for MultiValue {
    fn into_results(self) -> CallResult {
        Ok(self)
    }
}

macro_rules! impl_into_results_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoResults for $ty {
                fn into_results(self) -> CallResult {
                    Ok(MultiValue::single(self))
                }
            }
        )*
    };
}

impl_into_results_single!(Value, f64, i64, i32, usize, bool, String, &'static str);

/// `None` returns a single nil.
impl<T: IntoResults> IntoResults for Option<T> {
    fn into_results(self) -> CallResult {
        match self {
            Some(value) => value.into_results(),
            None => Ok(MultiValue::single(Value::nil())),
        }
    }
}

impl<T: IntoResults> IntoResults for Result<T, EvalError> {
    fn into_results(self) -> CallResult {
        self.and_then(IntoResults::into_results)
    }
}

impl<A: Into<Value>, B: Into<Value>> IntoResults for (A, B) {
    fn into_results(self) -> CallResult {
        Ok(MultiValue::single(self.0).with(self.1))
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> IntoResults for (A, B, C) {
    fn into_results(self) -> CallResult {
        Ok(MultiValue::single(self.0).with(self.1).with(self.2))
    }
}

/// A native closure callable with converted arguments.
///
/// `Args` is the tuple of parameter types; it only selects the impl.
pub trait NativeFunction<Args>: 'static {
    fn invoke(&self, name: &'static str, args: &MultiValue) -> CallResult;
}

macro_rules! impl_native_function {
    ($($arg:ident => $position:literal),*) => {
        impl<Func, Ret, $($arg,)*> NativeFunction<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret + 'static,
            Ret: IntoResults,
            $($arg: FromValue,)*
        {
            #[allow(unused_variables, reason = "the nullary impl reads no arguments")]
            fn invoke(&self, name: &'static str, args: &MultiValue) -> CallResult {
                self($(argument::<$arg>(args, $position, name)?),*).into_results()
            }
        }
    };
}

impl_native_function!();
impl_native_function!(A => 1);
impl_native_function!(A => 1, B => 2);
impl_native_function!(A => 1, B => 2, C => 3);
impl_native_function!(A => 1, B => 2, C => 3, D => 4);

/// Wrap a typed closure as a function value named `name` in diagnostics.
pub fn native<Args, F>(name: &'static str, f: F) -> Value
where
    F: NativeFunction<Args>,
{
    Value::function(move |args: MultiValue| f.invoke(name, &args))
}
