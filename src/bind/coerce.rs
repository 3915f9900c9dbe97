//! Scalar coercion table shared by the primitive bindings.

use crate::bind::{BindError, Decoder, Result, Value};

/// Read any integral number, widened to `i128`.
///
/// Floats are accepted only without a fractional part.
pub(crate) fn integer(node: &Value, target: &'static str, cx: &Decoder<'_>) -> Result<i128> {
	match node {
		Value::I64(value) => Ok(i128::from(*value)),
		Value::U64(value) => Ok(i128::from(*value)),
		Value::F64(value) if value.is_finite() && value.fract() == 0.0 => Ok(*value as i128),
		Value::F64(_) => Err(cx.unconvertible(target, node)),
		_ => Err(cx.shape_mismatch("number", node)),
	}
}

/// Narrow a widened integer into `T`.
pub(crate) fn narrow<T: TryFrom<i128>>(wide: i128, node: &Value, target: &'static str, cx: &Decoder<'_>) -> Result<T> {
	T::try_from(wide).map_err(|_| cx.unconvertible(target, node))
}

/// Read any number as `f64`.
pub(crate) fn float(node: &Value, cx: &Decoder<'_>) -> Result<f64> {
	node.as_f64().ok_or_else(|| cx.shape_mismatch("number", node))
}

/// Read any number as `f32`; finite values that overflow are rejected.
pub(crate) fn float32(node: &Value, cx: &Decoder<'_>) -> Result<f32> {
	let wide = float(node, cx)?;
	let narrowed = wide as f32;
	if wide.is_finite() && !narrowed.is_finite() {
		return Err(cx.unconvertible("f32", node));
	}
	Ok(narrowed)
}

/// Widen `f32` through its shortest decimal form so `1.2f32` stays `1.2`.
pub(crate) fn widen_f32(value: f32) -> f64 {
	value.to_string().parse::<f64>().unwrap_or(f64::from(value))
}

/// Wrap a float for encoding; NaN and infinities have no JSON form.
pub(crate) fn finite(value: f64, target: &'static str) -> Result<Value> {
	if !value.is_finite() {
		return Err(BindError::NonFiniteNumber {
			target,
			value: value.to_string(),
		});
	}
	Ok(Value::F64(value))
}

/// Read a one-character string or an integer code point.
pub(crate) fn character(node: &Value, cx: &Decoder<'_>) -> Result<char> {
	match node {
		Value::String(text) => {
			let mut chars = text.chars();
			match (chars.next(), chars.next()) {
				(Some(ch), None) => Ok(ch),
				_ => Err(cx.unconvertible("char", node)),
			}
		}
		Value::I64(_) | Value::U64(_) => {
			let code = node.as_i64().and_then(|code| u32::try_from(code).ok());
			code.and_then(char::from_u32).ok_or_else(|| cx.unconvertible("char", node))
		}
		_ => Err(cx.shape_mismatch("string", node)),
	}
}
