use serde_json::{Number, Value};

/// Rewrites every number in `value` to its native shape: whole values become
/// integers, everything else stays a float.
pub fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| (key, normalize_numbers(v)))
                .collect(),
        ),
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other,
    }
}

fn normalize_number(n: Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n;
    }

    match n.as_f64() {
        // i64 bounds are exact powers of two, so the range check is precise
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Number::from(f as i64)
        }
        _ => n,
    }
}
