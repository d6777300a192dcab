use serde_json::Value;

/// Splits `(a,b),(c,d)` into `["a,b", "c,d"]`. Text outside parentheses is
/// ignored.
pub fn parse_tuple_string(data: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut rest = data;

    while let Some(start) = rest.find('(') {
        let tail = &rest[start + 1..];
        match tail.find(')') {
            Some(end) => {
                items.push(tail[..end].trim().to_owned());
                rest = &tail[end + 1..];
            },
            None => break,
        }
    }

    items
}

/// Splits a comma separated list, dropping blanks.
pub fn parse_list(data: &str) -> Vec<String> {
    data.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Numeric view of a JSON scalar. Numbers and numeric strings convert,
/// anything else (including NaN and infinities) does not.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

pub fn coerce_number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(coerce_number).unwrap_or(0.0)
}

/// Epoch seconds from a number or numeric string. Fractional seconds are
/// truncated.
pub fn coerce_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            })
        },
        _ => None,
    }
}
