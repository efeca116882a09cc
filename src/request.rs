// 🔢 Requested Counts - turn loose caller input into non-negative counts
//
// Callers send counts as JSON numbers, numeric strings, or not at all.
// Rules:
// - missing / null / unparsable → 0
// - numbers are truncated toward zero
// - strings use their leading integer ("12abc" → 12, "abc" → 0)
// - negatives clamp to 0
// - booleans, arrays and objects → 0, even a one-element array like [5]
//   (loosely-typed callers would coerce it to 5; counts here must be scalars)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a generate-and-persist request
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub users: Option<Value>,
    #[serde(default)]
    pub pets: Option<Value>,
}

impl GenerateRequest {
    pub fn counts(&self) -> GenerateCounts {
        GenerateCounts {
            users: resolve_count(self.users.as_ref()),
            pets: resolve_count(self.pets.as_ref()),
        }
    }
}

/// Clamped account/pet counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCounts {
    pub users: usize,
    pub pets: usize,
}

impl GenerateCounts {
    pub fn new(users: usize, pets: usize) -> Self {
        GenerateCounts { users, pets }
    }

    /// Clamp signed counts to `max(0, n)`
    pub fn from_signed(users: i64, pets: i64) -> Self {
        GenerateCounts {
            users: clamp(users),
            pets: clamp(pets),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users == 0 && self.pets == 0
    }
}

/// Resolve one requested count
pub fn resolve_count(value: Option<&Value>) -> usize {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_leading_int(s),
        _ => None,
    };

    parsed.map(clamp).unwrap_or(0)
}

/// Count for preview endpoints: falls back to `default` when missing, unparsable or zero
pub fn preview_count(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(parse_leading_int) {
        Some(0) | None => default,
        Some(n) => clamp(n),
    }
}

/// Leading integer of a string: optional whitespace, optional sign, digits.
/// Trailing characters are ignored. Returns `None` when there are no digits.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn clamp(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_numbers() {
        assert_eq!(resolve_count(Some(&json!(5))), 5);
        assert_eq!(resolve_count(Some(&json!(3.9))), 3);
        assert_eq!(resolve_count(Some(&json!(-5))), 0);
        assert_eq!(resolve_count(Some(&json!(-0.5))), 0);
        assert_eq!(resolve_count(Some(&json!(0))), 0);
    }

    #[test]
    fn test_resolve_strings() {
        assert_eq!(resolve_count(Some(&json!("12"))), 12);
        assert_eq!(resolve_count(Some(&json!("  7 pets"))), 7);
        assert_eq!(resolve_count(Some(&json!("4.8"))), 4);
        assert_eq!(resolve_count(Some(&json!("-3"))), 0);
        assert_eq!(resolve_count(Some(&json!("abc"))), 0);
        assert_eq!(resolve_count(Some(&json!(""))), 0);
    }

    #[test]
    fn test_resolve_missing_and_other_types() {
        assert_eq!(resolve_count(None), 0);
        assert_eq!(resolve_count(Some(&Value::Null)), 0);
        assert_eq!(resolve_count(Some(&json!(true))), 0);
        assert_eq!(resolve_count(Some(&json!([1, 2]))), 0);
    }

    #[test]
    fn test_resolve_rejects_containers() {
        assert_eq!(resolve_count(Some(&json!([5]))), 0);
        assert_eq!(resolve_count(Some(&json!(["7"]))), 0);
        assert_eq!(resolve_count(Some(&json!({"n": 3}))), 0);

        let request: GenerateRequest =
            serde_json::from_value(json!({"users": [5], "pets": 2})).unwrap();
        assert_eq!(request.counts(), GenerateCounts::new(0, 2));
    }

    #[test]
    fn test_request_defaults_to_zero() {
        let request: GenerateRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.counts().is_empty());

        let request: GenerateRequest =
            serde_json::from_value(json!({"users": -5, "pets": "3"})).unwrap();
        assert_eq!(request.counts(), GenerateCounts::new(0, 3));
    }

    #[test]
    fn test_from_signed_clamps() {
        assert_eq!(GenerateCounts::from_signed(-5, 3), GenerateCounts::new(0, 3));
        assert!(GenerateCounts::from_signed(0, 0).is_empty());
        assert!(GenerateCounts::from_signed(-1, -1).is_empty());
    }

    #[test]
    fn test_preview_count_falls_back() {
        assert_eq!(preview_count(None, 50), 50);
        assert_eq!(preview_count(Some("abc"), 50), 50);
        assert_eq!(preview_count(Some("0"), 50), 50);
        assert_eq!(preview_count(Some("8"), 50), 8);
        assert_eq!(preview_count(Some("-2"), 50), 0);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("+9"), Some(9));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }
}
