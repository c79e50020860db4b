//! Dotted-path lookup and numeric coercion over untyped JSON documents.

use crate::domain::errors::CollectError;
use crate::domain::metrics::{Document, MetricKind, MetricPath, MetricValue};
use serde_json::{Number, Value};

/// Resolve `path` in `document` and coerce the leaf to `kind`.
///
/// Every segment but the last must name an object; the last must name a number.
/// Missing keys and non-object parents are `PathNotFound`, a leaf of the wrong
/// type is `TypeMismatch`.
pub fn resolve(
    document: &Document,
    path: &MetricPath,
    kind: MetricKind,
) -> Result<MetricValue, CollectError> {
    let leaf = lookup(document, path)?;

    let number = match leaf {
        Value::Number(n) => n,
        other => {
            return Err(CollectError::TypeMismatch {
                path: path.to_string(),
                expected: kind,
                found: describe(other),
            });
        }
    };

    match kind {
        MetricKind::Gauge => as_gauge(number, path).map(MetricValue::Gauge),
        MetricKind::Counter => as_counter(number, path).map(MetricValue::Counter),
    }
}

pub fn resolve_gauge(document: &Document, path: &MetricPath) -> Result<f64, CollectError> {
    match resolve(document, path, MetricKind::Gauge)? {
        MetricValue::Gauge(v) => Ok(v),
        MetricValue::Counter(v) => Ok(v as f64),
    }
}

pub fn resolve_counter(document: &Document, path: &MetricPath) -> Result<i64, CollectError> {
    match resolve(document, path, MetricKind::Counter)? {
        MetricValue::Counter(v) => Ok(v),
        MetricValue::Gauge(v) => Ok(v as i64),
    }
}

fn lookup<'a>(document: &'a Document, path: &MetricPath) -> Result<&'a Value, CollectError> {
    let not_found = || CollectError::PathNotFound {
        path: path.to_string(),
    };

    let (last, parents) = path.segments().split_last().ok_or_else(not_found)?;

    let mut current = document;
    for segment in parents {
        current = match current.get(segment) {
            Some(Value::Object(child)) => child,
            _ => return Err(not_found()),
        };
    }

    current.get(last).ok_or_else(not_found)
}

fn as_gauge(number: &Number, path: &MetricPath) -> Result<f64, CollectError> {
    number.as_f64().ok_or_else(|| CollectError::TypeMismatch {
        path: path.to_string(),
        expected: MetricKind::Gauge,
        found: format!("number {}", number),
    })
}

fn as_counter(number: &Number, path: &MetricPath) -> Result<i64, CollectError> {
    if let Some(v) = number.as_i64() {
        return Ok(v);
    }

    let mismatch = || CollectError::TypeMismatch {
        path: path.to_string(),
        expected: MetricKind::Counter,
        found: format!("number {}", number),
    };

    // u64 beyond i64::MAX lands here too and fails the range check below
    let v = number.as_f64().ok_or_else(mismatch)?;
    if v.fract() != 0.0 || v < i64::MIN as f64 || v >= i64::MAX as f64 {
        return Err(mismatch());
    }

    Ok(v.trunc() as i64)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("test document must be an object, got {}", other),
        }
    }

    fn path(s: &str) -> MetricPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolves_nested_number() {
        let d = doc(json!({"a": {"b": {"c": 7}}}));

        assert_eq!(resolve_gauge(&d, &path("a.b.c")).unwrap(), 7.0);
        assert_eq!(resolve_counter(&d, &path("a.b.c")).unwrap(), 7);
        assert_eq!(
            resolve(&d, &path("a.b.c"), MetricKind::Gauge).unwrap(),
            MetricValue::Gauge(7.0)
        );
    }

    #[test]
    fn test_resolves_top_level_key() {
        let d = doc(json!({"uptime": 3600.25}));
        assert_eq!(resolve_gauge(&d, &path("uptime")).unwrap(), 3600.25);
    }

    #[test]
    fn test_missing_first_segment_is_not_found() {
        let d = doc(json!({"memory": {"used": "lots"}}));

        for kind in [MetricKind::Gauge, MetricKind::Counter] {
            let err = resolve(&d, &path("cpu.used"), kind).unwrap_err();
            assert!(matches!(err, CollectError::PathNotFound { ref path } if path == "cpu.used"));
        }
    }

    #[test]
    fn test_missing_leaf_is_not_found() {
        let d = doc(json!({"memory": {"used": 1}}));
        let err = resolve_gauge(&d, &path("memory.free")).unwrap_err();
        assert!(matches!(err, CollectError::PathNotFound { .. }));
    }

    #[test]
    fn test_walking_through_scalar_is_not_found() {
        let d = doc(json!({"memory": 512, "list": [1, 2, 3]}));

        let err = resolve_gauge(&d, &path("memory.used")).unwrap_err();
        assert!(matches!(err, CollectError::PathNotFound { .. }));

        // no array indexing
        let err = resolve_gauge(&d, &path("list.0")).unwrap_err();
        assert!(matches!(err, CollectError::PathNotFound { .. }));
    }

    #[test]
    fn test_non_numeric_leaf_is_type_mismatch() {
        let d = doc(json!({
            "name": "web",
            "up": true,
            "gone": null,
            "nested": {"x": 1},
        }));

        for p in ["name", "up", "gone", "nested"] {
            assert!(matches!(
                resolve_gauge(&d, &path(p)).unwrap_err(),
                CollectError::TypeMismatch { .. }
            ));
            assert!(matches!(
                resolve_counter(&d, &path(p)).unwrap_err(),
                CollectError::TypeMismatch { .. }
            ));
        }
    }

    #[test]
    fn test_counter_rejects_fraction() {
        let d = doc(json!({"requests": {"total": 1.5}}));
        let err = resolve_counter(&d, &path("requests.total")).unwrap_err();
        match err {
            CollectError::TypeMismatch { expected, .. } => {
                assert_eq!(expected, MetricKind::Counter)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_counter_accepts_whole_float() {
        let d = doc(json!({"requests": {"total": 1.0, "neg": -12.0}}));
        assert_eq!(resolve_counter(&d, &path("requests.total")).unwrap(), 1);
        assert_eq!(resolve_counter(&d, &path("requests.neg")).unwrap(), -12);
    }

    #[test]
    fn test_counter_rejects_out_of_range() {
        let d = doc(json!({"big": u64::MAX, "huge": 1.0e20}));
        assert!(matches!(
            resolve_counter(&d, &path("big")).unwrap_err(),
            CollectError::TypeMismatch { .. }
        ));
        assert!(matches!(
            resolve_counter(&d, &path("huge")).unwrap_err(),
            CollectError::TypeMismatch { .. }
        ));
        // still fine as a gauge
        assert_eq!(resolve_gauge(&d, &path("huge")).unwrap(), 1.0e20);
    }

    #[test]
    fn test_gauge_from_integer() {
        let d = doc(json!({"conns": -4}));
        assert_eq!(resolve_gauge(&d, &path("conns")).unwrap(), -4.0);
    }
}
