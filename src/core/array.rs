//! Sequence helpers. Generic where the operation only needs equality, JSON
//! based where it has to look inside elements.

use crate::utils::error::{Result, UtilkitError};
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Each distinct element once, in first-seen order.
pub fn unique<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(UtilkitError::invalid_input("size", "chunk size must be at least 1"));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Flattens nested arrays up to `depth` levels deep.
pub fn flatten(items: &[Value], depth: usize) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) if depth > 0 => out.extend(flatten(inner, depth - 1)),
            other => out.push(other.clone()),
        }
    }
    out
}

/// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn compact(items: &[Value]) -> Vec<Value> {
    items.iter().filter(|v| is_truthy(v)).cloned().collect()
}

pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut rand::thread_rng());
    out
}

pub fn sample<T: Clone>(items: &[T]) -> Option<T> {
    items.choose(&mut rand::thread_rng()).cloned()
}

fn group_key(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Groups objects by the string form of `key`. Groups appear in first-seen
/// order; elements missing the key land under `"null"`.
pub fn group_by(items: &[Value], key: &str) -> Map<String, Value> {
    let mut groups = Map::new();
    for item in items {
        let group = group_key(item.get(key));
        if let Value::Array(members) = groups
            .entry(group)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            members.push(item.clone());
        }
    }
    groups
}

fn sort_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => sort_rank(a).cmp(&sort_rank(b)),
    }
}

/// Stable sort of objects by `key`. Elements without the key always go last.
pub fn sort_by(items: &[Value], key: &str, descending: bool) -> Vec<Value> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| match (a.get(key), b.get(key)) {
        (Some(x), Some(y)) => {
            let ord = compare_values(x, y);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    out
}

pub fn intersection<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let common: Vec<T> = a.iter().filter(|x| b.contains(x)).cloned().collect();
    unique(&common)
}

pub fn difference<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let rest: Vec<T> = a.iter().filter(|x| !b.contains(x)).cloned().collect();
    unique(&rest)
}

pub fn union<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let all: Vec<T> = a.iter().chain(b.iter()).cloned().collect();
    unique(&all)
}

/// Most elements `range` will produce.
pub const MAX_RANGE_LEN: usize = 1 << 20;

/// Half-open range `[start, end)`. A negative `step` counts down.
pub fn range(start: i64, end: i64, step: i64) -> Result<Vec<i64>> {
    if step == 0 {
        return Err(UtilkitError::invalid_input("step", "step cannot be zero"));
    }
    let span = i128::from(end) - i128::from(start);
    let step_size = i128::from(step).abs();
    let count = if span.signum() == i128::from(step.signum()) {
        (span.abs() + step_size - 1) / step_size
    } else {
        0
    };
    if count > MAX_RANGE_LEN as i128 {
        return Err(UtilkitError::invalid_input(
            "end",
            format!("range of {} elements exceeds the limit of {}", count, MAX_RANGE_LEN),
        ));
    }

    let mut out = Vec::with_capacity(count as usize);
    let mut current = start;
    while (step > 0 && current < end) || (step < 0 && current > end) {
        out.push(current);
        current = match current.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(out)
}

/// Splits `items` into (matching, rest), keeping relative order.
pub fn partition<T: Clone, F: Fn(&T) -> bool>(items: &[T], predicate: F) -> (Vec<T>, Vec<T>) {
    items.iter().cloned().partition(|item| predicate(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unique_keeps_first_seen_order() {
        assert_eq!(unique(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        let values = vec![json!({"a": 1}), json!("x"), json!({"a": 1})];
        assert_eq!(unique(&values), vec![json!({"a": 1}), json!("x")]);
    }

    #[test]
    fn chunk_splits_evenly_and_leaves_remainder() {
        assert_eq!(
            chunk(&[1, 2, 3, 4, 5, 6], 2).unwrap(),
            vec![vec![1, 2], vec![3, 4], vec![5, 6]]
        );
        assert_eq!(chunk(&[1, 2, 3], 2).unwrap(), vec![vec![1, 2], vec![3]]);
        assert!(chunk(&[1], 0).is_err());
        assert!(chunk::<i32>(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn flatten_respects_depth() {
        let nested = vec![json!(1), json!([2, [3, [4]]])];
        assert_eq!(flatten(&nested, 1), vec![json!(1), json!(2), json!([3, [4]])]);
        assert_eq!(
            flatten(&nested, usize::MAX),
            vec![json!(1), json!(2), json!(3), json!(4)]
        );
    }

    #[test]
    fn compact_drops_falsy() {
        let items = vec![
            json!(0),
            json!(1),
            json!(""),
            json!("a"),
            json!(null),
            json!(false),
            json!([]),
        ];
        assert_eq!(compact(&items), vec![json!(1), json!("a"), json!([])]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let items: Vec<i32> = (0..50).collect();
        let mut shuffled = shuffle(&items);
        shuffled.sort();
        assert_eq!(shuffled, items);
        assert!(sample::<i32>(&[]).is_none());
        assert!(items.contains(&sample(&items).unwrap()));
    }

    #[test]
    fn group_by_key() {
        let items = vec![
            json!({"kind": "fruit", "name": "apple"}),
            json!({"kind": "veg", "name": "kale"}),
            json!({"kind": "fruit", "name": "pear"}),
            json!({"name": "rock"}),
        ];
        let groups = group_by(&items, "kind");
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["fruit", "veg", "null"]);
        assert_eq!(groups["fruit"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn sort_by_key_puts_missing_last() {
        let items = vec![json!({"n": 3}), json!({}), json!({"n": 1}), json!({"n": 2})];
        let asc = sort_by(&items, "n", false);
        assert_eq!(asc, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3}), json!({})]);
        let desc = sort_by(&items, "n", true);
        assert_eq!(desc, vec![json!({"n": 3}), json!({"n": 2}), json!({"n": 1}), json!({})]);
    }

    #[test]
    fn set_operations() {
        assert_eq!(intersection(&[1, 2, 2, 3], &[2, 3, 4]), vec![2, 3]);
        assert_eq!(difference(&[1, 2, 2, 3], &[2]), vec![1, 3]);
        assert_eq!(union(&[1, 2], &[2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn ranges() {
        assert_eq!(range(0, 5, 1).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(range(0, 10, 3).unwrap(), vec![0, 3, 6, 9]);
        assert_eq!(range(5, 0, -2).unwrap(), vec![5, 3, 1]);
        assert!(range(5, 0, 1).unwrap().is_empty());
        assert!(range(0, 5, 0).is_err());
        assert_eq!(range(i64::MIN, i64::MIN + 3, 1).unwrap().len(), 3);
        assert!(matches!(
            range(0, i64::MAX, 1),
            Err(UtilkitError::InvalidInput { .. })
        ));
        assert!(range(i64::MAX, i64::MIN, -1).is_err());
    }

    #[test]
    fn partition_by_predicate() {
        let (even, odd) = partition(&[1, 2, 3, 4], |n| n % 2 == 0);
        assert_eq!(even, vec![2, 4]);
        assert_eq!(odd, vec![1, 3]);
    }
}
