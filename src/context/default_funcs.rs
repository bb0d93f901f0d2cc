use chrono::{NaiveDate, NaiveDateTime};

use super::RuleFunction;
use crate::{EvalError, EvalResult, RuleValue};

const DEFAULT_DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// The callable whitelist. Rules cannot reach any function that is not
/// listed here.
pub const DEFAULT_FUNCS: &[(&str, RuleFunction)] = &[
    ("to_date", to_date_impl),
    ("substring", substring_impl),
    ("upper", upper_impl),
    ("lower", lower_impl),
    ("len", len_impl),
    ("isinstance", isinstance_impl),
    ("int", int_impl),
    ("float", float_impl),
    ("str", str_impl),
    ("bool", bool_impl),
    ("duration", duration_impl),
];

fn to_date_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    let (value, fmt) = match args {
        [RuleValue::String(value)] => (value.as_str(), DEFAULT_DATE_FMT),
        [RuleValue::String(value), RuleValue::String(fmt)] => {
            (value.as_str(), fmt.as_str())
        }
        _ => {
            return Err(EvalError::argument(
                "to_date() expects a string and an optional format string",
            ))
        }
    };

    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, fmt) {
        return Ok(RuleValue::from_timestamp(datetime.and_utc()));
    }

    // A date-only format has no time fields for the datetime parse above
    match NaiveDate::parse_from_str(value, fmt) {
        Ok(date) => match date.and_hms_opt(0, 0, 0) {
            Some(datetime) => Ok(RuleValue::from_timestamp(datetime.and_utc())),
            None => Err(EvalError::value(&format!(
                "\"{}\" is out of range for a date",
                value
            ))),
        },
        Err(err) => Err(EvalError::value(&format!(
            "Failed to parse \"{}\" with format \"{}\": {}",
            value, fmt, err
        ))),
    }
}

fn substring_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    let (value, start, end) = match args {
        [RuleValue::String(value), RuleValue::Int(start), RuleValue::Int(end)] => {
            (value, *start, *end)
        }
        _ => {
            return Err(EvalError::argument(
                "substring() expects a string and two int indexes",
            ))
        }
    };

    let chars: Vec<char> = value.chars().collect();
    let len = chars.len() as i64;

    // Slice semantics: negative indexes count from the end, out of range
    // indexes clamp, a backwards range is empty
    let mut start = if start < 0 { start + len } else { start };
    let mut end = if end < 0 { end + len } else { end };
    start = start.clamp(0, len);
    end = end.clamp(start, len);

    Ok(RuleValue::from_string(
        chars[start as usize..end as usize].iter().collect(),
    ))
}

fn upper_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::String(value)] => Ok(RuleValue::from_str(&value.to_uppercase())),
        _ => Err(EvalError::argument("upper() expects a string")),
    }
}

fn lower_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::String(value)] => Ok(RuleValue::from_str(&value.to_lowercase())),
        _ => Err(EvalError::argument("lower() expects a string")),
    }
}

fn len_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::String(value)] => {
            Ok(RuleValue::from_int(value.chars().count() as i64))
        }
        [RuleValue::List(value)] => Ok(RuleValue::from_int(value.len() as i64)),
        [RuleValue::Map(value)] => Ok(RuleValue::from_int(value.len() as i64)),
        [other] => Err(EvalError::value(&format!(
            "{} has no length",
            other.as_type()
        ))),
        _ => Err(EvalError::argument("len() expects one argument")),
    }
}

fn isinstance_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    let (value, tag) = match args {
        [value, RuleValue::Type(tag)] => (value, tag.as_str()),
        _ => {
            return Err(EvalError::argument(
                "isinstance() expects a value and a type",
            ))
        }
    };

    let matches = match (value, tag) {
        // bools are accepted where ints are
        (RuleValue::Bool(_), "int") => true,
        (value, tag) => match value.as_type() {
            RuleValue::Type(value_tag) => value_tag == tag,
            _ => false,
        },
    };

    Ok(RuleValue::from_bool(matches))
}

fn int_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::Int(value)] => Ok(RuleValue::from_int(*value)),
        [RuleValue::Float(value)] => Ok(RuleValue::from_int(*value as i64)),
        [RuleValue::Bool(value)] => Ok(RuleValue::from_int(*value as i64)),
        [RuleValue::String(value)] => match value.trim().parse::<i64>() {
            Ok(parsed) => Ok(RuleValue::from_int(parsed)),
            Err(_) => Err(EvalError::value(&format!(
                "Failed to convert \"{}\" to int",
                value
            ))),
        },
        [other] => Err(EvalError::value(&format!(
            "int() invalid for {}",
            other.as_type()
        ))),
        _ => Err(EvalError::argument("int() expects one argument")),
    }
}

fn float_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::Int(value)] => Ok(RuleValue::from_float(*value as f64)),
        [RuleValue::Float(value)] => Ok(RuleValue::from_float(*value)),
        [RuleValue::Bool(value)] => Ok(RuleValue::from_float(*value as i64 as f64)),
        [RuleValue::String(value)] => match value.trim().parse::<f64>() {
            Ok(parsed) => Ok(RuleValue::from_float(parsed)),
            Err(_) => Err(EvalError::value(&format!(
                "Failed to convert \"{}\" to float",
                value
            ))),
        },
        [other] => Err(EvalError::value(&format!(
            "float() invalid for {}",
            other.as_type()
        ))),
        _ => Err(EvalError::argument("float() expects one argument")),
    }
}

fn str_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::String(value)] => Ok(RuleValue::from_str(value)),
        [other] => Ok(RuleValue::from_string(format!("{}", other))),
        _ => Err(EvalError::argument("str() expects one argument")),
    }
}

fn bool_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [value] => Ok(RuleValue::from_bool(value.is_truthy())),
        _ => Err(EvalError::argument("bool() expects one argument")),
    }
}

fn duration_impl(args: &[RuleValue]) -> EvalResult<RuleValue> {
    match args {
        [RuleValue::String(value)] => match duration_str::parse(value) {
            Ok(parsed) => match chrono::Duration::from_std(parsed) {
                Ok(duration) => Ok(RuleValue::from_duration(duration)),
                Err(_) => Err(EvalError::value(&format!(
                    "Duration \"{}\" is out of range",
                    value
                ))),
            },
            Err(_) => Err(EvalError::value(&format!(
                "Failed to parse \"{}\" as a duration",
                value
            ))),
        },
        _ => Err(EvalError::argument("duration() expects a string")),
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use test_case::test_case;

    use crate::RuleValue;

    use super::*;

    #[test]
    fn test_to_date_default_format() {
        let res = to_date_impl(&[RuleValue::from_str("2024-03-01 12:30:00")]).unwrap();

        assert_eq!(
            res,
            RuleValue::from_timestamp(
                Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
            )
        );
    }

    #[test]
    fn test_to_date_date_only_format() {
        let res = to_date_impl(&[
            RuleValue::from_str("2024-03-01"),
            RuleValue::from_str("%Y-%m-%d"),
        ])
        .unwrap();

        assert_eq!(
            res,
            RuleValue::from_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_to_date_bad_input() {
        assert!(to_date_impl(&[RuleValue::from_str("not a date")]).is_err());
    }

    #[test_case(0, 3, "abc"; "prefix")]
    #[test_case(1, 2, "b"; "middle")]
    #[test_case(-2, 5, "de"; "negative start")]
    #[test_case(0, -1, "abcd"; "negative end")]
    #[test_case(3, 1, ""; "backwards range")]
    #[test_case(0, 100, "abcde"; "end past length")]
    fn test_substring(start: i64, end: i64, expected: &str) {
        let res = substring_impl(&[
            RuleValue::from_str("abcde"),
            RuleValue::from_int(start),
            RuleValue::from_int(end),
        ])
        .unwrap();

        assert_eq!(res, RuleValue::from_str(expected));
    }

    #[test]
    fn test_case_mapping() {
        assert_eq!(
            upper_impl(&[RuleValue::from_str("abc")]).unwrap(),
            RuleValue::from_str("ABC")
        );
        assert_eq!(
            lower_impl(&[RuleValue::from_str("ABC")]).unwrap(),
            RuleValue::from_str("abc")
        );
    }

    #[test]
    fn test_len() {
        assert_eq!(
            len_impl(&[RuleValue::from_str("abc")]).unwrap(),
            RuleValue::from_int(3)
        );
        assert_eq!(
            len_impl(&[vec![1.into(), 2.into()].into()]).unwrap(),
            RuleValue::from_int(2)
        );
        assert!(len_impl(&[RuleValue::from_int(3)]).is_err());
    }

    #[test]
    fn test_isinstance() {
        assert_eq!(
            isinstance_impl(&[RuleValue::from_int(3), RuleValue::from_type("int")])
                .unwrap(),
            RuleValue::from_bool(true)
        );
        assert_eq!(
            isinstance_impl(&[RuleValue::from_bool(true), RuleValue::from_type("int")])
                .unwrap(),
            RuleValue::from_bool(true)
        );
        assert_eq!(
            isinstance_impl(&[RuleValue::from_int(3), RuleValue::from_type("float")])
                .unwrap(),
            RuleValue::from_bool(false)
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            int_impl(&[RuleValue::from_float(3.9)]).unwrap(),
            RuleValue::from_int(3)
        );
        assert_eq!(
            float_impl(&[RuleValue::from_str("2.5")]).unwrap(),
            RuleValue::from_float(2.5)
        );
        assert_eq!(
            str_impl(&[RuleValue::from_int(42)]).unwrap(),
            RuleValue::from_str("42")
        );
        assert_eq!(
            bool_impl(&[RuleValue::from_str("")]).unwrap(),
            RuleValue::from_bool(false)
        );
        assert!(int_impl(&[RuleValue::from_str("3.5")]).is_err());
    }

    #[test]
    fn test_duration() {
        assert_eq!(
            duration_impl(&[RuleValue::from_str("90s")]).unwrap(),
            RuleValue::from_duration(chrono::Duration::seconds(90))
        );
        assert!(duration_impl(&[RuleValue::from_str("whenever")]).is_err());
    }
}
