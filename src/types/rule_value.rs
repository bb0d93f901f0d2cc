use chrono::{offset::Utc, DateTime, Duration};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    cmp::Ordering,
    collections::HashMap,
    fmt,
    iter::zip,
    ops::{Add, Div, Mul, Neg, Not, Rem, Sub},
};

use serde_json::value::Value;

use crate::{EvalError, EvalResult};

/// The basic value of the rule evaluator.
///
/// Houses all types an expression can produce along the way and implements
/// the operations valid on them. Only `Bool`, `Int`, `Float` and `String`
/// are legal as a rule's final result; everything else exists so that
/// intermediate expressions (list literals, date comparisons, unresolved
/// identifiers) have a representation.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub enum RuleValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    List(Vec<RuleValue>),
    Map(HashMap<String, RuleValue>),
    Null,
    Ident(String),
    Type(String),
    #[serde(skip_serializing, skip_deserializing)]
    Timestamp(DateTime<Utc>),
    #[serde(skip_serializing, skip_deserializing)]
    Duration(Duration),
}

impl RuleValue {
    pub fn from_int(val: i64) -> RuleValue {
        RuleValue::Int(val)
    }

    pub fn from_float(val: f64) -> RuleValue {
        RuleValue::Float(val)
    }

    pub fn from_bool(val: bool) -> RuleValue {
        RuleValue::Bool(val)
    }

    pub fn true_() -> RuleValue {
        RuleValue::Bool(true)
    }

    pub fn false_() -> RuleValue {
        RuleValue::Bool(false)
    }

    pub fn from_string(val: String) -> RuleValue {
        RuleValue::String(val)
    }

    pub fn from_str(val: &str) -> RuleValue {
        RuleValue::String(val.to_owned())
    }

    pub fn from_list(val: Vec<RuleValue>) -> RuleValue {
        RuleValue::List(val)
    }

    pub fn from_map(val: HashMap<String, RuleValue>) -> RuleValue {
        RuleValue::Map(val)
    }

    pub fn from_null() -> RuleValue {
        RuleValue::Null
    }

    pub fn from_ident(val: &str) -> RuleValue {
        RuleValue::Ident(val.to_owned())
    }

    pub fn from_type(val: &str) -> RuleValue {
        RuleValue::Type(val.to_owned())
    }

    pub fn from_timestamp(val: DateTime<Utc>) -> RuleValue {
        RuleValue::Timestamp(val)
    }

    pub fn from_duration(val: Duration) -> RuleValue {
        RuleValue::Duration(val)
    }

    pub fn is_true(&self) -> bool {
        if let RuleValue::Bool(val) = self {
            *val
        } else {
            false
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            RuleValue::Int(i) => *i != 0,
            RuleValue::Float(f) => *f != 0.0,
            RuleValue::Bool(b) => *b,
            RuleValue::String(s) => !s.is_empty(),
            RuleValue::List(l) => !l.is_empty(),
            RuleValue::Map(m) => !m.is_empty(),
            RuleValue::Null => false,
            RuleValue::Type(_) => true,
            RuleValue::Timestamp(_) => true,
            RuleValue::Duration(d) => !d.is_zero(),
            RuleValue::Ident(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RuleValue::Null)
    }

    /// True for the value types a rule is allowed to return.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            RuleValue::Bool(_) | RuleValue::Int(_) | RuleValue::Float(_) | RuleValue::String(_)
        )
    }

    /// Projects a primitive value into its JSON representation for the
    /// response body. Non-primitive values have no projection.
    pub fn into_json_primitive(self) -> Option<Value> {
        match self {
            RuleValue::Bool(b) => Some(Value::from(b)),
            RuleValue::Int(i) => Some(Value::from(i)),
            RuleValue::Float(f) => Some(Value::from(f)),
            RuleValue::String(s) => Some(Value::from(s)),
            _ => None,
        }
    }

    /// Numeric promotion for mixed-type operations: int and bool widen to
    /// float when paired with a float, bool widens to int.
    fn type_prop<'a>(
        lhs: Cow<'a, RuleValue>,
        rhs: Cow<'a, RuleValue>,
    ) -> (Cow<'a, RuleValue>, Cow<'a, RuleValue>) {
        if let RuleValue::Int(l) = lhs.as_ref() {
            match rhs.as_ref() {
                RuleValue::Float(_) => (Cow::Owned((*l as f64).into()), rhs),
                RuleValue::Bool(b) => (lhs, Cow::Owned((*b as i64).into())),
                _ => (lhs, rhs),
            }
        } else if let RuleValue::Float(_) = lhs.as_ref() {
            match rhs.as_ref() {
                RuleValue::Int(i) => (lhs, Cow::Owned((*i as f64).into())),
                RuleValue::Bool(b) => (lhs, Cow::Owned((if *b { 1.0 } else { 0.0 }).into())),
                _ => (lhs, rhs),
            }
        } else if let RuleValue::Bool(l) = lhs.as_ref() {
            match rhs.as_ref() {
                RuleValue::Int(_) => (Cow::Owned((*l as i64).into()), rhs),
                RuleValue::Float(_) => (Cow::Owned((if *l { 1.0 } else { 0.0 }).into()), rhs),
                _ => (lhs, rhs),
            }
        } else {
            (lhs, rhs)
        }
    }

    pub fn eq(&self, rhs_val: &RuleValue) -> EvalResult<RuleValue> {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Borrowed(self), Cow::Borrowed(rhs_val));

        match (lhs.as_ref(), rhs.as_ref()) {
            (RuleValue::Int(l), RuleValue::Int(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::Float(l), RuleValue::Float(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::Bool(l), RuleValue::Bool(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::String(l), RuleValue::String(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::Type(l), RuleValue::Type(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::List(l), RuleValue::List(r)) => {
                if l.len() != r.len() {
                    Ok(RuleValue::false_())
                } else {
                    for (v1, v2) in zip(l, r) {
                        match v1.eq(v2) {
                            Ok(RuleValue::Bool(true)) => continue,
                            _ => return Ok(RuleValue::false_()),
                        }
                    }
                    Ok(RuleValue::true_())
                }
            }
            (RuleValue::Map(l), RuleValue::Map(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::Null, RuleValue::Null) => Ok(RuleValue::true_()),
            (RuleValue::Null, _) | (_, RuleValue::Null) => Ok(RuleValue::false_()),
            (RuleValue::Timestamp(l), RuleValue::Timestamp(r)) => Ok(RuleValue::from_bool(l == r)),
            (RuleValue::Duration(l), RuleValue::Duration(r)) => Ok(RuleValue::from_bool(l == r)),
            _ => Err(EvalError::invalid_op(&format!(
                "Invalid op '==' between {} and {}",
                type1, type2
            ))),
        }
    }

    pub fn neq(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        if let RuleValue::Bool(res) = self.eq(rhs)? {
            return Ok(RuleValue::from_bool(!res));
        }

        unreachable!();
    }

    fn ord(&self, rhs_value: &RuleValue) -> EvalResult<Option<Ordering>> {
        let type1 = self.as_type();
        let type2 = rhs_value.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Borrowed(self), Cow::Borrowed(rhs_value));

        match (lhs.as_ref(), rhs.as_ref()) {
            (RuleValue::Int(l), RuleValue::Int(r)) => Ok(l.partial_cmp(r)),
            (RuleValue::Float(l), RuleValue::Float(r)) => Ok(l.partial_cmp(r)),
            (RuleValue::String(l), RuleValue::String(r)) => Ok(l.partial_cmp(r)),
            (RuleValue::Timestamp(l), RuleValue::Timestamp(r)) => Ok(l.partial_cmp(r)),
            (RuleValue::Duration(l), RuleValue::Duration(r)) => Ok(l.partial_cmp(r)),
            _ => Err(EvalError::invalid_op(&format!(
                "Invalid op 'ord' between {} and {}",
                type1, type2
            ))),
        }
    }

    pub fn lt(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        Ok(RuleValue::from_bool(self.ord(rhs)? == Some(Ordering::Less)))
    }

    pub fn gt(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        Ok(RuleValue::from_bool(
            self.ord(rhs)? == Some(Ordering::Greater),
        ))
    }

    pub fn le(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        let res = self.ord(rhs)?;

        Ok(RuleValue::from_bool(
            res == Some(Ordering::Less) || res == Some(Ordering::Equal),
        ))
    }

    pub fn ge(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        let res = self.ord(rhs)?;

        Ok(RuleValue::from_bool(
            res == Some(Ordering::Greater) || res == Some(Ordering::Equal),
        ))
    }

    pub fn or(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        Ok((self.is_truthy() || rhs.is_truthy()).into())
    }

    pub fn and(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        Ok((self.is_truthy() && rhs.is_truthy()).into())
    }

    pub fn in_(&self, rhs: &RuleValue) -> EvalResult<RuleValue> {
        let rhs_type = rhs.as_type();
        let lhs_type = self.as_type();

        match rhs {
            RuleValue::List(l) => {
                for value in l.iter() {
                    if let Ok(RuleValue::Bool(true)) = self.eq(value) {
                        return Ok(RuleValue::true_());
                    }
                }

                Ok(RuleValue::false_())
            }
            RuleValue::Map(m) => {
                if let RuleValue::String(l) = self {
                    Ok(RuleValue::from_bool(m.contains_key(l)))
                } else {
                    Err(EvalError::invalid_op(&format!(
                        "Op 'in' invalid between {} and {}",
                        lhs_type, rhs_type
                    )))
                }
            }
            RuleValue::String(r) => {
                if let RuleValue::String(l) = self {
                    Ok(RuleValue::from_bool(r.contains(l.as_str())))
                } else {
                    Err(EvalError::invalid_op(&format!(
                        "Op 'in' invalid between {} and {}",
                        lhs_type, rhs_type
                    )))
                }
            }
            _ => Err(EvalError::invalid_op(&format!(
                "Op 'in' invalid between {} and {}",
                lhs_type, rhs_type
            ))),
        }
    }

    pub fn as_type(&self) -> RuleValue {
        match self {
            RuleValue::Int(_) => RuleValue::from_type("int"),
            RuleValue::Float(_) => RuleValue::from_type("float"),
            RuleValue::Bool(_) => RuleValue::from_type("bool"),
            RuleValue::String(_) => RuleValue::from_type("str"),
            RuleValue::List(_) => RuleValue::from_type("list"),
            RuleValue::Map(_) => RuleValue::from_type("map"),
            RuleValue::Null => RuleValue::from_type("null_type"),
            RuleValue::Ident(_) => RuleValue::from_type("ident"),
            RuleValue::Type(_) => RuleValue::from_type("type"),
            RuleValue::Timestamp(_) => RuleValue::from_type("timestamp"),
            RuleValue::Duration(_) => RuleValue::from_type("duration"),
        }
    }
}

impl From<&Value> for RuleValue {
    fn from(value: &Value) -> RuleValue {
        match value {
            Value::Number(val) => {
                if let Some(val) = val.as_i64() {
                    RuleValue::from_int(val)
                } else if let Some(val) = val.as_f64() {
                    RuleValue::from_float(val)
                } else {
                    // u64 beyond i64 range; degrade to float like the
                    // JSON number model does
                    RuleValue::from_float(val.as_u64().unwrap_or_default() as f64)
                }
            }
            Value::String(val) => RuleValue::from_string(val.clone()),
            Value::Bool(val) => RuleValue::from_bool(*val),
            Value::Array(val) => {
                RuleValue::from_list(val.iter().map(RuleValue::from).collect())
            }
            Value::Null => RuleValue::from_null(),
            Value::Object(val) => {
                let mut map: HashMap<String, RuleValue> = HashMap::new();

                for (key, value) in val.iter() {
                    map.insert(key.clone(), RuleValue::from(value));
                }

                RuleValue::from_map(map)
            }
        }
    }
}

impl From<Value> for RuleValue {
    fn from(value: Value) -> RuleValue {
        RuleValue::from(&value)
    }
}

impl From<i64> for RuleValue {
    fn from(val: i64) -> RuleValue {
        RuleValue::from_int(val)
    }
}

impl From<i32> for RuleValue {
    fn from(val: i32) -> RuleValue {
        RuleValue::from_int(val as i64)
    }
}

impl TryInto<i64> for RuleValue {
    type Error = EvalError;

    fn try_into(self) -> EvalResult<i64> {
        if let RuleValue::Int(val) = self {
            return Ok(val);
        }

        Err(EvalError::internal("Conversion Error"))
    }
}

impl From<f64> for RuleValue {
    fn from(val: f64) -> RuleValue {
        RuleValue::from_float(val)
    }
}

impl TryInto<f64> for RuleValue {
    type Error = EvalError;

    fn try_into(self) -> EvalResult<f64> {
        if let RuleValue::Float(val) = self {
            return Ok(val);
        }

        Err(EvalError::internal("Conversion Error"))
    }
}

impl From<bool> for RuleValue {
    fn from(val: bool) -> RuleValue {
        RuleValue::from_bool(val)
    }
}

impl TryInto<bool> for RuleValue {
    type Error = EvalError;

    fn try_into(self) -> EvalResult<bool> {
        if let RuleValue::Bool(val) = self {
            return Ok(val);
        }

        Err(EvalError::internal("Conversion Error"))
    }
}

impl From<&str> for RuleValue {
    fn from(val: &str) -> RuleValue {
        RuleValue::from_str(val)
    }
}

impl From<String> for RuleValue {
    fn from(val: String) -> RuleValue {
        RuleValue::from_string(val)
    }
}

impl TryInto<String> for RuleValue {
    type Error = EvalError;

    fn try_into(self) -> EvalResult<String> {
        if let RuleValue::String(val) = self {
            return Ok(val);
        }

        Err(EvalError::internal("Conversion Error"))
    }
}

impl From<Vec<RuleValue>> for RuleValue {
    fn from(val: Vec<RuleValue>) -> RuleValue {
        RuleValue::from_list(val)
    }
}

impl From<HashMap<String, RuleValue>> for RuleValue {
    fn from(val: HashMap<String, RuleValue>) -> RuleValue {
        RuleValue::from_map(val)
    }
}

impl From<DateTime<Utc>> for RuleValue {
    fn from(val: DateTime<Utc>) -> RuleValue {
        RuleValue::from_timestamp(val)
    }
}

impl TryInto<DateTime<Utc>> for RuleValue {
    type Error = EvalError;

    fn try_into(self) -> EvalResult<DateTime<Utc>> {
        if let RuleValue::Timestamp(val) = self {
            return Ok(val);
        }

        Err(EvalError::internal("Conversion Error"))
    }
}

impl From<Duration> for RuleValue {
    fn from(val: Duration) -> RuleValue {
        RuleValue::from_duration(val)
    }
}

impl Add for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn add(self, rhs_val: Self) -> Self::Output {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Owned(self), Cow::Owned(rhs_val));

        match lhs.into_owned() {
            RuleValue::Int(val1) => {
                if let RuleValue::Int(val2) = rhs.into_owned() {
                    return match val1.checked_add(val2) {
                        Some(res) => Ok(RuleValue::from(res)),
                        None => Err(EvalError::value("Integer overflow in '+'")),
                    };
                }
            }
            RuleValue::Float(val1) => {
                if let RuleValue::Float(val2) = rhs.into_owned() {
                    return Ok(RuleValue::from(val1 + val2));
                }
            }
            RuleValue::String(val1) => {
                if let RuleValue::String(val2) = rhs.into_owned() {
                    let mut res = val1;
                    res.push_str(&val2);
                    return Ok(RuleValue::from_string(res));
                }
            }
            RuleValue::List(val1) => {
                if let RuleValue::List(val2) = rhs.into_owned() {
                    let mut res = val1;
                    res.extend(val2);
                    return Ok(RuleValue::from_list(res));
                }
            }
            RuleValue::Timestamp(v1) => {
                if let RuleValue::Duration(v2) = rhs.into_owned() {
                    return Ok(RuleValue::from_timestamp(v1 + v2));
                }
            }
            RuleValue::Duration(v1) => match rhs.into_owned() {
                RuleValue::Timestamp(v2) => return Ok(RuleValue::from_timestamp(v2 + v1)),
                RuleValue::Duration(v2) => return Ok(RuleValue::Duration(v1 + v2)),
                _ => {}
            },
            _ => {}
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '+' between {} and {}",
            type1, type2
        )))
    }
}

impl Sub for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn sub(self, rhs_val: Self) -> Self::Output {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Owned(self), Cow::Owned(rhs_val));

        match lhs.into_owned() {
            RuleValue::Int(val1) => {
                if let RuleValue::Int(val2) = rhs.into_owned() {
                    return match val1.checked_sub(val2) {
                        Some(res) => Ok(RuleValue::from(res)),
                        None => Err(EvalError::value("Integer overflow in '-'")),
                    };
                }
            }
            RuleValue::Float(val1) => {
                if let RuleValue::Float(val2) = rhs.into_owned() {
                    return Ok(RuleValue::from(val1 - val2));
                }
            }
            RuleValue::Timestamp(v1) => match rhs.into_owned() {
                RuleValue::Duration(v2) => return Ok(RuleValue::from_timestamp(v1 - v2)),
                RuleValue::Timestamp(v2) => return Ok(RuleValue::from_duration(v1 - v2)),
                _ => {}
            },
            RuleValue::Duration(v1) => {
                if let RuleValue::Duration(v2) = rhs.into_owned() {
                    return Ok(RuleValue::from_duration(v1 - v2));
                }
            }
            _ => {}
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '-' between {} and {}",
            type1, type2
        )))
    }
}

impl Mul for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn mul(self, rhs_val: Self) -> Self::Output {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Owned(self), Cow::Owned(rhs_val));

        match lhs.into_owned() {
            RuleValue::Int(val1) => {
                if let RuleValue::Int(val2) = rhs.into_owned() {
                    return match val1.checked_mul(val2) {
                        Some(res) => Ok(RuleValue::from(res)),
                        None => Err(EvalError::value("Integer overflow in '*'")),
                    };
                }
            }
            RuleValue::Float(val1) => {
                if let RuleValue::Float(val2) = rhs.into_owned() {
                    return Ok(RuleValue::from(val1 * val2));
                }
            }
            _ => {}
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '*' between {} and {}",
            type1, type2
        )))
    }
}

impl Div for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn div(self, rhs_val: Self) -> Self::Output {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Owned(self), Cow::Owned(rhs_val));

        match lhs.into_owned() {
            RuleValue::Int(val1) => {
                if let RuleValue::Int(val2) = rhs.into_owned() {
                    if val2.is_zero() {
                        return Err(EvalError::value("Division by zero"));
                    }
                    return match val1.checked_div(val2) {
                        Some(res) => Ok(RuleValue::from(res)),
                        None => Err(EvalError::value("Integer overflow in '/'")),
                    };
                }
            }
            RuleValue::Float(val1) => {
                if let RuleValue::Float(val2) = rhs.into_owned() {
                    if val2.is_zero() {
                        return Err(EvalError::value("Division by zero"));
                    }
                    return Ok(RuleValue::from(val1 / val2));
                }
            }
            _ => {}
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '/' between {} and {}",
            type1, type2
        )))
    }
}

impl Rem for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn rem(self, rhs_val: Self) -> Self::Output {
        let type1 = self.as_type();
        let type2 = rhs_val.as_type();

        let (lhs, rhs) = RuleValue::type_prop(Cow::Owned(self), Cow::Owned(rhs_val));

        if let RuleValue::Int(val1) = lhs.into_owned() {
            if let RuleValue::Int(val2) = rhs.into_owned() {
                if val2.is_zero() {
                    return Err(EvalError::value("Modulo by zero"));
                }
                return match val1.checked_rem(val2) {
                    Some(res) => Ok(RuleValue::from(res)),
                    None => Err(EvalError::value("Integer overflow in '%'")),
                };
            }
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '%' between {} and {}",
            type1, type2
        )))
    }
}

impl Neg for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn neg(self) -> Self::Output {
        let type1 = self.as_type();

        match self {
            RuleValue::Int(val1) => {
                return match val1.checked_neg() {
                    Some(res) => Ok(RuleValue::from(res)),
                    None => Err(EvalError::value("Integer overflow in '-'")),
                }
            }
            RuleValue::Float(val1) => return Ok(RuleValue::from(-val1)),
            RuleValue::Duration(val1) => return Ok(RuleValue::from_duration(-val1)),
            _ => {}
        }

        Err(EvalError::invalid_op(&format!(
            "Invalid op '-' on {}",
            type1
        )))
    }
}

impl Not for RuleValue {
    type Output = EvalResult<RuleValue>;

    fn not(self) -> Self::Output {
        Ok((!self.is_truthy()).into())
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RuleValue::*;
        match self {
            Int(val) => write!(f, "{}", val),
            Float(val) => write!(f, "{}", val),
            Bool(val) => write!(f, "{}", val),
            String(val) => write!(f, "\"{}\"", val),
            List(val) => write!(f, "{:?}", val),
            Map(val) => write!(f, "{:?}", val),
            Null => write!(f, "null"),
            Ident(val) => write!(f, "{}", val),
            Type(val) => write!(f, "{}", val),
            Timestamp(val) => write!(f, "{}", val),
            Duration(val) => write!(f, "{}", val),
        }
    }
}

#[cfg(test)]
mod test {
    use super::RuleValue;

    #[test]
    fn test_add() {
        let res = RuleValue::from(4i64) + RuleValue::from(5i64);

        assert!(res.is_ok());
        let val: i64 = res.ok().unwrap().try_into().unwrap();
        assert!(val == 9);
    }

    #[test]
    fn test_mixed_add_promotes() {
        let res = (RuleValue::from(3i64) + RuleValue::from(4.5)).unwrap();

        assert_eq!(res, RuleValue::Float(7.5));
    }

    #[test]
    fn test_string_concat() {
        let res = (RuleValue::from("foo") + RuleValue::from("bar")).unwrap();

        assert_eq!(res, RuleValue::from("foobar"));
    }

    #[test]
    fn test_div_by_zero() {
        let res = RuleValue::from(3i64) / RuleValue::from(0i64);

        assert!(res.is_err());
    }

    #[test]
    fn test_bad_op() {
        let res = RuleValue::from(3i64) + RuleValue::from_null();

        assert!(res.is_err());
    }

    #[test]
    fn test_string_ord() {
        let res = RuleValue::from("abc").lt(&RuleValue::from("abd")).unwrap();

        assert!(res.is_true());
    }
}
