// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use chrono::NaiveDate;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Type {
    Bool,
    Int32,
    Int64,
    Double,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn from_str(value: &str, tp: Type) -> Result<Self, ErrorKind> {
        let value = match tp {
            Type::Bool => {
                // CSV exports written by pandas use Python's literals
                let value = match value {
                    "true" | "True" | "1" => true,
                    "false" | "False" | "0" => false,
                    _ => return Err(ErrorKind::ValueConvert("Invalid literal for bool".into())),
                };

                Self::Bool(value)
            }

            Type::Int32 => {
                let value: i32 = value
                    .parse()
                    .map_err(|e: <i32 as FromStr>::Err| ErrorKind::ValueConvert(e.to_string()))?;
                Self::Int32(value)
            }

            Type::Int64 => {
                let value: i64 = value
                    .parse()
                    .map_err(|e: <i64 as FromStr>::Err| ErrorKind::ValueConvert(e.to_string()))?;
                Self::Int64(value)
            }

            Type::Double => {
                let value: f64 = value
                    .parse()
                    .map_err(|e: <f64 as FromStr>::Err| ErrorKind::ValueConvert(e.to_string()))?;
                Self::Double(value)
            }

            Type::Date => {
                let value = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|e| ErrorKind::ValueConvert(e.to_string()))?;
                Self::Date(value)
            }
        };

        Ok(value)
    }

    /// Parse a CSV cell, blank cells are missing values
    pub fn parse_cell(value: &str, tp: Type) -> Result<Option<Self>, ErrorKind> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        Self::from_str(value, tp)
            .map(Some)
            .map_err(|e| ErrorKind::ValueConvert(format!("'{}': {}", value, e)))
    }

    pub fn as_bool(&self) -> Result<bool, ErrorKind> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("bool")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ErrorKind> {
        match self {
            Self::Int32(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("i32")),
        }
    }

    pub fn as_i64(&self) -> Result<i64, ErrorKind> {
        match self {
            Self::Int64(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("i64")),
        }
    }

    pub fn as_f64(&self) -> Result<f64, ErrorKind> {
        match self {
            Self::Double(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("f64")),
        }
    }

    pub fn as_date(&self) -> Result<NaiveDate, ErrorKind> {
        match self {
            Self::Date(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("date")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use assert_approx_eq::*;

    #[test]
    fn casting_python_bools() -> Result<(), Error> {
        assert!(Value::from_str("True", Type::Bool)?.as_bool()?);
        assert!(!Value::from_str("False", Type::Bool)?.as_bool()?);
        assert!(Value::from_str("yes", Type::Bool).is_err());

        Ok(())
    }

    #[test]
    fn casting_i32() -> Result<(), Error> {
        let value = Value::from_str("862", Type::Int32)?;
        assert_eq!(value.as_i32()?, 862);

        // Shifted columns in the metadata put dates where ids should be
        assert!(Value::from_str("2012-09-29", Type::Int32).is_err());

        Ok(())
    }

    #[test]
    fn casting_i64() -> Result<(), Error> {
        let value = Value::from_str("30000000", Type::Int64)?;
        assert_eq!(value.as_i64()?, 30_000_000);

        Ok(())
    }

    #[test]
    fn casting_f64() -> Result<(), Error> {
        let value = Value::from_str("21.946943", Type::Double)?;
        assert_approx_eq!(value.as_f64()?, 21.946943);

        Ok(())
    }

    #[test]
    fn casting_date() -> Result<(), Error> {
        let value = Value::from_str("1995-10-30", Type::Date)?;
        assert_eq!(value.as_date()?, NaiveDate::from_ymd(1995, 10, 30));
        assert!(Value::from_str("1995-13-30", Type::Date).is_err());

        Ok(())
    }

    #[test]
    fn blank_cells_are_missing() -> Result<(), Error> {
        assert_eq!(Value::parse_cell("", Type::Double)?, None);
        assert_eq!(Value::parse_cell("   ", Type::Date)?, None);
        assert_eq!(
            Value::parse_cell(" 81.0 ", Type::Double)?,
            Some(Value::Double(81.0))
        );

        Ok(())
    }

    #[test]
    fn wrong_accessor_fails() -> Result<(), Error> {
        let value = Value::from_str("12", Type::Int64)?;
        assert!(value.as_i32().is_err());
        assert!(value.as_date().is_err());

        Ok(())
    }
}
