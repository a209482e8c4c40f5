use chrono::NaiveDate;
use log::{debug, warn};
use thiserror::Error as ThisError;

use roster_data::{Member, PROFILE_PICTURE_PLACEHOLDER};

use crate::columns::{is_numeric_column, COLUMNS};
use crate::datetime::{format_csv_date, parse_csv_date, today};

/// A single CSV cell after type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Date(NaiveDate),
    Number(i64),
}

/// One CSV row: column names zipped with coerced values.
pub type Row = Vec<(String, Value)>;

#[derive(ThisError, Debug)]
pub enum RowError {
    #[error("row has no usable member number")]
    MissingNumber,
}

/// Coerce a raw CSV cell.
///
/// A value in the `DD/MM/YYYY` shape becomes a date, whichever
/// column it sits in. The member number and paid-through year
/// columns are then parsed as numbers. Everything else stays
/// text, including values that fail coercion.
pub fn coerce(column: &str, raw: &str) -> Value {
    if let Some(date) = parse_csv_date(raw) {
        return Value::Date(date);
    }
    if is_numeric_column(column) && !raw.is_empty() {
        match raw.parse::<i64>() {
            Ok(number) => return Value::Number(number),
            Err(_) => {
                warn!("leaving unparseable {} value {:?} as text", column, raw);
            }
        }
    }
    Value::Text(raw.to_string())
}

/// Build a member record from a coerced row.
///
/// Imported members start with the placeholder picture, the
/// store assigns the id on insert. Unknown columns and values
/// of an unexpected type are ignored. A row without a positive
/// member number is rejected.
pub fn member_from_row(row: &Row) -> Result<Member, RowError> {
    let mut member = Member {
        added_date: today(),
        profile_picture: PROFILE_PICTURE_PLACEHOLDER.to_string(),
        ..Default::default()
    };
    let mut number = None;

    for (column, value) in row {
        match (column.as_str(), value) {
            ("name", Value::Text(text)) => member.name = text.clone(),
            ("memberNumber", Value::Number(n)) => {
                number = u32::try_from(*n).ok().filter(|n| *n > 0);
            }
            ("email", Value::Text(text)) => member.email = text.clone(),
            ("phoneNumber", Value::Text(text)) => {
                member.phone_number = text.clone()
            }
            ("occupation", Value::Text(text)) => {
                member.occupation = text.clone()
            }
            ("country", Value::Text(text)) => member.country = text.clone(),
            ("address", Value::Text(text)) => member.address = text.clone(),
            ("zipCode", Value::Text(text)) => member.zip_code = text.clone(),
            ("birthDate", Value::Date(date)) => {
                member.birth_date = Some(*date)
            }
            ("addedDate", Value::Date(date)) => member.added_date = *date,
            ("paidDate", Value::Date(date)) => member.paid_date = Some(*date),
            ("endDate", Value::Number(year)) => {
                member.end_date = i32::try_from(*year).ok().filter(|y| *y > 0);
            }
            (column, Value::Text(text)) if text.is_empty() => {
                debug!("empty {} cell", column);
            }
            (column, value) => {
                debug!("ignoring {} value {:?}", column, value);
            }
        }
    }

    member.member_number = number.ok_or(RowError::MissingNumber)?;
    Ok(member)
}

/// Render a member as CSV cells in canonical column order.
pub fn member_to_cells(member: &Member) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|column| match *column {
            "name" => member.name.clone(),
            "memberNumber" => member.member_number.to_string(),
            "email" => member.email.clone(),
            "phoneNumber" => member.phone_number.clone(),
            "occupation" => member.occupation.clone(),
            "country" => member.country.clone(),
            "address" => member.address.clone(),
            "zipCode" => member.zip_code.clone(),
            "birthDate" => {
                member.birth_date.map(format_csv_date).unwrap_or_default()
            }
            "addedDate" => format_csv_date(member.added_date),
            "paidDate" => {
                member.paid_date.map(format_csv_date).unwrap_or_default()
            }
            "endDate" => {
                member.end_date.map(|y| y.to_string()).unwrap_or_default()
            }
            _ => String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_dates_in_any_column() {
        assert_eq!(
            coerce("birthDate", "23/01/2024"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 23).unwrap())
        );
        // Date shaped values convert regardless of the column
        assert_eq!(
            coerce("name", "01/02/1999"),
            Value::Date(NaiveDate::from_ymd_opt(1999, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("memberNumber", "23"), Value::Number(23));
        assert_eq!(coerce("endDate", "2025"), Value::Number(2025));
        // Numeric content in a text column stays text
        assert_eq!(coerce("zipCode", "10179"), Value::Text("10179".into()));
    }

    #[test]
    fn test_coerce_fallback_to_text() {
        assert_eq!(
            coerce("memberNumber", "twenty"),
            Value::Text("twenty".into())
        );
        assert_eq!(
            coerce("birthDate", "2024-01-23"),
            Value::Text("2024-01-23".into())
        );
        assert_eq!(coerce("endDate", ""), Value::Text("".into()));
    }

    #[test]
    fn test_member_from_row() {
        let row: Row = vec![
            ("name".into(), Value::Text("Jane Doe".into())),
            ("memberNumber".into(), Value::Number(7)),
            ("email".into(), Value::Text("jane@doe.example".into())),
            (
                "birthDate".into(),
                Value::Date(NaiveDate::from_ymd_opt(1990, 5, 23).unwrap()),
            ),
            (
                "addedDate".into(),
                Value::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            ),
            ("endDate".into(), Value::Number(2025)),
        ];
        let member = member_from_row(&row).unwrap();
        assert_eq!(member.name, "Jane Doe");
        assert_eq!(member.member_number, 7);
        assert_eq!(member.email, "jane@doe.example");
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1990, 5, 23));
        assert_eq!(
            member.added_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(member.end_date, Some(2025));
        assert_eq!(member.profile_picture, PROFILE_PICTURE_PLACEHOLDER);
    }

    #[test]
    fn test_member_from_row_requires_number() {
        let row: Row = vec![
            ("name".into(), Value::Text("Jane Doe".into())),
            ("memberNumber".into(), Value::Text("".into())),
        ];
        assert!(matches!(
            member_from_row(&row),
            Err(RowError::MissingNumber)
        ));

        let row: Row = vec![
            ("name".into(), Value::Text("Jane Doe".into())),
            ("memberNumber".into(), Value::Number(0)),
        ];
        assert!(member_from_row(&row).is_err());
    }

    #[test]
    fn test_member_to_cells() {
        let member = Member {
            name: "Jane Doe".to_string(),
            member_number: 7,
            added_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: Some(2025),
            ..Default::default()
        };
        let cells = member_to_cells(&member);
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "Jane Doe");
        assert_eq!(cells[1], "7");
        assert_eq!(cells[9], "10/01/2024");
        // Absent optional dates render empty
        assert_eq!(cells[8], "");
        assert_eq!(cells[10], "");
        assert_eq!(cells[11], "2025");
    }
}
