use chrono::NaiveDate;

/// Date format used in CSV documents: DD/MM/YYYY
pub const CSV_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a strictly formatted `DD/MM/YYYY` date.
///
/// The shape is checked before parsing: two-digit day and month,
/// four-digit year, slash separators. ISO dates or unpadded dates
/// stay plain text during import.
pub fn parse_csv_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let digits = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits {
        return None;
    }
    NaiveDate::parse_from_str(value, CSV_DATE_FORMAT).ok()
}

/// Render a date for a CSV document.
pub fn format_csv_date(date: NaiveDate) -> String {
    date.format(CSV_DATE_FORMAT).to_string()
}

/// Today in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
