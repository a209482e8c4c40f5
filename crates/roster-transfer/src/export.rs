use anyhow::Result;
use csv::{QuoteStyle, WriterBuilder};

use roster_data::{Member, MemberFilter, Query};

use crate::columns::COLUMNS;
use crate::row::member_to_cells;

/// Serialize all members as a CSV document, ordered by member
/// number ascending. The output round-trips through the import
/// path, minus the picture reference.
pub async fn export_members<DB>(db: &DB) -> Result<String>
where
    DB: Query<Member, Filter = MemberFilter> + Send + Sync,
{
    let members = db.query(&MemberFilter::default()).await?;
    render_csv(&members)
}

/// Render members as CSV with every value quoted.
pub fn render_csv(members: &[Member]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);
    writer.write_record(COLUMNS)?;
    for member in members {
        writer.write_record(member_to_cells(member))?;
    }
    let data = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("csv write failed: {}", err))?;
    Ok(String::from_utf8(data)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_render_csv() {
        let members = vec![
            Member {
                name: "Jane Doe".to_string(),
                member_number: 1,
                email: "jane@doe.example".to_string(),
                address: "123 Main St, Apt 4".to_string(),
                added_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                end_date: Some(2025),
                ..Default::default()
            },
            Member {
                name: "John Roe".to_string(),
                member_number: 2,
                added_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                ..Default::default()
            },
        ];
        let data = render_csv(&members).unwrap();
        let mut lines = data.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"name\",\"memberNumber\",\"email\",\"phoneNumber\",\
             \"occupation\",\"country\",\"address\",\"zipCode\",\
             \"birthDate\",\"addedDate\",\"paidDate\",\"endDate\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Jane Doe\",\"1\",\"jane@doe.example\",\"\",\"\",\"\",\
             \"123 Main St, Apt 4\",\"\",\"\",\"10/01/2024\",\"\",\"2025\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"John Roe\",\"2\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\
             \"01/06/2023\",\"\",\"\""
        );
        assert_eq!(lines.next(), None);
        // The picture reference is not exported
        assert!(!data.contains("placeholder://"));
    }

    #[test]
    fn test_render_csv_empty() {
        let data = render_csv(&[]).unwrap();
        assert_eq!(data.lines().count(), 1);
    }
}
