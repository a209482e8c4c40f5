use csv::{ReaderBuilder, Trim};
use log::warn;
use thiserror::Error as ThisError;

use roster_data::{InsertBatch, Member, MemberFilter, Query};
use roster_numbers::{number_collisions, NumberError};

use crate::row::{coerce, member_from_row, Row};

/// Outcome of a bulk import.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportReport {
    /// Rows committed to the repository.
    pub imported: usize,
    /// Member numbers skipped because they were already taken.
    pub skipped: Vec<u32>,
}

/// TransferError type
#[derive(ThisError, Debug)]
pub enum TransferError {
    #[error("import aborted, committed {committed} of {staged} staged rows")]
    PartialImport {
        staged: usize,
        committed: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("malformed csv document")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Parse a CSV document into coerced rows.
///
/// The first row is the header. Short rows keep their trailing
/// columns as empty text, blank lines are dropped, unreadable
/// records are logged and skipped.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> =
        reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = vec![];
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping unreadable csv record: {}", err);
                continue;
            }
        };
        let row = headers
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let raw = record.get(i).unwrap_or("");
                (column.clone(), coerce(column, raw))
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Merge a CSV document into the member repository.
///
/// Rows whose member number is already stored are skipped, the
/// rest is staged and committed as one batch. Rows are only
/// checked against persisted numbers, two rows inside the same
/// document may share a number. A repository failure mid-loop
/// stops processing but still commits what was staged.
pub async fn import_members<DB>(
    db: &DB,
    text: &str,
) -> Result<ImportReport, TransferError>
where
    DB: Query<Member, Filter = MemberFilter>
        + InsertBatch<Member>
        + Send
        + Sync,
{
    let rows = parse_rows(text)?;

    let mut staged: Vec<Member> = vec![];
    let mut skipped: Vec<u32> = vec![];
    let mut aborted: Option<NumberError> = None;

    for row in rows {
        let member = match member_from_row(&row) {
            Ok(member) => member,
            Err(err) => {
                warn!("skipping import row: {}", err);
                continue;
            }
        };
        match number_collisions(db, member.member_number, None).await {
            Ok(count) if count > 1 => skipped.push(member.member_number),
            Ok(_) => staged.push(member),
            Err(err) => {
                aborted = Some(err);
                break;
            }
        }
    }

    let staged_count = staged.len();
    let committed = db.insert_batch(staged).await?;
    if let Some(source) = aborted {
        return Err(TransferError::PartialImport {
            staged: staged_count,
            committed,
            source: source.into(),
        });
    }

    Ok(ImportReport {
        imported: committed,
        skipped,
    })
}
