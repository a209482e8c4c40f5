use thiserror::Error as ThisError;

use roster_data::{Member, MemberFilter, Query};

/// Allocator error type
#[derive(ThisError, Debug)]
pub enum NumberError {
    #[error("member repository unavailable")]
    RepositoryUnavailable(#[from] anyhow::Error),
}

/// Compute the lowest free member number from an ascending
/// sequence of assigned numbers.
///
/// A caller re-saving a record passes its current number as the
/// candidate. The candidate is adopted only if it equals the
/// position it would occupy in the ascending fill order. Otherwise
/// the first gap wins, or one past the maximum when there is none.
/// The scan always runs to completion.
pub fn lowest_free_number<I>(numbers: I, candidate: Option<u32>) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let mut next = 1;
    let mut adopted = None;
    for number in numbers {
        if adopted.is_none() && candidate == Some(next) {
            adopted = Some(next);
        }
        if number == next {
            next += 1;
        }
    }
    // The candidate may match the slot past the scanned region.
    if adopted.is_none() && candidate == Some(next) {
        adopted = Some(next);
    }
    adopted.unwrap_or(next)
}

/// Count collisions for a candidate number.
///
/// The count starts at one and is incremented for every record
/// holding the candidate, so anything greater than one means the
/// number is taken. At most one occurrence of `excluding_self` is
/// not counted, so a record keeping its own number passes.
pub fn count_collisions<I>(
    numbers: I,
    candidate: u32,
    excluding_self: Option<u32>,
) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let mut count = 1;
    let mut excluded = false;
    for number in numbers {
        if number != candidate {
            continue;
        }
        if !excluded && excluding_self == Some(number) {
            excluded = true;
            continue;
        }
        count += 1;
    }
    count
}

/// Scan the repository and compute the lowest free member number.
///
/// Pure computation over the scan snapshot, nothing is reserved.
pub async fn next_free_number<DB>(
    db: &DB,
    candidate: Option<u32>,
) -> Result<u32, NumberError>
where
    DB: Query<Member, Filter = MemberFilter> + Send + Sync,
{
    let members = db.query(&MemberFilter::default()).await?;
    let numbers = members
        .into_iter()
        .map(|m| m.member_number)
        .filter(|n| *n > 0);
    Ok(lowest_free_number(numbers, candidate))
}

/// Look up a candidate number in the repository and count
/// collisions against it.
pub async fn number_collisions<DB>(
    db: &DB,
    candidate: u32,
    excluding_self: Option<u32>,
) -> Result<u32, NumberError>
where
    DB: Query<Member, Filter = MemberFilter> + Send + Sync,
{
    let members = db
        .query(&MemberFilter {
            member_number: Some(candidate),
            ..Default::default()
        })
        .await?;
    let numbers = members.into_iter().map(|m| m.member_number);
    Ok(count_collisions(numbers, candidate, excluding_self))
}

#[cfg(test)]
mod tests {
    use super::*;

    use roster_data::{Insert, Member};
    use roster_db::Connection;

    #[test]
    fn test_lowest_free_number_gapless() {
        assert_eq!(lowest_free_number([1, 2, 3], None), 4);
        assert_eq!(lowest_free_number([], None), 1);
    }

    #[test]
    fn test_lowest_free_number_gap() {
        assert_eq!(lowest_free_number([1, 2, 4, 5], None), 3);
        assert_eq!(lowest_free_number([2, 3], None), 1);
        // The first gap wins over later ones
        assert_eq!(lowest_free_number([1, 3, 5], None), 2);
    }

    #[test]
    fn test_lowest_free_number_duplicates() {
        assert_eq!(lowest_free_number([1, 1, 2], None), 3);
    }

    #[test]
    fn test_candidate_adopted_in_fill_order() {
        // Candidate sits exactly in the first gap
        assert_eq!(lowest_free_number([1, 2, 4], Some(3)), 3);
        // Candidate is one past the maximum
        assert_eq!(lowest_free_number([1, 2, 3], Some(4)), 4);
        // A record keeping its own contiguous number
        assert_eq!(lowest_free_number([1, 2, 3, 4, 5], Some(5)), 5);
    }

    #[test]
    fn test_candidate_rejected_off_fill_order() {
        // Candidate does not match any scan position, the final
        // computed value is used instead.
        assert_eq!(lowest_free_number([2, 5], Some(5)), 1);
        assert_eq!(lowest_free_number([1, 2, 3], Some(7)), 4);
    }

    #[test]
    fn test_count_collisions() {
        assert_eq!(count_collisions([1, 2, 3], 5, None), 1);
        assert_eq!(count_collisions([1, 2, 3], 2, None), 2);
        assert_eq!(count_collisions([2, 2, 3], 2, None), 3);
    }

    #[test]
    fn test_count_collisions_excluding_self() {
        // A member re-using its own number is not a collision
        assert_eq!(count_collisions([1, 2, 3], 2, Some(2)), 1);
        // But a second record with the same number still is
        assert_eq!(count_collisions([1, 2, 2], 2, Some(2)), 2);
        // Excluding an unrelated number changes nothing
        assert_eq!(count_collisions([1, 2, 3], 2, Some(9)), 2);
    }

    async fn insert_numbered(db: &Connection, numbers: &[u32]) {
        for number in numbers {
            db.insert(Member {
                name: format!("Member {}", number),
                member_number: *number,
                ..Default::default()
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_next_free_number() {
        let db = Connection::open_test().await;
        insert_numbered(&db, &[1, 2, 4]).await;

        let number = next_free_number(&db, None).await.unwrap();
        assert_eq!(number, 3);
    }

    #[tokio::test]
    async fn test_next_free_number_skips_unassigned() {
        let db = Connection::open_test().await;
        // A record without a number does not occupy a slot
        insert_numbered(&db, &[0, 1, 2]).await;

        let number = next_free_number(&db, None).await.unwrap();
        assert_eq!(number, 3);
    }

    #[tokio::test]
    async fn test_number_collisions_against_store() {
        let db = Connection::open_test().await;
        insert_numbered(&db, &[1, 2, 3]).await;

        assert_eq!(number_collisions(&db, 7, None).await.unwrap(), 1);
        assert_eq!(number_collisions(&db, 2, None).await.unwrap(), 2);
        assert_eq!(number_collisions(&db, 2, Some(2)).await.unwrap(), 1);
    }
}
