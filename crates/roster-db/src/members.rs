use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Connection as SqlConnection, QueryBuilder, Sqlite};

use roster_data::{
    Delete, Insert, InsertBatch, Member, MemberFilter, Query, Retrieve,
    Update, UpdateNumber,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;

    /// Query members. Results are always ordered by member
    /// number ascending.
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                member_number,
                email,
                phone_number,
                occupation,
                country,
                address,
                zip_code,
                birth_date,
                added_date,
                paid_date,
                end_date,
                profile_picture
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(number) = filter.member_number {
            qry.push(" AND member_number = ").push_bind(number);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(email) = filter.email.clone() {
            qry.push(" AND email LIKE ").push_bind(email);
        }
        qry.push(" ORDER BY member_number ASC");

        let members: Vec<Member> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

fn push_insert_values<'a>(
    qry: &mut QueryBuilder<'a, Sqlite>,
    member: &'a Member,
) {
    qry.separated(", ")
        .push_bind(&member.name)
        .push_bind(member.member_number)
        .push_bind(&member.email)
        .push_bind(&member.phone_number)
        .push_bind(&member.occupation)
        .push_bind(&member.country)
        .push_bind(&member.address)
        .push_bind(&member.zip_code)
        .push_bind(member.birth_date)
        .push_bind(member.added_date)
        .push_bind(member.paid_date)
        .push_bind(member.end_date)
        .push_bind(&member.profile_picture);
}

const INSERT_MEMBER: &str = r#"INSERT INTO members (
    name,
    member_number,
    email,
    phone_number,
    occupation,
    country,
    address,
    zip_code,
    birth_date,
    added_date,
    paid_date,
    end_date,
    profile_picture
) VALUES (
"#;

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(INSERT_MEMBER);
            push_insert_values(&mut qry, &member);
            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl InsertBatch<Member> for Connection {
    /// Insert all members within a single transaction.
    async fn insert_batch(&self, members: Vec<Member>) -> Result<usize> {
        let mut conn = self.lock().await;
        let mut tx = conn.begin().await?;
        for member in &members {
            let mut qry = QueryBuilder::<Sqlite>::new(INSERT_MEMBER);
            push_insert_values(&mut qry, member);
            qry.push(")").build().execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(members.len())
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", member_number = ")
                .push_bind(member.member_number)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", phone_number = ")
                .push_bind(&member.phone_number)
                .push(", occupation = ")
                .push_bind(&member.occupation)
                .push(", country = ")
                .push_bind(&member.country)
                .push(", address = ")
                .push_bind(&member.address)
                .push(", zip_code = ")
                .push_bind(&member.zip_code)
                .push(", birth_date = ")
                .push_bind(member.birth_date)
                .push(", added_date = ")
                .push_bind(member.added_date)
                .push(", paid_date = ")
                .push_bind(member.paid_date)
                .push(", end_date = ")
                .push_bind(member.end_date)
                .push(", profile_picture = ")
                .push_bind(&member.profile_picture)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl UpdateNumber<Member> for Connection {
    /// Assign a member number, leaving all other fields alone.
    async fn update_number(&self, id: u32, number: u32) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET member_number = ")
                .push_bind(number)
                .push(" WHERE id = ")
                .push_bind(id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
