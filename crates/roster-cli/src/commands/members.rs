use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use roster_data::{
    Delete, Insert, Member, MemberFilter, Query, Retrieve, Update,
    UpdateNumber,
};
use roster_db::Connection;
use roster_numbers::{next_free_number, number_collisions};
use roster_transfer::datetime;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(long)]
    pub number: Option<u32>,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            id: self.id,
            member_number: self.number,
            name: self.name,
            email: self.email,
        };

        let members: Vec<Member> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    /// Member number, the lowest free number is assigned
    /// when omitted
    #[clap(long)]
    pub number: Option<u32>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub occupation: Option<String>,
    #[clap(short, long)]
    pub country: Option<String>,
    #[clap(short, long)]
    pub address: Option<String>,
    #[clap(short, long)]
    pub zip_code: Option<String>,
    #[clap(long)]
    pub birth_date: Option<NaiveDate>,
    /// Year the membership is paid through, stamps the payment
    /// date with today
    #[clap(long)]
    pub paid_through: Option<i32>,
}

impl AddMember {
    /// Run the command and add a member to the registry
    pub async fn run(self, db: &Connection) -> Result<()> {
        let paid_date = self.paid_through.map(|_| datetime::today());
        let member = Member {
            name: self.name,
            member_number: self.number.unwrap_or(0),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone.unwrap_or_default(),
            occupation: self.occupation.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            zip_code: self.zip_code.unwrap_or_default(),
            birth_date: self.birth_date,
            added_date: datetime::today(),
            paid_date,
            end_date: self.paid_through,
            ..Default::default()
        };
        member.validate()?;

        // A manually chosen number must not collide with a
        // stored record.
        if let Some(number) = self.number {
            let collisions = number_collisions(db, number, None).await?;
            if collisions > 1 {
                return Err(anyhow!(
                    "Member number {} is already taken.",
                    number
                ));
            }
        }

        println!();
        member.print_formatted();
        println!();

        // Confirm adding member
        let confirm = Confirm::new("Add member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        let member = if member.has_number() {
            member
        } else {
            let number = next_free_number(db, None).await?;
            db.update_number(member.id, number).await?
        };
        println!(
            "Member added with id {} and number {}.",
            member.id, member.member_number
        );

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    /// Member number, checked against the stored records
    #[clap(long)]
    pub number: Option<u32>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub occupation: Option<String>,
    #[clap(short, long)]
    pub country: Option<String>,
    #[clap(short, long)]
    pub address: Option<String>,
    #[clap(short, long)]
    pub zip_code: Option<String>,
    #[clap(long)]
    pub birth_date: Option<NaiveDate>,
    /// Year the membership is paid through, stamps the payment
    /// date with today
    #[clap(long)]
    pub paid_through: Option<i32>,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(email) = self.email {
            update.email = email;
        }
        if let Some(phone) = self.phone {
            update.phone_number = phone;
        }
        if let Some(occupation) = self.occupation {
            update.occupation = occupation;
        }
        if let Some(country) = self.country {
            update.country = country;
        }
        if let Some(address) = self.address {
            update.address = address;
        }
        if let Some(zip_code) = self.zip_code {
            update.zip_code = zip_code;
        }
        if let Some(birth_date) = self.birth_date {
            update.birth_date = Some(birth_date);
        }
        if let Some(year) = self.paid_through {
            update.end_date = Some(year);
            update.paid_date = Some(datetime::today());
        }
        if let Some(number) = self.number {
            let collisions =
                number_collisions(db, number, Some(member.member_number))
                    .await?;
            if collisions > 1 {
                return Err(anyhow!(
                    "Member number {} is already taken.",
                    number
                ));
            }
            update.member_number = number;
        }
        update.validate()?;

        println!();
        (member.clone(), update.clone()).print_formatted();
        println!();
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let update = db.update(update).await?;

        // Re-saving without an explicit number keeps the current
        // number only while it matches its slot in the ascending
        // fill order, otherwise the lowest free number is taken.
        if self.number.is_none() {
            let current = update.member_number;
            let candidate = if current > 0 { Some(current) } else { None };
            let assigned = next_free_number(db, candidate).await?;
            if assigned != current {
                db.update_number(update.id, assigned).await?;
                println!("Member number changed to {}.", assigned);
            }
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteMember {
    /// Run the command and delete a member. The member number
    /// returns to the pool implicitly.
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete member from registry?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.delete(member).await?;
        println!("Member deleted.");

        Ok(())
    }
}
