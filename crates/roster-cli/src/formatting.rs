use chrono::Datelike;

use roster_data::Member;
use roster_transfer::datetime;

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "None".to_string(),
    }
}

fn fmt_year(year: Option<i32>) -> String {
    match year {
        Some(year) => year.to_string(),
        None => "unpaid".to_string(),
    }
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Number:\t\t\t{}", self.member_number);
        println!("Email:\t\t\t{}", self.email);
        println!("Phone:\t\t\t{}", self.phone_number);
        println!("Occupation:\t\t{}", self.occupation);
        println!("Country:\t\t{}", self.country);
        println!("Address:\t\t{}", self.address);
        println!("Zip Code:\t\t{}", self.zip_code);
        println!("Birth Date:\t\t{}", fmt_date(self.birth_date));
        println!("Added:\t\t\t{}", self.added_date);
        println!("Last Payment:\t\t{}", fmt_date(self.paid_date));
        println!("Paid Through:\t\t{}", fmt_year(self.end_date));
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_number = next_attr!(old, new, member_number);
        println!("Number:\t\t\t{}{}", old.member_number, next_number);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t\t{}{}", old.email, next_email);
        let next_phone = next_attr!(old, new, phone_number);
        println!("Phone:\t\t\t{}{}", old.phone_number, next_phone);
        let next_occupation = next_attr!(old, new, occupation);
        println!("Occupation:\t\t{}{}", old.occupation, next_occupation);
        let next_country = next_attr!(old, new, country);
        println!("Country:\t\t{}{}", old.country, next_country);
        let next_address = next_attr!(old, new, address);
        println!("Address:\t\t{}{}", old.address, next_address);
        let next_zip = next_attr!(old, new, zip_code);
        println!("Zip Code:\t\t{}{}", old.zip_code, next_zip);

        let birth_old = fmt_date(old.birth_date);
        let birth_new = fmt_date(new.birth_date);
        let next_birth = next_attr!(birth_old, birth_new);
        println!("Birth Date:\t\t{}{}", birth_old, next_birth);

        let paid_old = fmt_date(old.paid_date);
        let paid_new = fmt_date(new.paid_date);
        let next_paid = next_attr!(paid_old, paid_new);
        println!("Last Payment:\t\t{}{}", paid_old, next_paid);

        let end_old = fmt_year(old.end_date);
        let end_new = fmt_year(new.end_date);
        let next_end = next_attr!(end_old, end_new);
        println!("Paid Through:\t\t{}{}", end_old, next_end);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        let year = datetime::today().year();
        println!(
            "{:>4}\t{:>6}\t{:<24}\t{:<30}\t{:<16}\t{:<10}\t{}\t{}",
            "ID",
            "No.",
            "Name",
            "Email",
            "Phone",
            "Added",
            "Paid Through",
            "Unpaid"
        );
        println!("{:-<140}", "-");

        for member in self {
            let unpaid = if member.is_paid_for(year) { "" } else { "*" };
            println!(
                "{:>4}\t{:>6}\t{:<24}\t{:<30}\t{:<16}\t{:<10}\t{:>12}\t{:>}",
                member.id,
                member.member_number,
                member.name,
                member.email,
                member.phone_number,
                member.added_date,
                fmt_year(member.end_date),
                unpaid
            );
        }
    }
}
