//! Randomized user records for registration scenarios
//!
//! Every scenario gets a fresh [`UserRecord`]; nothing is persisted between
//! runs. The record is partitioned into the three sequential form steps:
//! initial signup, account information, and address information.

use chrono::{Datelike, Days, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, SecondaryAddress, StateName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Password;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Email provider domain for generated accounts. Kept off real providers so a
/// stray confirmation email never lands anywhere.
const EMAIL_PROVIDER: &str = "fakermail.com";

/// Registration falls back to a known-valid country option; the storefront's
/// country dropdown is a short fixed list and other generated values may not
/// appear in it.
const COUNTRY: &str = "United States";

/// Name and email for the initial signup form.
#[derive(Debug, Clone, Serialize)]
pub struct InitialSignup {
    pub name: String,
    pub email: String,
}

/// Credentials, birthdate, and preference flags for the account information
/// section.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalData {
    pub password: String,
    /// Birth day/month/year as dropdown option values. Month is 1-based to
    /// match the form, corrected once from the zero-based source.
    pub day: String,
    pub month: String,
    pub year: String,
    pub newsletter: bool,
    pub optin: bool,
}

/// Address and contact details for the address information section.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingInformation {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zipcode: String,
    pub mobile_number: String,
}

/// A complete user record for one registration run.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub initial_signup: InitialSignup,
    pub personal: PersonalData,
    pub shipping: ShippingInformation,
}

impl UserRecord {
    /// Generate a fresh, schema-valid record.
    ///
    /// The email is made unique per run with a uuid suffix; the birthdate is
    /// drawn so the resulting age is always within [18, 65] regardless of the
    /// current date; first/last name are shared between the identity and
    /// shipping groups the way a real registrant would fill them.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();

        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();

        // 6588 days clears 18 years across any leap-day layout; 23725 stays
        // under 65 years the same way.
        let birth = Utc::now().date_naive() - Days::new(rng.gen_range(6588..23725));

        let company: String = CompanyName().fake();
        let address2: String = SecondaryAddress().fake();

        Self {
            initial_signup: InitialSignup {
                name: format!("{first_name} {last_name}"),
                email: unique_email(&first_name, &last_name),
            },
            personal: PersonalData {
                password: format!("Pass!1{}", Password(8..13).fake::<String>()),
                day: birth.day().to_string(),
                month: (birth.month0() + 1).to_string(),
                year: birth.year().to_string(),
                newsletter: rng.gen_bool(0.5),
                optin: rng.gen_bool(0.5),
            },
            shipping: ShippingInformation {
                first_name,
                last_name,
                company: Some(company),
                address1: format!(
                    "{} {}",
                    BuildingNumber().fake::<String>(),
                    StreetName().fake::<String>()
                ),
                address2: Some(address2),
                country: COUNTRY.to_string(),
                state: StateName().fake(),
                city: CityName().fake(),
                zipcode: ZipCode().fake(),
                mobile_number: NumberWithFormat("##########").fake(),
            },
        }
    }
}

/// Build a syntactically valid, per-run-unique address on the fake provider.
fn unique_email(first: &str, last: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}.{}.{}@{}",
        email_local(first),
        email_local(last),
        &suffix[..8],
        EMAIL_PROVIDER
    )
}

/// Lowercase and strip anything a mail local-part would reject (generated
/// names can contain apostrophes or spaces).
fn email_local(part: &str) -> String {
    let cleaned: String = part
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if cleaned.is_empty() {
        "user".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn email_is_well_formed() {
        let re = Regex::new(r"^[a-z0-9.]+@[a-z0-9.]+\.[a-z]{2,}$").unwrap();
        for _ in 0..50 {
            let record = UserRecord::random();
            assert!(
                re.is_match(&record.initial_signup.email),
                "bad email: {}",
                record.initial_signup.email
            );
        }
    }

    #[test]
    fn email_is_unique_across_a_run() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let record = UserRecord::random();
            assert!(
                seen.insert(record.initial_signup.email.clone()),
                "duplicate email: {}",
                record.initial_signup.email
            );
        }
    }

    #[test]
    fn email_local_strips_awkward_characters() {
        assert_eq!(email_local("O'Conner"), "oconner");
        assert_eq!(email_local("De La Cruz"), "delacruz");
        assert_eq!(email_local("''"), "user");
    }

    #[test]
    fn birthdate_age_stays_within_bounds() {
        let today = Utc::now().date_naive();
        for _ in 0..100 {
            let record = UserRecord::random();
            let month: u32 = record.personal.month.parse().unwrap();
            assert!((1..=12).contains(&month), "month out of range: {month}");

            let birth = NaiveDate::from_ymd_opt(
                record.personal.year.parse().unwrap(),
                month,
                record.personal.day.parse().unwrap(),
            )
            .expect("generated birthdate must be a real calendar date");

            let age_days = (today - birth).num_days();
            // 18 and 65 years in days, conservatively bracketed
            assert!(age_days >= 18 * 365, "younger than 18: {age_days} days");
            assert!(age_days <= 65 * 366, "older than 65: {age_days} days");
        }
    }

    #[test]
    fn mobile_number_is_ten_digits() {
        for _ in 0..20 {
            let record = UserRecord::random();
            let number = &record.shipping.mobile_number;
            assert_eq!(number.len(), 10, "bad length: {number}");
            assert!(number.chars().all(|c| c.is_ascii_digit()), "bad digits: {number}");
        }
    }

    #[test]
    fn required_fields_are_non_empty() {
        let record = UserRecord::random();
        let shipping = &record.shipping;
        for (name, value) in [
            ("first_name", &shipping.first_name),
            ("last_name", &shipping.last_name),
            ("address1", &shipping.address1),
            ("country", &shipping.country),
            ("state", &shipping.state),
            ("city", &shipping.city),
            ("zipcode", &shipping.zipcode),
        ] {
            assert!(!value.trim().is_empty(), "{name} is blank");
        }
        assert!(!record.personal.password.is_empty());
        assert!(record.personal.password.len() >= 12);
    }

    #[test]
    fn shipping_name_matches_identity() {
        let record = UserRecord::random();
        assert_eq!(
            record.initial_signup.name,
            format!("{} {}", record.shipping.first_name, record.shipping.last_name)
        );
    }
}
