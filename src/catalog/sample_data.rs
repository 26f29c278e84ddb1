//! Fixed in-memory sample data sets used by the filter demos.
//!
//! The reference "now" is pinned so recency facets evaluate the same way
//! every run.

use chrono::NaiveDate;

use crate::filter::record::{Record, RecordSet};

/// The pinned "today" the sample data was authored against.
#[must_use]
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 12).expect("valid literal date")
}

fn user(
    name: &str,
    email: &str,
    city: &str,
    address: &str,
    shoe_size: f64,
    last_updated: (i32, u32, u32),
) -> Record {
    let (y, m, d) = last_updated;
    Record::new()
        .with("name", name)
        .with("email", email)
        .with("city", city)
        .with("address", address)
        .with("shoe_size", shoe_size)
        .with(
            "last_updated",
            NaiveDate::from_ymd_opt(y, m, d).expect("valid literal date"),
        )
}

/// The user table from the filter demo: eight rows, mixed field types.
#[must_use]
pub fn sample_users() -> RecordSet {
    RecordSet::new(vec![
        user(
            "Alex Johnson",
            "alex.j@example.com",
            "New York",
            "123 Broadway Ave",
            9.0,
            (2024, 3, 10),
        ),
        user(
            "Sarah Connor",
            "sarah.c@skynet.net",
            "Los Angeles",
            "456 Cyberdyne Ln",
            7.0,
            (2024, 3, 9),
        ),
        user(
            "Michael Smith",
            "mike.smith@work.org",
            "Chicago",
            "789 Windy City Blvd",
            10.0,
            (2024, 2, 15),
        ),
        user(
            "Emily Davis",
            "emily.d@school.edu",
            "Boston",
            "321 Harvard Sq",
            6.0,
            (2024, 3, 1),
        ),
        user(
            "David Brown",
            "david.b@startup.io",
            "San Francisco",
            "654 Market St",
            11.0,
            (2024, 3, 12),
        ),
        user(
            "Jessica Wilson",
            "jess.w@creative.design",
            "Austin",
            "987 6th St",
            8.0,
            (2024, 1, 20),
        ),
        user(
            "Chris Lee",
            "chris.lee@tech.corp",
            "Seattle",
            "159 Pike Pl",
            9.0,
            (2024, 3, 11),
        ),
        user(
            "Pat Taylor",
            "pat.t@freelance.net",
            "Portland",
            "753 Burnside St",
            8.0,
            (2024, 2, 28),
        ),
    ])
}

/// Every field a sample user row carries.
pub const USER_FIELDS: [&str; 6] = [
    "name",
    "email",
    "city",
    "address",
    "shoe_size",
    "last_updated",
];

/// Fields the global search of the filter demo spans.
#[must_use]
pub fn user_search_fields() -> Vec<String> {
    ["name", "email", "city", "address"]
        .iter()
        .map(ToString::to_string)
        .collect()
}
