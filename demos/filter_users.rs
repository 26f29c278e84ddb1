//! Facet filtering over the sample user table.
//!
//! Run with: `cargo run --example filter_users`

use friction_lab::prelude::*;

fn print_set(label: &str, records: &RecordSet) {
    println!("{label}:");
    for record in records {
        let name = record.get("name").map(FieldValue::search_text).unwrap_or_default();
        let city = record.get("city").map(FieldValue::search_text).unwrap_or_default();
        println!("  {name:<16}  {city}");
    }
    println!();
}

fn main() {
    let users = friction_lab::catalog::sample_data::sample_users();
    let ctx = EvalContext::with_reference(friction_lab::catalog::sample_data::reference_date());

    print_set("all users", &evaluate(&users, &FilterQuery::new(), &ctx));

    let search = vec![FilterPredicate::GlobalContains {
        value: "sarah".to_string(),
        fields: friction_lab::catalog::sample_data::user_search_fields(),
    }];
    print_set("global search 'sarah'", &evaluate(&users, &search, &ctx));

    let large_recent = vec![
        FilterPredicate::CategoricalRange {
            field: "shoe_size".to_string(),
            bucket: SizeBucket::Large,
        },
        FilterPredicate::RelativeTime {
            field: "last_updated".to_string(),
            window: RecencyWindow::PastWeek,
        },
    ];
    print_set(
        "large shoe size AND updated this week",
        &evaluate(&users, &large_recent, &ctx),
    );
}
