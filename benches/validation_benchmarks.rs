use criterion::{Criterion, criterion_group, criterion_main};
use datashape::datashape_collection::{Collection, EmailCollection, NumericIdCollection, OrderSpec};
use datashape::datashape_validation::*;
use datashape::{Accessors, Email, Request};
use serde_json::json;
use std::hint::black_box;

fn bench_scalar_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_filters");

    let integers = vec![json!("42"), json!("4.2"), json!(17), json!("-1")];

    group.bench_function("filter_integer", |b| {
        b.iter(|| {
            for raw in &integers {
                black_box(filter_integer(black_box(raw)));
            }
        })
    });

    group.bench_function("filter_positive_integer", |b| {
        b.iter(|| {
            for raw in &integers {
                black_box(filter_positive_integer(black_box(raw)));
            }
        })
    });

    group.bench_function("filter_float", |b| {
        b.iter(|| filter_float(black_box(&json!("3,14"))))
    });

    group.bench_function("filter_boolean", |b| {
        b.iter(|| filter_boolean(black_box(&json!("on"))))
    });

    group.bench_function("filter_uuid", |b| {
        let raw = json!("550e8400-e29b-41d4-a716-446655440000");
        b.iter(|| filter_uuid(black_box(&raw)))
    });

    group.finish();
}

fn bench_string_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_filters");

    let plain = json!("  Hello World 123  ");
    let markup = json!("<p onclick=\"x()\">Привет, <b>world</b> 漢字</p>\n");

    group.bench_function("filter_string_plain", |b| {
        b.iter(|| filter_string(black_box(&plain), false))
    });

    group.bench_function("filter_string_markup", |b| {
        b.iter(|| filter_string(black_box(&markup), false))
    });

    group.bench_function("filter_email", |b| {
        let raw = json!(" Test.User+tag@Domain.co.uk ");
        b.iter(|| filter_email(black_box(&raw)))
    });

    group.finish();
}

fn bench_date_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_filters");
    let filters = FilterSet::default();

    group.bench_function("date_valid", |b| {
        let raw = json!("2024-02-29");
        b.iter(|| filters.date(black_box(&raw)))
    });

    group.bench_function("date_invalid", |b| {
        let raw = json!("2024-02-30");
        b.iter(|| filters.date(black_box(&raw)))
    });

    group.bench_function("date_time", |b| {
        let raw = json!("2024-02-29 13:45:00");
        b.iter(|| filters.date_time(black_box(&raw)))
    });

    group.bench_function("interval_parse", |b| {
        b.iter(|| Interval::parse(black_box("+1 week 2 days 3 hours")))
    });

    group.finish();
}

fn bench_collection_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_admission");

    let addresses: Vec<Email> = (0..100)
        .map(|i| Email::parse(&format!("user{}@example.com", i % 50)).unwrap())
        .collect();

    group.bench_function("email_add_100", |b| {
        b.iter(|| {
            let mut emails = EmailCollection::new();
            for email in &addresses {
                emails.add(email.clone()).unwrap();
            }
            black_box(emails.count())
        })
    });

    let raw_ids: Vec<_> = (0..100).map(|i| json!(i.to_string())).collect();

    group.bench_function("numeric_add_raw_100", |b| {
        b.iter(|| {
            let mut ids = NumericIdCollection::new();
            for raw in &raw_ids {
                let _ = ids.add_raw(black_box(raw));
            }
            black_box(ids.count())
        })
    });

    group.finish();
}

#[derive(Clone, Accessors)]
struct Row {
    name: String,
    active: bool,
    score: i64,
}

fn bench_collection_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_queries");

    let rows: Collection<Row> = (0..500)
        .map(|i| Row {
            name: format!("row{}", i),
            active: i % 3 == 0,
            score: (i * 7919) % 101,
        })
        .collect();

    group.bench_function("with_bool", |b| {
        b.iter(|| rows.with(black_box("active"), true).unwrap().len())
    });

    group.bench_function("filter", |b| {
        b.iter(|| rows.filter(|row| row.score > 50).len())
    });

    group.bench_function("sort_by_order", |b| {
        let spec = OrderSpec::from_json(&json!({"score": "desc", "name": "asc"}));
        b.iter(|| {
            let mut sorted = rows.clone();
            sorted.sort_by_order(black_box(&spec)).unwrap();
            black_box(sorted.first().map(|row| row.score))
        })
    });

    group.finish();
}

#[derive(Request)]
struct Signup {
    #[required(key = "E-mail")]
    email: Option<String>,
    #[required]
    name: Option<String>,
    #[required]
    tags: Vec<String>,
    nickname: Option<String>,
}

fn bench_required_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("required_fields");

    let complete = Signup {
        email: Some("a@b.co".to_string()),
        name: Some("Ann".to_string()),
        tags: vec!["new".to_string()],
        nickname: None,
    };
    let empty = Signup {
        email: None,
        name: None,
        tags: Vec::new(),
        nickname: None,
    };

    group.bench_function("complete", |b| {
        b.iter(|| black_box(&complete).validate().is_success())
    });

    group.bench_function("all_missing", |b| {
        b.iter(|| black_box(&empty).validate().len())
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_scalar_filters,
    bench_string_filters,
    bench_date_filters,
    bench_collection_admission,
    bench_collection_queries,
    bench_required_fields,
);

criterion_main!(validation_benches);
