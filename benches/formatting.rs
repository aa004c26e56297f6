use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use textfmt::{format, format_value, params, to_value, Encoding, FormatOptions, Formatter};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn benchmark_literal_text(c: &mut Criterion) {
    let params = params!({ "x": 1 });
    let text = "A template without any placeholders, which takes the fast path every time.";

    c.bench_function("literal_text", |b| {
        b.iter(|| format_value(black_box(text), black_box(&params)))
    });
}

fn benchmark_simple_struct(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };
    let pattern = "User ${id}: ${name} <${email}> ${active[#true=active;*=inactive]}";

    c.bench_function("format_simple_struct", |b| {
        b.iter(|| format(black_box(pattern), black_box(&user)))
    });

    let value = to_value(&user).unwrap();
    c.bench_function("format_simple_value", |b| {
        b.iter(|| format_value(black_box(pattern), black_box(&value)))
    });
}

fn benchmark_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_sequence");
    let pattern = "${items[\n;;#*=$(sku): $(name) x$(quantity) @ $(price[#,##0.00])]}";

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();
        let params = params!({ "items": products });

        group.bench_with_input(BenchmarkId::from_parameter(size), &params, |b, params| {
            b.iter(|| format_value(black_box(pattern), black_box(params)))
        });
    }
    group.finish();
}

fn benchmark_nesting(c: &mut Criterion) {
    let params = params!({ "a": { "b": { "c": { "d": "deep" } } } });
    let pattern = "${a[#*=$(b[#*=${c[#*=$(d)]}])]}";

    c.bench_function("nested_three_levels", |b| {
        b.iter(|| format_value(black_box(pattern), black_box(&params)))
    });
}

fn benchmark_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encodings");
    let params = params!({ "v": "Tom & \"Jerry\" <cartoon>\n" });

    for encoding in [Encoding::Text, Encoding::Json, Encoding::Xml, Encoding::Url] {
        let formatter = Formatter::new(FormatOptions::new().with_encoding(encoding.clone()));
        group.bench_function(encoding.as_str(), |b| {
            b.iter(|| formatter.format_value(black_box("value=${v}"), black_box(&params)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_literal_text,
    benchmark_simple_struct,
    benchmark_sequence,
    benchmark_nesting,
    benchmark_encodings
);
criterion_main!(benches);
