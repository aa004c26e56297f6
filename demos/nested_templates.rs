//! Value mappings whose entries carry sub-templates.
//!
//! Each nesting level switches between `${…}` and `$(…)`, so inner
//! placeholders never need escaping. The order lines repeat the line break
//! in front of them, one per line.
//!
//! Run with: cargo run --example nested_templates

use serde::Serialize;
use std::error::Error;
use textfmt::format;

#[derive(Debug, Serialize)]
enum Status {
    Pending,
    Shipped,
    Cancelled,
}

#[derive(Debug, Serialize)]
struct Line {
    sku: String,
    qty: u32,
    price: f64,
}

#[derive(Debug, Serialize)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Debug, Serialize)]
struct Customer {
    name: String,
    address: Address,
}

#[derive(Debug, Serialize)]
struct Order {
    id: u32,
    customer: Customer,
    status: Status,
    carrier: Option<String>,
    lines: Vec<Line>,
}

const TEMPLATE: &str = concat!(
    "Order ${id} for ${customer[#*=$(name)$(address[#*=, ${city} ${zip}])]}: ",
    "${status[#Pending=waiting;Shipped=shipped;*=cancelled]}${carrier[ via ;]}\n",
    "${lines[;;#*=  $(qty) x $(sku) at $(price[#,##0.00])]}",
);

fn customer(name: &str, city: &str, zip: &str) -> Customer {
    Customer {
        name: name.to_string(),
        address: Address {
            city: city.to_string(),
            zip: zip.to_string(),
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let orders = [
        Order {
            id: 1,
            customer: customer("Alice", "Berlin", "10115"),
            status: Status::Shipped,
            carrier: Some("DHL".to_string()),
            lines: vec![
                Line {
                    sku: "PEN-01".to_string(),
                    qty: 3,
                    price: 1.5,
                },
                Line {
                    sku: "INK-07".to_string(),
                    qty: 1,
                    price: 1299.0,
                },
            ],
        },
        Order {
            id: 2,
            customer: customer("Bob", "Oslo", "0150"),
            status: Status::Pending,
            carrier: None,
            lines: vec![],
        },
        Order {
            id: 3,
            customer: customer("Carol", "Lyon", "69001"),
            status: Status::Cancelled,
            carrier: None,
            lines: vec![],
        },
    ];

    for order in &orders {
        println!("{}", format(TEMPLATE, order)?);
    }

    Ok(())
}
