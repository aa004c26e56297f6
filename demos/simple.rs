//! Named, positional and struct parameters.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use std::error::Error;
use textfmt::{format, format_args, format_simple, params, Value};

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        email: None,
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    // Struct fields by name, with an empty guard
    println!("{}", format("#${id} ${name} <${email[^no email]}>", &user)?);

    // A sequence repeats the text around it once per element
    print!("{}", format("  - ${roles[;]}\n", &user)?);
    println!("roles: {}", format("${roles[ / ;]}", &user)?);

    // Positional arguments, implicit and explicit
    let args = [Value::from("world"), Value::from(3)];
    println!("{}", format_args("Hello ${}, you have ${} new messages (${0})", &args)?);

    // Bare syntax leaves `$` alone
    let price = params!({ "item": "coffee", "cents": 350 });
    println!("{}", format_simple("{item}: ${cents[#,##0]} cents", &price)?);

    Ok(())
}
