//! JSON, XML and URL output from the same parameters.
//!
//! Formatting problems are logged instead of failing the call. Warnings are
//! shown by default, unresolved names with:
//!
//! RUST_LOG=textfmt=trace cargo run --example encodings

use serde::Serialize;
use std::error::Error;
use textfmt::{format_with, params, Encoding, FormatOptions, Formatter};

#[derive(Debug, Serialize)]
struct Review {
    author: String,
    title: String,
    body: String,
    rating: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let review = Review {
        author: "O'Neil & Sons".to_string(),
        title: "\"Best\" <tool> ever".to_string(),
        body: "Works well.\nWould buy again.".to_string(),
        rating: 4.75,
    };

    let json = Formatter::new(FormatOptions::new().with_encoding(Encoding::Json));
    println!(
        "{}\n",
        json.format(
            "{\"author\": \"${author}\", \"title\": \"${title}\", \"body\": \"${body}\", \"rating\": ${rating[0.0]}}",
            &review,
        )?
    );

    let xml = Formatter::new(FormatOptions::new().with_encoding(Encoding::Xml));
    println!(
        "{}\n",
        xml.format(
            "<review rating=\"${rating[0.0]}\"><author>${author}</author><title>${title}</title></review>",
            &review,
        )?
    );

    // Configuration parameters fill in names the review does not have.
    let config = params!({ "site": "shop.example.org" });
    println!(
        "{}\n",
        format_with(
            Encoding::Url,
            "https://${site}/search?q=${title}&by=${author}",
            &config,
            &review,
        )?
    );

    // An invalid date pattern renders empty and logs a warning; a missing
    // name renders empty and is logged at trace level.
    let stamp = params!({ "at": "2024-03-09T14:05:00Z" });
    println!("[{}]", xml.format_value("${at[%Q]}${missing}", &stamp)?);

    Ok(())
}
