use crate::commands::convert::PhonesArgs;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use brphone_core::{generate_variants, is_valid_mobile_number, PhoneReport};
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct PhoneArgs {
    pub phone: String,
}

#[derive(Debug, Serialize)]
struct ValidationDto {
    input: String,
    valid: bool,
}

pub fn variants(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let variants = generate_variants(&args.phone);

    if ctx.json {
        return print_json(&variants);
    }

    if variants.is_empty() {
        println!("no variants");
        return Ok(());
    }
    for variant in variants {
        println!("{}", variant);
    }
    Ok(())
}

pub fn validate(ctx: &Context<'_>, args: PhonesArgs) -> Result<()> {
    let items: Vec<ValidationDto> = args
        .phones
        .into_iter()
        .map(|input| {
            let valid = is_valid_mobile_number(&input);
            ValidationDto { input, valid }
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
    } else {
        for item in &items {
            let label = if item.valid { "valid" } else { "invalid" };
            println!("{}: {}", item.input, label);
        }
    }

    let invalid = items.iter().filter(|item| !item.valid).count();
    if invalid > 0 {
        return Err(invalid_input(format!(
            "{} of {} numbers are not valid mobile numbers",
            invalid,
            items.len()
        )));
    }
    Ok(())
}

pub fn inspect(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let report = PhoneReport::new(&args.phone);

    if ctx.json {
        return print_json(&report);
    }

    println!("original: {}", report.original);
    println!("kind: {}", report.kind);
    println!("matching key: {}", report.matching_key);
    println!("storage: {}", report.storage_form);
    println!("spreadsheet: {}", report.spreadsheet_form);
    println!("persistence: {}", report.persistence_form);
    println!("display: {}", report.display_form);
    println!("variants: {}", report.variants.join(", "));
    println!("valid: {}", report.is_valid);
    Ok(())
}
