use crate::commands::{converter, print_json, Context};
use crate::util::read_lines;
use anyhow::Result;
use brphone_config::OutputForm;
use brphone_core::Memoized;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct PhonesArgs {
    #[arg(required = true)]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormArg {
    Key,
    Storage,
    Spreadsheet,
    Display,
    Persistence,
}

impl From<FormArg> for OutputForm {
    fn from(form: FormArg) -> Self {
        match form {
            FormArg::Key => OutputForm::Key,
            FormArg::Storage => OutputForm::Storage,
            FormArg::Spreadsheet => OutputForm::Spreadsheet,
            FormArg::Display => OutputForm::Display,
            FormArg::Persistence => OutputForm::Persistence,
        }
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Output form; defaults to `default_form` from the config file
    #[arg(long, value_enum)]
    pub form: Option<FormArg>,
    /// File with one number per line; reads stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ConversionDto {
    input: String,
    output: String,
}

pub fn convert_each(ctx: &Context<'_>, args: PhonesArgs, form: OutputForm) -> Result<()> {
    let convert = converter(form);
    let items: Vec<ConversionDto> = args
        .phones
        .into_iter()
        .map(|input| {
            let output = convert(&input);
            ConversionDto { input, output }
        })
        .collect();
    emit(ctx, &items)
}

pub fn convert_lines(ctx: &Context<'_>, args: ConvertArgs) -> Result<()> {
    let form = args
        .form
        .map(OutputForm::from)
        .unwrap_or(ctx.config.default_form);
    let lines = read_lines(args.input.as_deref())?;
    let memo = Memoized::new(converter(form), ctx.config.cache_capacity);

    let items: Vec<ConversionDto> = lines
        .into_iter()
        .map(|input| {
            let trimmed = input.trim();
            let output = if trimmed.is_empty() {
                String::new()
            } else {
                memo.call(trimmed)
            };
            ConversionDto { input, output }
        })
        .collect();

    debug!(
        ?form,
        lines = items.len(),
        cached = memo.cached_len(),
        "conversion finished"
    );
    emit(ctx, &items)
}

fn emit(ctx: &Context<'_>, items: &[ConversionDto]) -> Result<()> {
    if ctx.json {
        return print_json(&items);
    }
    for item in items {
        println!("{}", item.output);
    }
    Ok(())
}
