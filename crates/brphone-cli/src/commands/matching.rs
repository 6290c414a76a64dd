use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{read_table, Table};
use anyhow::Result;
use brphone_config::SHEET_COLUMN_HINT;
use brphone_core::{MatchStats, PhoneIndex};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Spreadsheet export (CSV) holding the lead records
    #[arg(long)]
    pub sheet: PathBuf,
    /// Conversation export (CSV) holding one chat phone per row
    #[arg(long)]
    pub conversations: PathBuf,
    /// Phone column of the sheet; detected by name when omitted
    #[arg(long)]
    pub sheet_column: Option<String>,
    #[arg(long)]
    pub phone_column: Option<String>,
    /// Only accept exact variant matches
    #[arg(long)]
    pub no_last8: bool,
}

#[derive(Debug, Serialize)]
struct MatchRowDto<'a> {
    phone: &'a str,
    match_type: &'static str,
    sheet_row: Option<usize>,
    sheet_phone: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct MatchDto<'a> {
    rows: Vec<MatchRowDto<'a>>,
    stats: MatchStats,
    match_rate: f64,
}

pub fn match_phones(ctx: &Context<'_>, args: MatchArgs) -> Result<()> {
    let sheet = read_table(&args.sheet)?;
    let sheet_column = match args
        .sheet_column
        .or_else(|| ctx.config.matching.sheet_column.clone())
    {
        Some(name) => require_column(&sheet, &name)?,
        None => sheet.find_column(SHEET_COLUMN_HINT).ok_or_else(|| {
            invalid_input(format!(
                "no column containing {:?} in {}",
                SHEET_COLUMN_HINT,
                sheet.path.display()
            ))
        })?,
    };

    let conversations = read_table(&args.conversations)?;
    let phone_column_name = args
        .phone_column
        .unwrap_or_else(|| ctx.config.matching.phone_column.clone());
    let phone_column = require_column(&conversations, &phone_column_name)?;

    let sheet_phones: Vec<&str> = sheet.values(sheet_column).collect();
    let last8 = ctx.config.matching.last8_fallback && !args.no_last8;
    let index = PhoneIndex::build(&sheet_phones).with_last8(last8);
    debug!(
        column = sheet.header(sheet_column),
        records = sheet.row_count(),
        variants = index.variant_count(),
        last8,
        "sheet indexed"
    );

    let report = index.match_all(conversations.values(phone_column));
    let stats = report.stats;
    info!(
        exact = stats.exact,
        last8 = stats.last8,
        unmatched = stats.unmatched,
        "matching complete"
    );

    let rows: Vec<MatchRowDto<'_>> = report
        .outcomes
        .iter()
        .map(|outcome| {
            let sheet_row = outcome.matched.map(|found| found.record);
            MatchRowDto {
                phone: &outcome.input,
                match_type: outcome.match_type(),
                sheet_row,
                sheet_phone: sheet_row.map(|row| sheet_phones[row]),
            }
        })
        .collect();

    if ctx.json {
        return print_json(&MatchDto {
            rows,
            stats,
            match_rate: stats.match_rate(),
        });
    }

    for row in &rows {
        println!(
            "{}\t{}\t{}",
            row.phone,
            row.match_type,
            row.sheet_phone.unwrap_or("")
        );
    }
    eprintln!(
        "exact: {}, last8: {}, unmatched: {}, match rate: {:.1}%",
        stats.exact,
        stats.last8,
        stats.unmatched,
        stats.match_rate()
    );
    Ok(())
}

fn require_column(table: &Table, name: &str) -> Result<usize> {
    table.column(name).ok_or_else(|| {
        invalid_input(format!(
            "column {:?} not found in {}",
            name,
            table.path.display()
        ))
    })
}
