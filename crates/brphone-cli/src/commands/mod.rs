use anyhow::Result;
use brphone_config::{AppConfig, OutputForm};
use brphone_core::{
    to_display_form, to_matching_key, to_persistence_form, to_spreadsheet_form, to_storage_form,
};
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod convert;
pub mod inspect;
pub mod matching;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn converter(form: OutputForm) -> fn(&str) -> String {
    match form {
        OutputForm::Key => to_matching_key,
        OutputForm::Storage => to_storage_form,
        OutputForm::Spreadsheet => to_spreadsheet_form,
        OutputForm::Display => to_display_form,
        OutputForm::Persistence => to_persistence_form,
    }
}
