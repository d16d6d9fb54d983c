//! Interactive form input.

use dialoguer::{Confirm, Input};

use schoolhub_core::error::AppError;
use schoolhub_core::form::FormValues;
use schoolhub_core::result::AppResult;

/// Ask for every field in order, offering the current text as the initial
/// value. Blank answers are kept blank so optional fields can be skipped.
pub fn fill(fields: &[&str], current: &FormValues) -> AppResult<FormValues> {
    let mut values = current.clone();
    for field in fields {
        let answer: String = Input::new()
            .with_prompt(field.replace('_', " "))
            .with_initial_text(current.get(field))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        values.set(*field, answer);
    }
    Ok(values)
}

/// Yes/no confirmation defaulting to no.
pub fn confirm(question: &str) -> AppResult<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::internal(format!("Prompt failed: {err}"))
}
