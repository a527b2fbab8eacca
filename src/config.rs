//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;
use chrono::format::{Item, StrftimeItems};

use crate::error::InvalidDateFormat;

/// The format used when [`DISPLAY_DATE_FORMAT`] holds something chrono cannot render
pub const DEFAULT_DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// The chrono format string used when dates are printed (see [`crate::utils::print_task`]).
/// Feel free to override it with [`set_display_date_format`] when initing this library.
pub static DISPLAY_DATE_FORMAT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(DEFAULT_DISPLAY_DATE_FORMAT.to_string())));

/// Returns the current value of [`DISPLAY_DATE_FORMAT`]
pub fn display_date_format() -> String {
    match DISPLAY_DATE_FORMAT.lock() {
        Ok(format) => format.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replaces the value of [`DISPLAY_DATE_FORMAT`].
///
/// Formats containing an unknown specifier (e.g. `%Q`) are rejected and the current value is kept.
pub fn set_display_date_format<S: Into<String>>(format: S) -> Result<(), InvalidDateFormat> {
    let format = format.into();
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidDateFormat(format));
    }

    match DISPLAY_DATE_FORMAT.lock() {
        Ok(mut current) => *current = format,
        Err(poisoned) => *poisoned.into_inner() = format,
    }
    Ok(())
}
