use validator::ValidationError;

use crate::models::quiz::OPTION_COUNT;

/// Rejects empty or whitespace-only input.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Requires exactly four options, none of them blank.
pub fn four_filled_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(ValidationError::new("options_must_be_four"));
    }
    for opt in options {
        not_blank(opt)?;
        if opt.len() > 500 {
            return Err(ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Renders seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
