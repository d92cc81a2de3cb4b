use crate::error::Error;
use crate::model::SheetConfig;

/// Prefix plus the number zero-padded to at least `config.digits` digits.
pub fn format_identifier(n: u64, config: &SheetConfig) -> String {
    format!("{}{:0width$}", config.prefix, n, width = config.digits)
}

/// Identifiers for every number in `start..=end`, in ascending order.
///
/// Fails without allocating when the range holds more than `config.max_labels` numbers.
pub fn identifiers(start: u64, end: u64, config: &SheetConfig) -> Result<Vec<String>, Error> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    let count = u128::from(end - start) + 1;
    if count > config.max_labels as u128 {
        return Err(Error::RangeTooLarge {
            count,
            max: config.max_labels,
        });
    }
    Ok((start..=end).map(|n| format_identifier(n, config)).collect())
}
