//! Shared helpers for command handlers.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use suraksha_core::view::{CategoryFilter, ListFilter};

use crate::cli::FilterArgs;
use crate::error::CliError;

/// Build a list filter from `--search` / `--status`.
pub fn list_filter<C>(args: &FilterArgs) -> Result<ListFilter<C>, CliError>
where
    C: Copy + PartialEq + FromStr + IntoEnumIterator + fmt::Display,
{
    let category = CategoryFilter::parse("status", &args.status)?;
    Ok(ListFilter::new(args.search.clone(), category))
}

/// `-` for absent optional text.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Comma-join a list, `-` when empty.
pub fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".into();
    }
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use suraksha_core::DeviceStatus;

    use super::*;

    fn filter_args(search: &str, status: &str) -> FilterArgs {
        FilterArgs {
            search: search.into(),
            status: status.into(),
        }
    }

    #[test]
    fn all_status_means_no_category_narrowing() {
        let filter: ListFilter<DeviceStatus> = list_filter(&filter_args("", "ALL")).unwrap();
        assert!(!filter.is_narrowed());
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = list_filter::<DeviceStatus>(&filter_args("", "sparking")).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn dash_helpers() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(join_or_dash::<String>(&[]), "-");
        assert_eq!(join_or_dash(&["a", "b"]), "a, b");
    }
}
