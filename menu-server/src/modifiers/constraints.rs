//! Modifier group selection rules
//!
//! No I/O here: callers load whatever state is needed and run these
//! before writing.

use shared::error::{AppError, ErrorCode};
use shared::models::SelectionType;

/// The fields of a group that govern how many options a guest may pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityConfig {
    pub selection_type: SelectionType,
    pub is_required: bool,
    pub min_selections: Option<i32>,
    pub max_selections: Option<i32>,
}

/// Reject inconsistent bounds on a `Multiple` group. `Single` groups pass.
pub fn validate_cardinality(config: &CardinalityConfig) -> Result<(), AppError> {
    if config.selection_type == SelectionType::Single {
        return Ok(());
    }

    if let (Some(min), Some(max)) = (config.min_selections, config.max_selections)
        && min > max
    {
        return Err(cardinality_error("min > max"));
    }
    if config.min_selections.is_some_and(|min| min < 0) {
        return Err(cardinality_error("min < 0"));
    }
    if config.max_selections.is_some_and(|max| max < 1) {
        return Err(cardinality_error("max < 1"));
    }
    Ok(())
}

fn cardinality_error(reason: &str) -> AppError {
    AppError::with_message(ErrorCode::ModifierCardinalityInvalid, reason)
}

/// Canonical form of a configuration
///
/// `Single` drops both bounds. A required `Multiple` group with no
/// minimum gets a minimum of 1. Upper bound is left as given.
pub fn normalize(config: CardinalityConfig) -> CardinalityConfig {
    match config.selection_type {
        SelectionType::Single => CardinalityConfig {
            min_selections: None,
            max_selections: None,
            ..config
        },
        SelectionType::Multiple => CardinalityConfig {
            min_selections: match config.min_selections {
                None if config.is_required => Some(1),
                other => other,
            },
            ..config
        },
    }
}

/// A required group must have at least one option, of any status
pub fn enforce_required_has_options(is_required: bool, option_count: i64) -> Result<(), AppError> {
    if is_required && option_count < 1 {
        return Err(AppError::new(ErrorCode::ModifierRequiresOptions));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple(min: Option<i32>, max: Option<i32>) -> CardinalityConfig {
        CardinalityConfig {
            selection_type: SelectionType::Multiple,
            is_required: false,
            min_selections: min,
            max_selections: max,
        }
    }

    #[test]
    fn test_cardinality_rejects_min_above_max() {
        let err = validate_cardinality(&multiple(Some(3), Some(1))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModifierCardinalityInvalid);
        assert_eq!(err.message, "min > max");
    }

    #[test]
    fn test_cardinality_accepts_ordered_bounds() {
        assert!(validate_cardinality(&multiple(Some(1), Some(3))).is_ok());
        assert!(validate_cardinality(&multiple(Some(2), Some(2))).is_ok());
        assert!(validate_cardinality(&multiple(None, None)).is_ok());
    }

    #[test]
    fn test_cardinality_rejects_zero_max() {
        let err = validate_cardinality(&multiple(None, Some(0))).unwrap_err();
        assert_eq!(err.message, "max < 1");
    }

    #[test]
    fn test_cardinality_rejects_negative_min() {
        let err = validate_cardinality(&multiple(Some(-1), None)).unwrap_err();
        assert_eq!(err.message, "min < 0");
    }

    #[test]
    fn test_cardinality_ignores_single() {
        let config = CardinalityConfig {
            selection_type: SelectionType::Single,
            is_required: true,
            min_selections: Some(5),
            max_selections: Some(0),
        };
        assert!(validate_cardinality(&config).is_ok());
    }

    #[test]
    fn test_normalize_single_clears_bounds() {
        let config = CardinalityConfig {
            selection_type: SelectionType::Single,
            is_required: true,
            min_selections: Some(1),
            max_selections: Some(3),
        };
        let n = normalize(config);
        assert_eq!(n.min_selections, None);
        assert_eq!(n.max_selections, None);
        assert!(n.is_required);
    }

    #[test]
    fn test_normalize_required_multiple_defaults_min() {
        let config = CardinalityConfig {
            is_required: true,
            ..multiple(None, Some(4))
        };
        let n = normalize(config);
        assert_eq!(n.min_selections, Some(1));
        assert_eq!(n.max_selections, Some(4));

        // Optional groups keep an unset minimum
        assert_eq!(normalize(multiple(None, None)).min_selections, None);
        // An explicit minimum is never overridden
        let explicit = CardinalityConfig {
            is_required: true,
            ..multiple(Some(0), None)
        };
        assert_eq!(normalize(explicit).min_selections, Some(0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut configs = Vec::new();
        for selection_type in [SelectionType::Single, SelectionType::Multiple] {
            for is_required in [false, true] {
                for min in [None, Some(0), Some(1), Some(2)] {
                    for max in [None, Some(1), Some(3)] {
                        configs.push(CardinalityConfig {
                            selection_type,
                            is_required,
                            min_selections: min,
                            max_selections: max,
                        });
                    }
                }
            }
        }

        for config in configs.into_iter().filter(|c| validate_cardinality(c).is_ok()) {
            let once = normalize(config);
            assert_eq!(normalize(once), once, "not idempotent for {config:?}");
        }
    }

    #[test]
    fn test_required_needs_options() {
        let err = enforce_required_has_options(true, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModifierRequiresOptions);
        assert!(enforce_required_has_options(true, 1).is_ok());
        assert!(enforce_required_has_options(false, 0).is_ok());
    }
}
