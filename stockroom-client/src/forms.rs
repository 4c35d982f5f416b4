/// Pre-submit form checks for the Add/Edit dialogs
///
/// These run in the UI before a request goes out, purely for immediate
/// feedback. They duplicate server-side rules where those exist; the
/// duplicate-name check has no server-side counterpart, so a direct API
/// call (or a race between two admins) can still create duplicate
/// category names.

use crate::error::FieldError;
use crate::types::CategorySummary;
use rust_decimal::Decimal;

/// A product form as typed, before parsing
///
/// Numeric inputs stay strings here because that is what text inputs
/// hold; parsing is part of validation.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    /// Product name
    pub name: String,

    /// Price input, as typed
    pub price: String,

    /// Stock input, as typed (empty means "leave default")
    pub stock: String,

    /// Selected category, if one was picked
    pub category_id: Option<i64>,
}

/// Checks a category form against the rows already on screen
///
/// `exclude_id` skips the row being edited so renaming a category to its
/// own name is not flagged as a duplicate.
pub fn validate_category_draft(
    name: &str,
    existing: &[CategorySummary],
    exclude_id: Option<i64>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let trimmed = name.trim();

    if trimmed.is_empty() {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        });
        return errors;
    }

    let duplicate = existing.iter().any(|category| {
        Some(category.id) != exclude_id && category.name.eq_ignore_ascii_case(trimmed)
    });

    if duplicate {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "A category with this name already exists".to_string(),
        });
    }

    errors
}

/// Checks a product form before submit
pub fn validate_product_draft(draft: &ProductDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        });
    }

    match draft.price.trim().parse::<Decimal>() {
        Ok(price) if price > Decimal::ZERO => {}
        Ok(_) => errors.push(FieldError {
            field: "price".to_string(),
            message: "Price must be greater than 0".to_string(),
        }),
        Err(_) => errors.push(FieldError {
            field: "price".to_string(),
            message: "Price must be a number".to_string(),
        }),
    }

    if !draft.stock.trim().is_empty() {
        match draft.stock.trim().parse::<i32>() {
            Ok(stock) if stock >= 0 => {}
            _ => errors.push(FieldError {
                field: "stock".to_string(),
                message: "Stock must be a non-negative integer".to_string(),
            }),
        }
    }

    if draft.category_id.is_none() {
        errors.push(FieldError {
            field: "category_id".to_string(),
            message: "Category is required".to_string(),
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> CategorySummary {
        CategorySummary {
            id,
            name: name.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_empty_category_name_is_required() {
        let errors = validate_category_draft("  ", &[], None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_duplicate_category_name_is_case_insensitive() {
        let existing = vec![category(1, "Books")];

        let errors = validate_category_draft("books", &existing, None);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("already exists"));
    }

    #[test]
    fn test_editing_keeps_own_name_valid() {
        let existing = vec![category(1, "Books"), category(2, "Games")];

        let errors = validate_category_draft("Books", &existing, Some(1));
        assert!(errors.is_empty());

        let errors = validate_category_draft("Games", &existing, Some(1));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_valid_product_draft_passes() {
        let draft = ProductDraft {
            name: "Paperback".to_string(),
            price: "10.50".to_string(),
            stock: "3".to_string(),
            category_id: Some(1),
        };

        assert!(validate_product_draft(&draft).is_empty());
    }

    #[test]
    fn test_product_draft_collects_all_errors() {
        let draft = ProductDraft {
            name: String::new(),
            price: "abc".to_string(),
            stock: "-1".to_string(),
            category_id: None,
        };

        let errors = validate_product_draft(&draft);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price", "stock", "category_id"]);
    }

    #[test]
    fn test_zero_price_is_rejected_client_side() {
        let draft = ProductDraft {
            name: "Freebie".to_string(),
            price: "0".to_string(),
            stock: String::new(),
            category_id: Some(1),
        };

        let errors = validate_product_draft(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_empty_stock_is_allowed() {
        let draft = ProductDraft {
            name: "Paperback".to_string(),
            price: "1".to_string(),
            stock: String::new(),
            category_id: Some(1),
        };

        assert!(validate_product_draft(&draft).is_empty());
    }
}
