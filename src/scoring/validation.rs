use std::collections::HashSet;

use super::types::Category;

fn check_weight(errors: &mut Vec<String>, path: &str, weight: f64) {
    if !weight.is_finite() {
        errors.push(format!("{}.weight: must be a finite number", path));
    } else if weight < 0.0 {
        errors.push(format!("{}.weight: must be non-negative (got {})", path, weight));
    }
}

/// Validate category and competency configuration before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_categories(categories: &[Category]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_competencies = HashSet::new();

    for (i, category) in categories.iter().enumerate() {
        let path = format!("categories[{}]", i);
        check_weight(&mut errors, &path, category.weight);

        for (j, competency) in category.competencies.iter().enumerate() {
            let path = format!("categories[{}].competencies[{}]", i, j);
            check_weight(&mut errors, &path, competency.weight);

            if competency.category_id != category.id {
                errors.push(format!(
                    "{}.categoryID: '{}' does not match parent category '{}'",
                    path, competency.category_id, category.id
                ));
            }

            if !seen_competencies.insert(competency.id.as_str()) {
                errors.push(format!("{}.id: duplicate competency id '{}'", path, competency.id));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
