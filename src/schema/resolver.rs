use crate::{domain::FormSchema, error::FormError};

/// Pick the tab to display after a schema load.
///
/// The previous tab is kept when it still exists in `schema`; otherwise the
/// first tab wins. Evaluated on every load, not only the first.
pub fn resolve_active_tab(schema: &FormSchema, previous: &str) -> Result<String, FormError> {
    let first = schema.first_tab().ok_or(FormError::EmptySchema)?;
    if previous.is_empty() || schema.tab(previous).is_none() {
        Ok(first.id.clone())
    } else {
        Ok(previous.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tab;

    fn schema(ids: &[&str]) -> FormSchema {
        FormSchema::new(ids.iter().map(|id| Tab::new(*id, *id, vec![])).collect())
    }

    #[test]
    fn empty_previous_selects_first() {
        assert_eq!(resolve_active_tab(&schema(&["a", "b"]), "").unwrap(), "a");
    }

    #[test]
    fn surviving_previous_is_kept() {
        assert_eq!(resolve_active_tab(&schema(&["a", "b"]), "b").unwrap(), "b");
    }

    #[test]
    fn vanished_previous_falls_back_to_first() {
        assert_eq!(resolve_active_tab(&schema(&["a", "b"]), "z").unwrap(), "a");
    }

    #[test]
    fn empty_schema_is_an_error() {
        assert!(matches!(
            resolve_active_tab(&schema(&[]), "a"),
            Err(FormError::EmptySchema)
        ));
    }
}
