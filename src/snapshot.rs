//! Immutable copy of the contact form values.

use std::collections::BTreeMap;

use crate::field::FieldName;

/// Field values captured at a point in time, usually at submit.
///
/// Controls whose name is not a known [`FieldName`] are dropped when the
/// snapshot is built, so every key is an existing form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<FieldName, String>,
}

impl FormSnapshot {
    /// Create a snapshot with no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw `(name, value)` pairs, as read from the form.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (name, value) in pairs {
            match name.as_ref().parse::<FieldName>() {
                Ok(field) => {
                    values.insert(field, value.into());
                }
                Err(unknown) => tracing::debug!(%unknown, "ignoring control outside the contact form"),
            }
        }
        Self { values }
    }

    /// Return a copy with one field set.
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Raw value of a field, if the form had that control.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Value of a field with surrounding whitespace removed; missing fields read as empty.
    pub fn trimmed(&self, field: FieldName) -> &str {
        self.get(field).map(str::trim).unwrap_or("")
    }

    /// Value of an optional field, treating empty text as absent.
    pub fn provided(&self, field: FieldName) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    /// Iterate over captured values in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_drops_unknown_controls() {
        let snapshot = FormSnapshot::from_pairs([
            ("nome", "Ana"),
            ("newsletter", "on"),
            ("email", "ana@example.com"),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(FieldName::Nome), Some("Ana"));
        assert_eq!(snapshot.get(FieldName::Email), Some("ana@example.com"));
    }

    #[test]
    fn test_trimmed_and_provided() {
        let snapshot = FormSnapshot::empty()
            .with(FieldName::Nome, "  Ana  ")
            .with(FieldName::Telefone, "");

        assert_eq!(snapshot.trimmed(FieldName::Nome), "Ana");
        assert_eq!(snapshot.trimmed(FieldName::Empresa), "");
        assert_eq!(snapshot.provided(FieldName::Telefone), None);
        assert_eq!(snapshot.provided(FieldName::Nome), Some("  Ana  "));
    }
}
