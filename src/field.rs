//! Contact form field names.
//!
//! The contact form carries six named controls. Four of them are required;
//! `telefone` and `mensagem` are always optional and never validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named control of the contact form.
///
/// The string form matches the `name` attribute of the control in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Nome,
    Empresa,
    Email,
    Telefone,
    Servico,
    Mensagem,
}

impl FieldName {
    /// Every field of the contact form, in page order.
    pub const ALL: [FieldName; 6] = [
        FieldName::Nome,
        FieldName::Empresa,
        FieldName::Email,
        FieldName::Telefone,
        FieldName::Servico,
        FieldName::Mensagem,
    ];

    /// Fields that fail validation when their trimmed value is empty.
    pub const REQUIRED: [FieldName; 4] = [
        FieldName::Nome,
        FieldName::Empresa,
        FieldName::Email,
        FieldName::Servico,
    ];

    /// The `name` attribute of the control.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Nome => "nome",
            FieldName::Empresa => "empresa",
            FieldName::Email => "email",
            FieldName::Telefone => "telefone",
            FieldName::Servico => "servico",
            FieldName::Mensagem => "mensagem",
        }
    }

    /// Check if the field belongs to the required set.
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a control name is not part of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_set() {
        assert!(FieldName::Nome.is_required());
        assert!(FieldName::Empresa.is_required());
        assert!(FieldName::Email.is_required());
        assert!(FieldName::Servico.is_required());
        assert!(!FieldName::Telefone.is_required());
        assert!(!FieldName::Mensagem.is_required());
    }

    #[test]
    fn test_parse_names() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>(), Ok(field));
        }
        assert_eq!(
            "website".parse::<FieldName>(),
            Err(UnknownField("website".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_attribute_names() {
        let json = serde_json::to_string(&FieldName::Servico).unwrap();
        assert_eq!(json, "\"servico\"");
    }
}
