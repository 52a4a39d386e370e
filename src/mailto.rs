//! `mailto:` deep link for handing a submission to the user's mail client.
//!
//! There is no backend: an accepted submission becomes a mail draft whose
//! subject names the service and company and whose body lists every field.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::field::FieldName;
use crate::settings::Messages;
use crate::snapshot::FormSnapshot;

/// Bytes escaped by `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URI component the way browsers do.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// A mail draft addressed to the site's recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailtoLink {
    /// Build the draft for a submitted form.
    ///
    /// Empty `telefone` and `mensagem` are replaced with the localized
    /// placeholders.
    pub fn from_snapshot(
        snapshot: &FormSnapshot,
        recipient: impl Into<String>,
        messages: &Messages,
    ) -> Self {
        let value = |field: FieldName| snapshot.get(field).unwrap_or("");

        let subject = format!(
            "{} - {} - {}",
            messages.subject_prefix,
            value(FieldName::Servico),
            value(FieldName::Empresa)
        );

        let body = format!(
            "{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n\n{}:\n{}",
            messages.label_name,
            value(FieldName::Nome),
            messages.label_company,
            value(FieldName::Empresa),
            messages.label_email,
            value(FieldName::Email),
            messages.label_phone,
            snapshot
                .provided(FieldName::Telefone)
                .unwrap_or(messages.not_provided.as_str()),
            messages.label_service,
            value(FieldName::Servico),
            messages.label_message,
            snapshot
                .provided(FieldName::Mensagem)
                .unwrap_or(messages.no_message.as_str()),
        );

        Self {
            recipient: recipient.into(),
            subject,
            body,
        }
    }

    /// The encoded `mailto:` URI.
    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
