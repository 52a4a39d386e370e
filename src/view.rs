//! The view contract: everything the page logic needs from the DOM.
//!
//! [`View`] abstracts the document the same way [`SettingsEnv`](crate::env::SettingsEnv)
//! abstracts the file system. Every operation on an element that does not
//! exist is a silent no-op; a page without a contact form or without a hero
//! section still works.
//!
//! [`MockView`] is an in-memory document used by the tests and the demo.

use std::collections::{BTreeMap, BTreeSet};

use crate::field::FieldName;
use crate::notification::NotificationRecord;
use crate::particles::Particle;
use crate::snapshot::FormSnapshot;

/// Key of the hero title element used by the typing effect.
pub const HERO_TITLE: &str = "hero-title";

/// Presentation of the contact form's submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitControl {
    /// Enabled, showing its original label.
    Idle { label: String },
    /// Disabled, showing a busy indicator.
    Busy { label: String },
}

impl SubmitControl {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitControl::Busy { .. })
    }

    pub fn label(&self) -> &str {
        match self {
            SubmitControl::Idle { label } | SubmitControl::Busy { label } => label,
        }
    }
}

/// Operations the page logic performs on the document.
///
/// Elements other than form fields are addressed by a string key assigned
/// by the shell (an element id, or a generated key for repeated elements
/// such as cards and counters).
pub trait View {
    /// Current values of the contact form, or `None` when there is no form.
    fn form_snapshot(&self) -> Option<FormSnapshot>;

    /// Mark a field invalid and show `message` as its only error node.
    fn show_field_error(&mut self, field: FieldName, message: &str);

    /// Remove the error indicator and message of a field.
    fn clear_field_error(&mut self, field: FieldName);

    /// Empty every control of the contact form.
    fn reset_form(&mut self);

    /// The submit control's label as found in the page.
    fn submit_label(&self) -> Option<String>;

    fn set_submit_control(&mut self, control: &SubmitControl);

    /// Make the notification banners match `notifications` exactly.
    fn render_notifications(&mut self, notifications: &[NotificationRecord]);

    fn set_nav_open(&mut self, open: bool);

    fn set_navbar(&mut self, scrolled: bool, hidden: bool);

    /// Highlight the nav link pointing at `section`, clearing all others.
    fn set_active_link(&mut self, section: Option<&str>);

    fn focus_nav_toggle(&mut self);

    /// Vertical parallax offset of the hero section, in pixels.
    fn set_hero_offset(&mut self, offset: f64);

    fn set_reading_progress(&mut self, percent: f64);

    fn add_class(&mut self, target: &str, class: &str);

    fn set_text(&mut self, target: &str, text: &str);

    fn set_html(&mut self, target: &str, html: &str);

    fn set_style(&mut self, target: &str, property: &str, value: &str);

    /// Replace the particle layer; an empty slice removes every particle.
    fn render_particles(&mut self, particles: &[Particle]);

    fn scroll_to(&mut self, top: f64);

    /// Activate the service link inside the card `target`.
    fn activate_service_link(&mut self, target: &str);

    /// Hand a URL to the platform (used for the `mailto:` link).
    fn open_url(&mut self, url: &str);
}

/// In-memory field state of [`MockView`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockField {
    pub value: String,
    /// Mirrors the `error` class.
    pub has_error: bool,
    /// Mirrors the `.field-error` sibling nodes.
    pub messages: Vec<String>,
}

/// In-memory document for tests.
///
/// # Example
///
/// ```
/// use olokun_site::view::{MockView, View};
/// use olokun_site::FieldName;
///
/// let mut view = MockView::with_contact_form("Enviar");
/// view.type_into(FieldName::Nome, "Ana");
/// view.show_field_error(FieldName::Email, "obrigatório");
///
/// assert!(view.has_field_error(FieldName::Email));
/// assert_eq!(view.field_value(FieldName::Nome), Some("Ana"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockView {
    pub fields: BTreeMap<FieldName, MockField>,
    pub submit: Option<SubmitControl>,
    pub notifications: Vec<NotificationRecord>,
    pub nav_open: bool,
    pub navbar_scrolled: bool,
    pub navbar_hidden: bool,
    pub active_link: Option<String>,
    pub focused: Option<String>,
    pub hero_offset: f64,
    pub reading_progress: f64,
    /// Keys of elements that exist outside the form.
    pub elements: BTreeSet<String>,
    pub classes: BTreeMap<String, BTreeSet<String>>,
    pub texts: BTreeMap<String, String>,
    pub html: BTreeMap<String, String>,
    pub styles: BTreeMap<(String, String), String>,
    pub particles: Vec<Particle>,
    pub scrolled_to: Vec<f64>,
    pub activated_links: Vec<String>,
    pub opened_urls: Vec<String>,
}

impl MockView {
    /// A document with nothing in it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with the full contact form and a submit control.
    pub fn with_contact_form(submit_label: impl Into<String>) -> Self {
        let mut view = Self::new();
        for field in FieldName::ALL {
            view.fields.insert(field, MockField::default());
        }
        view.submit = Some(SubmitControl::Idle {
            label: submit_label.into(),
        });
        view
    }

    /// Add a keyed element, e.g. the hero title or a card.
    pub fn with_element(mut self, key: impl Into<String>) -> Self {
        self.elements.insert(key.into());
        self
    }

    /// Simulate the user typing a value (without firing events).
    pub fn type_into(&mut self, field: FieldName, value: impl Into<String>) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.value = value.into();
        }
    }

    pub fn field_value(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(|f| f.value.as_str())
    }

    pub fn has_field_error(&self, field: FieldName) -> bool {
        self.fields.get(&field).map(|f| f.has_error).unwrap_or(false)
    }

    /// The message shown under a field, if exactly one is shown.
    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        let f = self.fields.get(&field)?;
        match f.messages.as_slice() {
            [message] => Some(message.as_str()),
            _ => None,
        }
    }

    /// Fields currently marked invalid.
    pub fn fields_with_errors(&self) -> Vec<FieldName> {
        self.fields
            .iter()
            .filter(|(_, f)| f.has_error || !f.messages.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn has_class(&self, target: &str, class: &str) -> bool {
        self.classes
            .get(target)
            .map(|c| c.contains(class))
            .unwrap_or(false)
    }

    pub fn style(&self, target: &str, property: &str) -> Option<&str> {
        self.styles
            .get(&(target.to_string(), property.to_string()))
            .map(String::as_str)
    }

    fn has_element(&self, target: &str) -> bool {
        self.elements.contains(target)
    }
}

impl View for MockView {
    fn form_snapshot(&self) -> Option<FormSnapshot> {
        if self.fields.is_empty() {
            return None;
        }
        Some(FormSnapshot::from_pairs(
            self.fields
                .iter()
                .map(|(name, f)| (name.as_str(), f.value.clone())),
        ))
    }

    fn show_field_error(&mut self, field: FieldName, message: &str) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.has_error = true;
            f.messages.clear();
            f.messages.push(message.to_string());
        }
    }

    fn clear_field_error(&mut self, field: FieldName) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.has_error = false;
            f.messages.clear();
        }
    }

    fn reset_form(&mut self) {
        for f in self.fields.values_mut() {
            f.value.clear();
        }
    }

    fn submit_label(&self) -> Option<String> {
        self.submit.as_ref().map(|s| s.label().to_string())
    }

    fn set_submit_control(&mut self, control: &SubmitControl) {
        if self.submit.is_some() {
            self.submit = Some(control.clone());
        }
    }

    fn render_notifications(&mut self, notifications: &[NotificationRecord]) {
        self.notifications = notifications.to_vec();
    }

    fn set_nav_open(&mut self, open: bool) {
        self.nav_open = open;
    }

    fn set_navbar(&mut self, scrolled: bool, hidden: bool) {
        self.navbar_scrolled = scrolled;
        self.navbar_hidden = hidden;
    }

    fn set_active_link(&mut self, section: Option<&str>) {
        self.active_link = section.map(str::to_string);
    }

    fn focus_nav_toggle(&mut self) {
        self.focused = Some("nav-toggle".to_string());
    }

    fn set_hero_offset(&mut self, offset: f64) {
        self.hero_offset = offset;
    }

    fn set_reading_progress(&mut self, percent: f64) {
        self.reading_progress = percent;
    }

    fn add_class(&mut self, target: &str, class: &str) {
        if self.has_element(target) {
            self.classes
                .entry(target.to_string())
                .or_default()
                .insert(class.to_string());
        }
    }

    fn set_text(&mut self, target: &str, text: &str) {
        if self.has_element(target) {
            self.texts.insert(target.to_string(), text.to_string());
        }
    }

    fn set_html(&mut self, target: &str, html: &str) {
        if self.has_element(target) {
            self.html.insert(target.to_string(), html.to_string());
        }
    }

    fn set_style(&mut self, target: &str, property: &str, value: &str) {
        if self.has_element(target) {
            self.styles
                .insert((target.to_string(), property.to_string()), value.to_string());
        }
    }

    fn render_particles(&mut self, particles: &[Particle]) {
        self.particles = particles.to_vec();
    }

    fn scroll_to(&mut self, top: f64) {
        self.scrolled_to.push(top);
    }

    fn activate_service_link(&mut self, target: &str) {
        if self.has_element(target) {
            self.activated_links.push(target.to_string());
        }
    }

    fn open_url(&mut self, url: &str) {
        self.opened_urls.push(url.to_string());
    }
}
