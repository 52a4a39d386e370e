//! The page controller.
//!
//! All UI state lives in one [`PageState`] value. Every DOM event, timer
//! callback and observer notification becomes an [`Event`];
//! [`PageState::handle`] is the only place state changes, and it returns the
//! [`Effect`]s that cannot be expressed as state (deferred callbacks,
//! navigation, focus). [`render`] projects the state onto a [`View`].
//!
//! [`Page`] ties the three together for one document:
//!
//! ```
//! use std::time::Duration;
//! use olokun_site::page::{Event, Page};
//! use olokun_site::view::MockView;
//! use olokun_site::SiteSettings;
//!
//! let mut page = Page::with_seed(MockView::new(), SiteSettings::default(), 7);
//! page.dispatch(Duration::ZERO, Event::NavToggled);
//! assert!(page.view().nav_open);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::cards::{activates, hover_transform};
use crate::counter::Counter;
use crate::error::ErrorSet;
use crate::feedback::FieldFeedback;
use crate::field::FieldName;
use crate::nav::{active_section, NavState, NavbarState};
use crate::notification::{NotificationId, NotificationKind, Notifications};
use crate::particles::ParticleLayer;
use crate::scroll::{
    anchor_id, parallax_offset, reading_progress, scroll_target, RevealKind, RevealSet,
    ScrollMetrics,
};
use crate::settings::{Messages, SiteSettings};
use crate::snapshot::FormSnapshot;
use crate::submission::{SubmissionFlow, SubmitOutcome};
use crate::typing::TypingEffect;
use crate::view::{View, HERO_TITLE};

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The document finished loading.
    Loaded {
        viewport_width: f64,
        /// Markup of the hero title, if the page has one.
        hero_title: Option<String>,
    },

    /// The contact form was submitted with these values.
    Submit(FormSnapshot),
    FieldBlurred { field: FieldName, value: String },
    FieldInput { field: FieldName },
    SubmitDelayElapsed,

    Notify { message: String, kind: NotificationKind },
    NotificationTimedOut(NotificationId),
    /// The notification's close control was clicked.
    NotificationDismissed(NotificationId),
    NotificationFaded(NotificationId),

    NavToggled,
    NavLinkClicked,
    KeyPressed { key: String },

    Scrolled(ScrollMetrics),
    Resized { viewport_width: f64 },
    ResizeSettled { generation: u64, viewport_width: f64 },

    Intersected { target: String, kind: RevealKind },
    CounterVisible { target: String, text: String },
    CounterTick { target: String },
    TypingTick,

    /// An in-page anchor was clicked. `target_offset` is the `offsetTop` of
    /// the element it points at, or `None` if no such element exists.
    AnchorClicked { href: String, target_offset: Option<f64> },
    CardHovered { target: String, featured: bool, entered: bool },
    CardKeyPressed { target: String, key: String },
}

/// A side effect requested by [`PageState::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver `event` after `delay`.
    Defer { delay: Duration, event: Event },
    OpenUrl(String),
    ResetForm,
    ScrollTo(f64),
    FocusNavToggle,
    ActivateServiceLink(String),
}

impl Effect {
    fn defer(delay: Duration, event: Event) -> Self {
        Effect::Defer { delay, event }
    }
}

/// Everything the page remembers between events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    nav: NavState,
    navbar: NavbarState,
    active_section: Option<String>,
    hero_offset: f64,
    reading_progress: f64,
    feedback: FieldFeedback,
    submission: SubmissionFlow,
    notifications: Notifications,
    reveals: RevealSet,
    counters: BTreeMap<String, Counter>,
    typing: Option<TypingEffect>,
    particles: ParticleLayer,
    card_transforms: BTreeMap<String, &'static str>,
    resize_generation: u64,
}

impl PageState {
    /// Fresh state for a page whose submit control reads `submit_label`.
    pub fn new(submit_label: Option<String>) -> Self {
        Self {
            submission: SubmissionFlow::new(submit_label),
            ..Self::default()
        }
    }

    /// Apply one event and return the effects it requests.
    pub fn handle(
        &mut self,
        event: Event,
        now: Duration,
        settings: &SiteSettings,
        rng: &mut dyn RngCore,
    ) -> Vec<Effect> {
        match event {
            Event::Loaded {
                viewport_width,
                hero_title,
            } => {
                if !settings.is_desktop(viewport_width) {
                    return Vec::new();
                }
                self.particles.spawn(settings.particle_count, rng);
                match hero_title {
                    Some(title) => {
                        self.typing = Some(TypingEffect::new(&title));
                        vec![Effect::defer(settings.typing_start_delay(), Event::TypingTick)]
                    }
                    None => Vec::new(),
                }
            }

            Event::Submit(snapshot) => match self.submission.submit(snapshot, &settings.messages) {
                SubmitOutcome::Rejected(errors) => {
                    self.feedback.apply_errors(errors);
                    Vec::new()
                }
                SubmitOutcome::Accepted => {
                    self.feedback.apply_errors(ErrorSet::new());
                    vec![Effect::defer(settings.submit_delay(), Event::SubmitDelayElapsed)]
                }
                SubmitOutcome::InFlight => Vec::new(),
            },
            Event::FieldBlurred { field, value } => {
                self.feedback
                    .validate_single_field(field, &value, &settings.messages);
                Vec::new()
            }
            Event::FieldInput { field } => {
                self.feedback.clear_field(field);
                Vec::new()
            }
            Event::SubmitDelayElapsed => {
                let Some(link) = self
                    .submission
                    .complete(&settings.recipient, &settings.messages)
                else {
                    return Vec::new();
                };
                let mut effects = vec![Effect::OpenUrl(link.to_uri()), Effect::ResetForm];
                effects.push(self.notify(
                    settings.messages.success.clone(),
                    NotificationKind::Success,
                    now,
                    settings,
                ));
                effects
            }

            Event::Notify { message, kind } => vec![self.notify(message, kind, now, settings)],
            Event::NotificationTimedOut(id) | Event::NotificationDismissed(id) => {
                if self.notifications.begin_fade(id) {
                    vec![Effect::defer(
                        settings.notification_fade(),
                        Event::NotificationFaded(id),
                    )]
                } else {
                    Vec::new()
                }
            }
            Event::NotificationFaded(id) => {
                self.notifications.remove(id);
                Vec::new()
            }

            Event::NavToggled => {
                self.nav.toggle();
                Vec::new()
            }
            Event::NavLinkClicked => {
                self.nav.close();
                Vec::new()
            }
            Event::KeyPressed { key } => {
                if key == "Escape" && self.nav.close() {
                    vec![Effect::FocusNavToggle]
                } else {
                    Vec::new()
                }
            }

            Event::Scrolled(metrics) => {
                self.navbar.on_scroll(metrics.scroll_top, settings);
                self.active_section = active_section(
                    &metrics.sections,
                    metrics.scroll_top,
                    settings.section_activation_offset,
                )
                .map(str::to_string);
                self.hero_offset = parallax_offset(metrics.scroll_top, settings.parallax_rate);
                self.reading_progress = reading_progress(
                    metrics.scroll_top,
                    metrics.scroll_height,
                    metrics.client_height,
                );
                Vec::new()
            }
            Event::Resized { viewport_width } => {
                self.resize_generation += 1;
                vec![Effect::defer(
                    settings.resize_debounce(),
                    Event::ResizeSettled {
                        generation: self.resize_generation,
                        viewport_width,
                    },
                )]
            }
            Event::ResizeSettled {
                generation,
                viewport_width,
            } => {
                if generation != self.resize_generation {
                    return Vec::new();
                }
                if !settings.is_desktop(viewport_width) {
                    self.particles.clear();
                } else if self.particles.is_empty() {
                    self.particles.spawn(settings.particle_count, rng);
                }
                Vec::new()
            }

            Event::Intersected { target, kind } => {
                self.reveals.reveal(&target, kind);
                Vec::new()
            }
            Event::CounterVisible { target, text } => {
                if self.counters.contains_key(&target) {
                    return Vec::new();
                }
                match Counter::parse(&text, settings.counter_steps) {
                    Some(counter) => {
                        self.counters.insert(target.clone(), counter);
                        vec![Effect::defer(
                            settings.counter_interval(),
                            Event::CounterTick { target },
                        )]
                    }
                    None => {
                        tracing::debug!(%target, %text, "counter has no leading integer, skipping");
                        Vec::new()
                    }
                }
            }
            Event::CounterTick { target } => {
                let more = self.counters.get_mut(&target).map(Counter::tick);
                if more == Some(true) {
                    vec![Effect::defer(
                        settings.counter_interval(),
                        Event::CounterTick { target },
                    )]
                } else {
                    Vec::new()
                }
            }
            Event::TypingTick => match self.typing.as_mut().map(TypingEffect::advance) {
                Some(true) => vec![Effect::defer(settings.typing_speed(), Event::TypingTick)],
                _ => Vec::new(),
            },

            Event::AnchorClicked {
                href,
                target_offset,
            } => match (anchor_id(&href), target_offset) {
                (Some(_), Some(offset)) => {
                    vec![Effect::ScrollTo(scroll_target(offset, settings.header_offset))]
                }
                _ => Vec::new(),
            },
            Event::CardHovered {
                target,
                featured,
                entered,
            } => {
                self.card_transforms
                    .insert(target, hover_transform(entered, featured));
                Vec::new()
            }
            Event::CardKeyPressed { target, key } => {
                if activates(&key) {
                    vec![Effect::ActivateServiceLink(target)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn notify(
        &mut self,
        message: String,
        kind: NotificationKind,
        now: Duration,
        settings: &SiteSettings,
    ) -> Effect {
        let id = self.notifications.show(message, kind, now);
        Effect::defer(
            settings.notification_display(),
            Event::NotificationTimedOut(id),
        )
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn feedback(&self) -> &FieldFeedback {
        &self.feedback
    }

    pub fn submission(&self) -> &SubmissionFlow {
        &self.submission
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn reveals(&self) -> &RevealSet {
        &self.reveals
    }

    pub fn counter(&self, target: &str) -> Option<&Counter> {
        self.counters.get(target)
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn particles(&self) -> &ParticleLayer {
        &self.particles
    }
}

/// Project `state` onto `view`.
///
/// Only the parts that differ from `prev` (the state last rendered) are
/// touched; with `prev = None` everything is rendered. Rendering the same
/// state twice leaves the view unchanged.
pub fn render<V: View + ?Sized>(
    state: &PageState,
    prev: Option<&PageState>,
    messages: &Messages,
    view: &mut V,
) {
    if changed(prev, |p| p.feedback != state.feedback) {
        state.feedback.render(view);
    }
    if changed(prev, |p| p.submission != state.submission) {
        if let Some(control) = state.submission.control(messages) {
            view.set_submit_control(&control);
        }
    }
    if changed(prev, |p| p.notifications != state.notifications) {
        view.render_notifications(state.notifications.as_slice());
    }

    if changed(prev, |p| p.nav != state.nav) {
        view.set_nav_open(state.nav.is_open());
    }
    if changed(prev, |p| {
        p.navbar.scrolled != state.navbar.scrolled || p.navbar.hidden != state.navbar.hidden
    }) {
        view.set_navbar(state.navbar.scrolled, state.navbar.hidden);
    }
    if changed(prev, |p| p.active_section != state.active_section) {
        view.set_active_link(state.active_section.as_deref());
    }
    if changed(prev, |p| p.hero_offset != state.hero_offset) {
        view.set_hero_offset(state.hero_offset);
    }
    if changed(prev, |p| p.reading_progress != state.reading_progress) {
        view.set_reading_progress(state.reading_progress);
    }

    for (target, kind) in state.reveals.iter() {
        if changed(prev, |p| !p.reveals.is_revealed(target)) {
            view.add_class(target, kind.class());
        }
    }
    for (target, counter) in &state.counters {
        if changed(prev, |p| p.counters.get(target).map(Counter::text) != Some(counter.text())) {
            view.set_text(target, &counter.text());
        }
    }
    if let Some(typing) = &state.typing {
        if changed(prev, |p| p.typing.as_ref() != Some(typing)) {
            view.set_html(HERO_TITLE, typing.typed());
            view.set_style(HERO_TITLE, "border-right", typing.caret());
        }
    }
    if changed(prev, |p| p.particles != state.particles) {
        view.render_particles(state.particles.particles());
    }
    for (target, transform) in &state.card_transforms {
        if changed(prev, |p| p.card_transforms.get(target) != Some(transform)) {
            view.set_style(target, "transform", transform);
        }
    }
}

fn changed(prev: Option<&PageState>, differs: impl Fn(&PageState) -> bool) -> bool {
    prev.map_or(true, differs)
}

/// An event waiting for its timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub due: Duration,
    pub event: Event,
}

/// A document: its view, its state and the settings it runs with.
pub struct Page<V: View> {
    state: PageState,
    rendered: Option<PageState>,
    view: V,
    settings: SiteSettings,
    rng: StdRng,
    outbox: Vec<Deferred>,
}

impl<V: View> Page<V> {
    pub fn new(view: V, settings: SiteSettings) -> Self {
        Self::with_rng(view, settings, StdRng::from_entropy())
    }

    /// A page with reproducible particles.
    pub fn with_seed(view: V, settings: SiteSettings, seed: u64) -> Self {
        Self::with_rng(view, settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(view: V, settings: SiteSettings, rng: StdRng) -> Self {
        let state = PageState::new(view.submit_label());
        Self {
            state,
            rendered: None,
            view,
            settings,
            rng,
            outbox: Vec::new(),
        }
    }

    /// Handle one event at time `now`, re-render and carry out its effects.
    pub fn dispatch(&mut self, now: Duration, event: Event) {
        tracing::trace!(?event, ?now, "dispatch");
        let effects = self.state.handle(event, now, &self.settings, &mut self.rng);

        render(
            &self.state,
            self.rendered.as_ref(),
            &self.settings.messages,
            &mut self.view,
        );
        self.rendered = Some(self.state.clone());

        for effect in effects {
            self.apply(now, effect);
        }
    }

    /// Submit the contact form with the values currently in the view.
    ///
    /// Does nothing when the page has no contact form.
    pub fn submit(&mut self, now: Duration) {
        match self.view.form_snapshot() {
            Some(snapshot) => self.dispatch(now, Event::Submit(snapshot)),
            None => tracing::debug!("no contact form, ignoring submit"),
        }
    }

    /// Show a notification that is independent of the form.
    pub fn notify(&mut self, now: Duration, message: impl Into<String>, kind: NotificationKind) {
        self.dispatch(
            now,
            Event::Notify {
                message: message.into(),
                kind,
            },
        );
    }

    fn apply(&mut self, now: Duration, effect: Effect) {
        match effect {
            Effect::Defer { delay, event } => self.outbox.push(Deferred {
                due: now + delay,
                event,
            }),
            Effect::OpenUrl(url) => self.view.open_url(&url),
            Effect::ResetForm => self.view.reset_form(),
            Effect::ScrollTo(top) => self.view.scroll_to(top),
            Effect::FocusNavToggle => self.view.focus_nav_toggle(),
            Effect::ActivateServiceLink(target) => self.view.activate_service_link(&target),
        }
    }

    /// Events scheduled since the last call, for the caller's timer.
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.outbox)
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Direct access to the view, for simulating user input.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }
}
