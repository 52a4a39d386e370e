//! Browser shell.
//!
//! [`DomView`] implements [`View`] over the live document, and [`start`]
//! wires DOM listeners, intersection observers and `setTimeout` to a
//! [`Page`]. Elements the page logic addresses by key carry a
//! `data-olokun-key` attribute assigned at mount time.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::field::FieldName;
use crate::nav::Section;
use crate::notification::{NotificationId, NotificationRecord};
use crate::page::{Event, Page};
use crate::particles::Particle;
use crate::scroll::{RevealKind, ScrollMetrics};
use crate::settings::SiteSettings;
use crate::snapshot::FormSnapshot;
use crate::view::{SubmitControl, View, HERO_TITLE};

const KEY_ATTR: &str = "data-olokun-key";
const NOTIFICATION_ATTR: &str = "data-notification-id";
const FORM_ID: &str = "contactForm";
const REVEAL_SELECTOR: &str = ".service-card, .benefit-card, .about-feature";
const CARD_SELECTOR: &str = ".service-card, .benefit-card";
const COUNTER_SELECTOR: &str = ".stat-number";
const AOS_SELECTOR: &str = "[data-aos]";
const SPINNER: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;

fn log_failure<T>(result: Result<T, JsValue>) {
    if let Err(err) = result {
        tracing::debug!(?err, "DOM operation failed");
    }
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn select_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        log_failure(el.style().set_property(property, value));
    }
}

fn offset_top(element: &Element) -> f64 {
    element
        .dyn_ref::<HtmlElement>()
        .map(|el| f64::from(el.offset_top()))
        .unwrap_or(0.0)
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else {
        String::new()
    }
}

/// The live document as a [`View`].
pub struct DomView {
    window: Window,
    document: Document,
    notifications: BTreeMap<NotificationId, Element>,
}

impl DomView {
    /// Take over `document`: assign element keys and add the reading
    /// progress bar.
    pub fn mount(window: Window, document: Document) -> Self {
        let mut next = 0usize;
        for selector in [REVEAL_SELECTOR, COUNTER_SELECTOR, AOS_SELECTOR] {
            for element in select_all(&document, selector) {
                if element.has_attribute(KEY_ATTR) {
                    continue;
                }
                let id = element.id();
                let key = if id.is_empty() {
                    next += 1;
                    format!("el-{next}")
                } else {
                    id
                };
                log_failure(element.set_attribute(KEY_ATTR, &key));
            }
        }
        if let Ok(Some(title)) = document.query_selector(".hero-title") {
            log_failure(title.set_attribute(KEY_ATTR, HERO_TITLE));
        }

        let view = Self {
            window,
            document,
            notifications: BTreeMap::new(),
        };
        view.create_progress_bar();
        view
    }

    fn create_progress_bar(&self) {
        let (Ok(bar), Some(body)) = (self.document.create_element("div"), self.document.body())
        else {
            return;
        };
        bar.set_class_name("reading-progress");
        bar.set_inner_html(r#"<div class="reading-progress-fill"></div>"#);
        log_failure(body.append_child(&bar));
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn keyed(&self, key: &str) -> Option<Element> {
        self.first(&format!("[{KEY_ATTR}=\"{key}\"]"))
    }

    fn field(&self, field: FieldName) -> Option<Element> {
        select_in(&self.by_id(FORM_ID)?, &format!("[name=\"{}\"]", field.as_str()))
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        select_in(&self.by_id(FORM_ID)?, "button[type=\"submit\"]")?
            .dyn_into()
            .ok()
    }

    fn notification_element(&self, record: &NotificationRecord) -> Option<Element> {
        let element = self.document.create_element("div").ok()?;
        element.set_class_name(&format!("notification {}", record.kind.css_class()));
        log_failure(element.set_attribute(NOTIFICATION_ATTR, &record.id.0.to_string()));

        let icon = self.document.create_element("i").ok()?;
        icon.set_class_name(&format!("fas fa-{}", record.kind.icon()));
        let text = self.document.create_element("span").ok()?;
        text.set_text_content(Some(&record.message));
        let close = self.document.create_element("button").ok()?;
        close.set_class_name("notification-close");
        close.set_inner_html(r#"<i class="fas fa-times"></i>"#);

        for child in [&icon, &text, &close] {
            log_failure(element.append_child(child));
        }
        log_failure(self.document.body()?.append_child(&element));
        Some(element)
    }
}

impl View for DomView {
    fn form_snapshot(&self) -> Option<FormSnapshot> {
        self.by_id(FORM_ID)?;
        let pairs: Vec<(&str, String)> = FieldName::ALL
            .iter()
            .filter_map(|&field| Some((field.as_str(), control_value(&self.field(field)?))))
            .collect();
        Some(FormSnapshot::from_pairs(pairs))
    }

    fn show_field_error(&mut self, field: FieldName, message: &str) {
        self.clear_field_error(field);
        let Some(element) = self.field(field) else {
            return;
        };
        log_failure(element.class_list().add_1("error"));

        let (Some(parent), Ok(note)) = (
            element.parent_element(),
            self.document.create_element("div"),
        ) else {
            return;
        };
        note.set_class_name("field-error");
        note.set_text_content(Some(message));
        log_failure(parent.append_child(&note));
    }

    fn clear_field_error(&mut self, field: FieldName) {
        let Some(element) = self.field(field) else {
            return;
        };
        log_failure(element.class_list().remove_1("error"));
        if let Some(note) = element
            .parent_element()
            .and_then(|parent| select_in(&parent, ".field-error"))
        {
            note.remove();
        }
    }

    fn reset_form(&mut self) {
        if let Some(form) = self
            .by_id(FORM_ID)
            .and_then(|f| f.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn submit_label(&self) -> Option<String> {
        self.submit_button().map(|button| button.inner_html())
    }

    fn set_submit_control(&mut self, control: &SubmitControl) {
        let Some(button) = self.submit_button() else {
            return;
        };
        match control {
            SubmitControl::Idle { label } => button.set_inner_html(label),
            SubmitControl::Busy { label } => button.set_inner_html(&format!("{SPINNER} {label}")),
        }
        button.set_disabled(control.is_busy());
    }

    fn render_notifications(&mut self, notifications: &[NotificationRecord]) {
        self.notifications.retain(|id, element| {
            let keep = notifications.iter().any(|n| n.id == *id);
            if !keep {
                element.remove();
            }
            keep
        });

        for record in notifications {
            if !self.notifications.contains_key(&record.id) {
                if let Some(element) = self.notification_element(record) {
                    self.notifications.insert(record.id, element);
                }
            }
            if record.is_fading() {
                if let Some(element) = self.notifications.get(&record.id) {
                    log_failure(element.class_list().add_1("fade-out"));
                }
            }
        }
    }

    fn set_nav_open(&mut self, open: bool) {
        for element in [self.by_id("nav-toggle"), self.by_id("nav-menu")]
            .into_iter()
            .flatten()
        {
            log_failure(element.class_list().toggle_with_force("active", open));
        }
        if let Some(body) = self.document.body() {
            log_failure(body.class_list().toggle_with_force("nav-open", open));
        }
    }

    fn set_navbar(&mut self, scrolled: bool, hidden: bool) {
        let Some(navbar) = self.by_id("navbar") else {
            return;
        };
        log_failure(navbar.class_list().toggle_with_force("scrolled", scrolled));
        let transform = if hidden { "translateY(-100%)" } else { "translateY(0)" };
        set_style(&navbar, "transform", transform);
    }

    fn set_active_link(&mut self, section: Option<&str>) {
        let href = section.map(|id| format!("#{id}"));
        for link in select_all(&self.document, ".nav-link") {
            let active = href.is_some() && link.get_attribute("href") == href;
            log_failure(link.class_list().toggle_with_force("active", active));
        }
    }

    fn focus_nav_toggle(&mut self) {
        if let Some(toggle) = self
            .by_id("nav-toggle")
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        {
            log_failure(toggle.focus());
        }
    }

    fn set_hero_offset(&mut self, offset: f64) {
        if let Some(hero) = self.first(".hero") {
            set_style(&hero, "transform", &format!("translateY({offset}px)"));
        }
    }

    fn set_reading_progress(&mut self, percent: f64) {
        if let Some(fill) = self.first(".reading-progress-fill") {
            set_style(&fill, "width", &format!("{percent}%"));
        }
    }

    fn add_class(&mut self, target: &str, class: &str) {
        if let Some(element) = self.keyed(target) {
            log_failure(element.class_list().add_1(class));
        }
    }

    fn set_text(&mut self, target: &str, text: &str) {
        if let Some(element) = self.keyed(target) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, target: &str, html: &str) {
        if let Some(element) = self.keyed(target) {
            element.set_inner_html(html);
        }
    }

    fn set_style(&mut self, target: &str, property: &str, value: &str) {
        if let Some(element) = self.keyed(target) {
            set_style(&element, property, value);
        }
    }

    fn render_particles(&mut self, particles: &[Particle]) {
        let Some(container) = self.first(".hero-particles") else {
            return;
        };
        for old in select_all(&self.document, ".particle") {
            old.remove();
        }
        for particle in particles {
            let Ok(node) = self.document.create_element("div") else {
                continue;
            };
            node.set_class_name("particle");
            log_failure(node.set_attribute("style", &particle.style()));
            log_failure(container.append_child(&node));
        }
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn activate_service_link(&mut self, target: &str) {
        if let Some(link) = self
            .keyed(target)
            .and_then(|card| select_in(&card, ".service-link"))
            .and_then(|link| link.dyn_into::<HtmlElement>().ok())
        {
            link.click();
        }
    }

    fn open_url(&mut self, url: &str) {
        log_failure(self.window.open_with_url(url));
    }
}

/// Shared handle to the page, cloned into every listener.
#[derive(Clone)]
struct Shell {
    page: Rc<RefCell<Page<DomView>>>,
    window: Window,
}

impl Shell {
    fn now(&self) -> Duration {
        let millis = self.window.performance().map(|p| p.now()).unwrap_or(0.0);
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }

    fn dispatch(&self, event: Event) {
        let now = self.now();
        // A view effect (e.g. clicking a service link) can fire another
        // listener synchronously; such events are re-queued.
        let Ok(mut page) = self.page.try_borrow_mut() else {
            self.schedule(Duration::ZERO, event);
            return;
        };
        page.dispatch(now, event);
        let deferred = page.take_deferred();
        drop(page);

        for item in deferred {
            self.schedule(item.due.saturating_sub(now), item.event);
        }
    }

    fn submit(&self) {
        let snapshot = self
            .page
            .try_borrow()
            .ok()
            .and_then(|page| page.view().form_snapshot());
        if let Some(snapshot) = snapshot {
            self.dispatch(Event::Submit(snapshot));
        }
    }

    fn schedule(&self, delay: Duration, event: Event) {
        let shell = self.clone();
        let callback = Closure::once_into_js(move || shell.dispatch(event));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        log_failure(
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    millis,
                ),
        );
    }

    fn listen(&self, target: &web_sys::EventTarget, kind: &str, handler: impl Fn(&Shell, web_sys::Event) + 'static) {
        let shell = self.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| handler(&shell, e));
        log_failure(target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    fn observe(
        &self,
        elements: Vec<Element>,
        threshold: f64,
        root_margin: Option<&str>,
        once: bool,
        to_event: impl Fn(&Element) -> Option<Event> + 'static,
    ) {
        if elements.is_empty() {
            return;
        }
        let shell = self.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if let Some(event) = to_event(&target) {
                        shell.dispatch(event);
                    }
                    if once {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for element in &elements {
                    observer.observe(element);
                }
            }
            Err(err) => tracing::debug!(?err, "intersection observer unavailable"),
        }
        callback.forget();
    }
}

fn key_of(element: &Element) -> Option<String> {
    element.get_attribute(KEY_ATTR)
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let root = document.document_element();
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let sections = select_all(document, "section[id]")
        .iter()
        .map(|s| Section::new(s.id(), offset_top(s)))
        .collect();
    ScrollMetrics {
        scroll_top,
        scroll_height: root.as_ref().map(|r| f64::from(r.scroll_height())).unwrap_or(0.0),
        client_height: root.as_ref().map(|r| f64::from(r.client_height())).unwrap_or(0.0),
        sections,
    }
}

/// Entry point: mount the page on the current document.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let view = DomView::mount(window.clone(), document.clone());
    let page = Page::new(view, SiteSettings::default());
    let shell = Shell {
        page: Rc::new(RefCell::new(page)),
        window: window.clone(),
    };

    wire_navigation(&shell, &document);
    wire_form(&shell, &document);
    wire_scroll(&shell, &window, &document);
    wire_observers(&shell, &window, &document);
    wire_cards(&shell, &document);

    let hero_title = document
        .query_selector(".hero-title")
        .ok()
        .flatten()
        .map(|t| t.inner_html());
    shell.dispatch(Event::Loaded {
        viewport_width: viewport_width(&window),
        hero_title,
    });
    tracing::info!("page initialized");
}

fn wire_navigation(shell: &Shell, document: &Document) {
    if let Some(toggle) = document.get_element_by_id("nav-toggle") {
        shell.listen(&toggle, "click", |s, _| s.dispatch(Event::NavToggled));
    }
    for link in select_all(document, ".nav-link") {
        shell.listen(&link, "click", |s, _| s.dispatch(Event::NavLinkClicked));
    }
    shell.listen(document, "keydown", |s, e| {
        if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
            s.dispatch(Event::KeyPressed { key });
        }
    });

    for anchor in select_all(document, "a[href^=\"#\"]") {
        let document = document.clone();
        shell.listen(&anchor, "click", move |s, e| {
            e.prevent_default();
            let Some(href) = e
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|a| a.get_attribute("href"))
            else {
                return;
            };
            let target_offset = crate::scroll::anchor_id(&href)
                .and_then(|id| document.get_element_by_id(id))
                .map(|el| offset_top(&el));
            s.dispatch(Event::AnchorClicked {
                href,
                target_offset,
            });
        });
    }
}

fn wire_form(shell: &Shell, document: &Document) {
    let Some(form) = document.get_element_by_id(FORM_ID) else {
        return;
    };
    shell.listen(&form, "submit", |s, e| {
        e.prevent_default();
        s.submit();
    });

    for control in select_all(document, "input, select, textarea") {
        let Some(field) = control
            .get_attribute("name")
            .and_then(|name| FieldName::from_str(&name).ok())
        else {
            continue;
        };
        let blurred = control.clone();
        shell.listen(&control, "blur", move |s, _| {
            s.dispatch(Event::FieldBlurred {
                field,
                value: control_value(&blurred),
            });
        });
        shell.listen(&control, "input", move |s, _| {
            s.dispatch(Event::FieldInput { field });
        });
    }

    // Close buttons are created on the fly, so listen once on the body.
    if let Some(body) = document.body() {
        shell.listen(&body, "click", |s, e| {
            let id = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .filter(|t| t.closest(".notification-close").ok().flatten().is_some())
                .and_then(|t| t.closest(".notification").ok().flatten())
                .and_then(|n| n.get_attribute(NOTIFICATION_ATTR))
                .and_then(|id| id.parse().ok());
            if let Some(id) = id {
                s.dispatch(Event::NotificationDismissed(NotificationId(id)));
            }
        });
    }
}

fn wire_scroll(shell: &Shell, window: &Window, document: &Document) {
    let (w, d) = (window.clone(), document.clone());
    shell.listen(window, "scroll", move |s, _| {
        s.dispatch(Event::Scrolled(scroll_metrics(&w, &d)));
    });

    let w = window.clone();
    shell.listen(window, "resize", move |s, _| {
        s.dispatch(Event::Resized {
            viewport_width: viewport_width(&w),
        });
    });
}

fn wire_observers(shell: &Shell, window: &Window, document: &Document) {
    shell.observe(select_all(document, REVEAL_SELECTOR), 0.1, None, false, |el| {
        Some(Event::Intersected {
            target: key_of(el)?,
            kind: RevealKind::Reveal,
        })
    });

    let has_aos = js_sys::Reflect::has(window, &JsValue::from_str("AOS")).unwrap_or(false);
    if !has_aos {
        shell.observe(
            select_all(document, AOS_SELECTOR),
            0.1,
            Some("0px 0px -50px 0px"),
            false,
            |el| {
                Some(Event::Intersected {
                    target: key_of(el)?,
                    kind: RevealKind::AnimateIn,
                })
            },
        );
    }

    shell.observe(select_all(document, COUNTER_SELECTOR), 0.5, None, true, |el| {
        Some(Event::CounterVisible {
            target: key_of(el)?,
            text: el.text_content().unwrap_or_default(),
        })
    });
}

fn wire_cards(shell: &Shell, document: &Document) {
    for card in select_all(document, CARD_SELECTOR) {
        log_failure(card.set_attribute("tabindex", "0"));
        let Some(key) = key_of(&card) else {
            continue;
        };
        let featured = card.class_list().contains("featured");

        for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = key.clone();
            shell.listen(&card, kind, move |s, _| {
                s.dispatch(Event::CardHovered {
                    target: target.clone(),
                    featured,
                    entered,
                });
            });
        }

        let target = key.clone();
        shell.listen(&card, "keydown", move |s, e| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if crate::cards::activates(&key) {
                e.prevent_default();
            }
            s.dispatch(Event::CardKeyPressed {
                target: target.clone(),
                key,
            });
        });
    }
}
