//! A virtual-clock event loop for driving a [`Page`] outside the browser.
//!
//! Deferred events are kept in a timer queue ordered by due time, then by
//! scheduling order, so two timers due at the same instant fire in the order
//! they were set, as `setTimeout` does.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::page::{Deferred, Event, Page};
use crate::view::View;

struct Timer {
    due: Duration,
    seq: u64,
    event: Event,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    // Reversed: BinaryHeap is a max-heap and the earliest timer must pop first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// Owns a page and its pending timers.
///
/// ```
/// use std::time::Duration;
/// use olokun_site::page::Page;
/// use olokun_site::runtime::EventLoop;
/// use olokun_site::view::MockView;
/// use olokun_site::{NotificationKind, SiteSettings};
///
/// let page = Page::with_seed(MockView::new(), SiteSettings::default(), 1);
/// let mut event_loop = EventLoop::new(page);
///
/// event_loop.notify("Olá", NotificationKind::Info);
/// event_loop.advance(Duration::from_millis(5300));
/// assert!(event_loop.view().notifications.is_empty());
/// ```
pub struct EventLoop<V: View> {
    page: Page<V>,
    timers: BinaryHeap<Timer>,
    now: Duration,
    next_seq: u64,
}

impl<V: View> EventLoop<V> {
    pub fn new(page: Page<V>) -> Self {
        Self {
            page,
            timers: BinaryHeap::new(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Deliver an event at the current time.
    pub fn dispatch(&mut self, event: Event) {
        self.page.dispatch(self.now, event);
        self.collect();
    }

    /// Submit the contact form at the current time.
    pub fn submit(&mut self) {
        self.page.submit(self.now);
        self.collect();
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: crate::NotificationKind) {
        self.page.notify(self.now, message, kind);
        self.collect();
    }

    /// Move the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        while self.timers.peek().is_some_and(|t| t.due <= until) {
            let Some(timer) = self.timers.pop() else {
                break;
            };
            self.now = timer.due;
            self.page.dispatch(self.now, timer.event);
            self.collect();
        }
        self.now = until;
    }

    /// Fire timers until none are left, or `limit` has passed.
    pub fn run_until_idle(&mut self, limit: Duration) {
        let until = self.now + limit;
        while let Some(due) = self.timers.peek().map(|t| t.due) {
            if due > until {
                break;
            }
            self.advance(due - self.now);
        }
    }

    fn collect(&mut self) {
        for Deferred { due, event } in self.page.take_deferred() {
            self.timers.push(Timer {
                due,
                seq: self.next_seq,
                event,
            });
            self.next_seq += 1;
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn page(&self) -> &Page<V> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<V> {
        &mut self.page
    }

    pub fn view(&self) -> &V {
        self.page.view()
    }

    pub fn view_mut(&mut self) -> &mut V {
        self.page.view_mut()
    }
}
