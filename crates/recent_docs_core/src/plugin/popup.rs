//! Recent list popup lifecycle.
//!
//! # Invariants
//! - The popup is either Closed or Open; there is no intermediate state.
//! - Opening triggers exactly one aggregation call.
//! - Dismiss listeners live only while `Open`; every transition to `Closed`
//!   removes them through `ListenerGuard` drop.
//! - An empty list and a failed load are distinct contents.

use crate::error::{RecentError, RecentResult};
use crate::model::view_item::ViewItem;
use crate::model::{DocumentId, EpochMs};
use crate::service::aggregator::RecentAggregator;
use crate::service::presenter::present_in;
use crate::settings::RecentSettings;
use crate::source::{HostCollectionSource, Navigator};
use chrono::{TimeZone, Utc};
use log::{debug, error, info};
use std::fmt::Display;

/// Host-assigned listener registration id.
pub type ListenerId = u64;

/// Dismiss triggers watched while the popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupListener {
    OutsideClick,
    EscapeKey,
}

const DISMISS_LISTENERS: [PopupListener; 2] =
    [PopupListener::OutsideClick, PopupListener::EscapeKey];

/// Host event surface used for dismiss listeners.
pub trait PopupEvents {
    fn add_listener(&self, listener: PopupListener) -> ListenerId;
    fn remove_listener(&self, listener_id: ListenerId);
}

/// Scoped listener registrations, removed on drop.
pub struct ListenerGuard<'e, E: PopupEvents + ?Sized> {
    events: &'e E,
    listener_ids: Vec<ListenerId>,
}

impl<'e, E: PopupEvents + ?Sized> ListenerGuard<'e, E> {
    pub fn register(events: &'e E, listeners: &[PopupListener]) -> Self {
        let listener_ids = listeners
            .iter()
            .map(|listener| events.add_listener(*listener))
            .collect();
        Self {
            events,
            listener_ids,
        }
    }

    pub fn len(&self) -> usize {
        self.listener_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listener_ids.is_empty()
    }
}

impl<E: PopupEvents + ?Sized> Drop for ListenerGuard<'_, E> {
    fn drop(&mut self) {
        for listener_id in self.listener_ids.drain(..) {
            self.events.remove_listener(listener_id);
        }
    }
}

/// What an open popup shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupContent {
    Items(Vec<ViewItem>),
    /// Load succeeded but no dated document exists.
    Empty,
    /// Load failed; carries a user-displayable message.
    Failed(String),
}

/// Why an open popup was closed without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    EscapeKey,
    OutsideClick,
}

struct OpenPopup<'e, E: PopupEvents + ?Sized> {
    content: PopupContent,
    _listeners: ListenerGuard<'e, E>,
}

/// Two-state popup driving one recent list.
///
/// `open == None` is the Closed state.
pub struct RecentPopup<'e, E: PopupEvents + ?Sized> {
    events: &'e E,
    settings: RecentSettings,
    open: Option<OpenPopup<'e, E>>,
}

impl<'e, E: PopupEvents + ?Sized> RecentPopup<'e, E> {
    pub fn new(events: &'e E, settings: RecentSettings) -> Self {
        Self {
            events,
            settings,
            open: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Current content, `None` while closed.
    pub fn content(&self) -> Option<&PopupContent> {
        self.open.as_ref().map(|open| &open.content)
    }

    /// Opens (or re-opens) the popup with calendar dates in UTC.
    pub fn open<S: HostCollectionSource>(
        &mut self,
        aggregator: &RecentAggregator<S>,
        now: EpochMs,
    ) -> &PopupContent {
        self.open_in(aggregator, now, &Utc)
    }

    /// Opens the popup, running one fresh aggregation.
    ///
    /// Re-opening an open popup replaces its content and listeners.
    pub fn open_in<S, Tz>(
        &mut self,
        aggregator: &RecentAggregator<S>,
        now: EpochMs,
        tz: &Tz,
    ) -> &PopupContent
    where
        S: HostCollectionSource,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.open = None;

        let content = match aggregator.collect(self.settings.max_items()) {
            Ok(summaries) if summaries.is_empty() => PopupContent::Empty,
            Ok(summaries) => PopupContent::Items(present_in(
                &summaries,
                now,
                self.settings.show_collection,
                tz,
            )),
            Err(err) => {
                error!(
                    "event=popup_open module=popup status=error error_code={}",
                    err.code()
                );
                PopupContent::Failed(err.to_string())
            }
        };
        info!(
            "event=popup_open module=popup status=ok items={}",
            match &content {
                PopupContent::Items(items) => items.len(),
                _ => 0,
            }
        );

        let listeners = ListenerGuard::register(self.events, &DISMISS_LISTENERS);
        let open = self.open.insert(OpenPopup {
            content,
            _listeners: listeners,
        });
        &open.content
    }

    /// Closes the popup on Escape or an outside click.
    ///
    /// Returns `false` when the popup was already closed.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.open = None;
        debug!("event=popup_close module=popup status=ok reason={reason:?}");
        true
    }

    /// Selects the item at `index`, closes the popup and asks the host to open it.
    ///
    /// Returns `Ok(None)` without any transition when the popup is closed or
    /// `index` does not point at a listed item.
    ///
    /// # Errors
    /// - Returns `RecentError::NavigationFailed` when the host cannot open the
    ///   document. The popup stays closed.
    pub fn select<N: Navigator + ?Sized>(
        &mut self,
        index: usize,
        navigator: &N,
    ) -> RecentResult<Option<DocumentId>> {
        let document_id = match self.content() {
            Some(PopupContent::Items(items)) => match items.get(index) {
                Some(item) => item.document_id.clone(),
                None => return Ok(None),
            },
            _ => return Ok(None),
        };

        self.open = None;
        debug!("event=popup_close module=popup status=ok reason=select");

        navigator.open(&document_id).map_err(|cause| {
            error!("event=navigate module=popup status=error error_code=navigation_failed");
            RecentError::NavigationFailed {
                document_id: document_id.clone(),
                cause,
            }
        })?;
        Ok(Some(document_id))
    }
}

#[cfg(test)]
mod tests {
    use super::{DismissReason, ListenerId, PopupContent, PopupEvents, PopupListener, RecentPopup};
    use crate::error::RecentError;
    use crate::service::aggregator::RecentAggregator;
    use crate::settings::RecentSettings;
    use crate::source::{
        CollectionHandle, HostCollectionSource, MemoryCollection, MemoryDocument, MemorySource,
        NavigationError, Navigator, SourceError, SourceResult,
    };
    use std::cell::RefCell;

    const NOW: i64 = 1_718_452_800_000;

    #[derive(Default)]
    struct RecordingEvents {
        next_id: RefCell<ListenerId>,
        active: RefCell<Vec<(ListenerId, PopupListener)>>,
    }

    impl RecordingEvents {
        fn active_count(&self) -> usize {
            self.active.borrow().len()
        }
    }

    impl PopupEvents for RecordingEvents {
        fn add_listener(&self, listener: PopupListener) -> ListenerId {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            self.active.borrow_mut().push((*next, listener));
            *next
        }

        fn remove_listener(&self, listener_id: ListenerId) {
            self.active.borrow_mut().retain(|(id, _)| *id != listener_id);
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Navigator for RecordingNavigator {
        fn open(&self, document_id: &str) -> Result<(), NavigationError> {
            if self.fail {
                return Err(NavigationError::Rejected("document locked".to_string()));
            }
            self.opened.borrow_mut().push(document_id.to_string());
            Ok(())
        }
    }

    struct FailingSource;

    impl HostCollectionSource for FailingSource {
        fn list_collections(&self) -> SourceResult<Vec<Box<dyn CollectionHandle + '_>>> {
            Err(SourceError::host("host offline"))
        }
    }

    fn source() -> MemorySource {
        MemorySource::new(vec![MemoryCollection::new("Notes")
            .with_document(MemoryDocument::new("n1", "First", Some(NOW - 120_000)))
            .with_document(MemoryDocument::new("n2", "Second", Some(NOW - 60_000)))])
    }

    #[test]
    fn open_registers_listeners_and_dismiss_removes_them() {
        let events = RecordingEvents::default();
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, RecentSettings::default());

        let content = popup.open(&aggregator, NOW).clone();
        let PopupContent::Items(items) = content else {
            panic!("expected items");
        };
        assert_eq!(items[0].document_id, "n2");
        assert_eq!(events.active_count(), 2);

        assert!(popup.dismiss(DismissReason::EscapeKey));
        assert!(!popup.is_open());
        assert_eq!(events.active_count(), 0);
        assert!(!popup.dismiss(DismissReason::OutsideClick));
    }

    #[test]
    fn reopen_replaces_listeners_instead_of_stacking() {
        let events = RecordingEvents::default();
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, RecentSettings::default());

        popup.open(&aggregator, NOW);
        popup.open(&aggregator, NOW);
        assert_eq!(events.active_count(), 2);
    }

    #[test]
    fn select_closes_then_navigates() {
        let events = RecordingEvents::default();
        let navigator = RecordingNavigator::default();
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, RecentSettings::default());
        popup.open(&aggregator, NOW);

        let selected = popup.select(1, &navigator).expect("navigation succeeds");
        assert_eq!(selected.as_deref(), Some("n1"));
        assert_eq!(*navigator.opened.borrow(), vec!["n1".to_string()]);
        assert!(!popup.is_open());
        assert_eq!(events.active_count(), 0);
    }

    #[test]
    fn select_out_of_range_keeps_popup_open() {
        let events = RecordingEvents::default();
        let navigator = RecordingNavigator::default();
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, RecentSettings::default());
        popup.open(&aggregator, NOW);

        assert_eq!(popup.select(9, &navigator).unwrap(), None);
        assert!(popup.is_open());
        assert!(navigator.opened.borrow().is_empty());
    }

    #[test]
    fn navigation_failure_is_reported_and_popup_stays_closed() {
        let events = RecordingEvents::default();
        let navigator = RecordingNavigator {
            fail: true,
            ..RecordingNavigator::default()
        };
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, RecentSettings::default());
        popup.open(&aggregator, NOW);

        let err = popup.select(0, &navigator).expect_err("navigation must fail");
        match err {
            RecentError::NavigationFailed { document_id, .. } => assert_eq!(document_id, "n2"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!popup.is_open());
        assert_eq!(events.active_count(), 0);
    }

    #[test]
    fn empty_and_failed_loads_are_distinct() {
        let events = RecordingEvents::default();
        let mut popup = RecentPopup::new(&events, RecentSettings::default());

        let empty = RecentAggregator::new(MemorySource::default());
        assert_eq!(popup.open(&empty, NOW), &PopupContent::Empty);

        let failing = RecentAggregator::new(FailingSource);
        match popup.open(&failing, NOW) {
            PopupContent::Failed(message) => assert!(message.contains("host offline")),
            other => panic!("unexpected content: {other:?}"),
        }
        assert!(popup.is_open());
    }

    #[test]
    fn hidden_collection_setting_reaches_view_items() {
        let events = RecordingEvents::default();
        let settings = RecentSettings {
            max_files: 1,
            show_collection: false,
        };
        let aggregator = RecentAggregator::new(source());
        let mut popup = RecentPopup::new(&events, settings);

        match popup.open(&aggregator, NOW) {
            PopupContent::Items(items) => {
                assert_eq!(items.len(), 1);
                assert!(items[0].collection_label.is_none());
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }
}
