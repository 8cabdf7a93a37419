//! Page router - coordinates page visibility classes with scene placement
//!
//! A transition drops `active` from the outgoing pages immediately and hides
//! them after `hide_delay_ms`; the incoming page is unhidden immediately and
//! activated after `show_delay_ms`. For up to `hide_delay_ms` the outgoing
//! page is still laid out while the incoming one fades in.
//!
//! Delayed class changes are held here rather than in the timers that fire
//! them. Starting a new transition drops everything still pending from the
//! previous one, so overlapping navigations always settle to one active page.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::TransitionConfig;
use crate::page::{PageClass, PageId, PageKey, TransitionTarget};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

/// Access to the page elements of the document
pub trait PageDom {
    /// Every page element, in document order
    fn pages(&self) -> Vec<PageKey>;
    fn has_class(&self, page: &PageKey, class: PageClass) -> bool;
    fn add_class(&mut self, page: &PageKey, class: PageClass);
    fn remove_class(&mut self, page: &PageKey, class: PageClass);
}

/// Receiver of camera/core placement requests
pub trait TransformTargetSink {
    fn set_transform_target(&mut self, target: TransitionTarget);
}

/// A class to add once the transition clock reaches `due_ms`
#[derive(Debug, Clone, PartialEq)]
struct ClassChange {
    due_ms: f64,
    page: PageKey,
    class: PageClass,
}

/// Handle describing a started transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Generation of this transition; older generations are stale
    pub generation: u64,
    pub page: PageId,
    /// Clock value the transition started at
    pub started_ms: f64,
    /// Distinct clock values at which pending changes fall due, ascending
    pub deadlines_ms: Vec<f64>,
}

pub struct PageRouter<D, S> {
    dom: D,
    viewport: S,
    config: TransitionConfig,
    active: Option<PageId>,
    generation: u64,
    pending: Vec<ClassChange>,
}

impl<D: PageDom, S: TransformTargetSink> PageRouter<D, S> {
    pub fn new(dom: D, viewport: S, config: TransitionConfig) -> Self {
        Self {
            dom,
            viewport,
            config,
            active: None,
            generation: 0,
            pending: Vec::new(),
        }
    }

    /// Start a transition to `page_id` at clock value `now_ms`
    pub fn show_page(&mut self, page_id: &str, now_ms: f64) -> Result<Transition, RouterError> {
        let pages = self.dom.pages();
        let target = pages
            .iter()
            .find(|p| p.id().is_some_and(|id| id.as_str() == page_id))
            .cloned()
            .ok_or_else(|| RouterError::PageNotFound(page_id.to_string()))?;
        let target_id = PageId::new(page_id);

        self.generation += 1;
        if !self.pending.is_empty() {
            debug!(
                dropped = self.pending.len(),
                generation = self.generation,
                "Superseding pending page transition"
            );
            self.pending.clear();
        }

        let hide_at = now_ms + self.config.hide_delay_ms;
        for page in pages.iter().filter(|p| **p != target) {
            self.dom.remove_class(page, PageClass::Active);
            if !self.dom.has_class(page, PageClass::Hidden) {
                self.pending.push(ClassChange {
                    due_ms: hide_at,
                    page: page.clone(),
                    class: PageClass::Hidden,
                });
            }
        }

        // Re-showing the current page restarts its fade
        self.dom.remove_class(&target, PageClass::Active);
        self.dom.remove_class(&target, PageClass::Hidden);
        self.pending.push(ClassChange {
            due_ms: now_ms + self.config.show_delay_ms,
            page: target.clone(),
            class: PageClass::Active,
        });
        self.pending.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));

        let placement = self.config.target_for(page_id);
        self.viewport.set_transform_target(placement);

        info!(
            page = %target_id,
            generation = self.generation,
            core_x = placement.core_x,
            camera_z = placement.camera_z,
            "Showing page"
        );
        self.active = Some(target_id.clone());

        let mut deadlines_ms: Vec<f64> = self.pending.iter().map(|c| c.due_ms).collect();
        deadlines_ms.dedup();

        Ok(Transition {
            generation: self.generation,
            page: target_id,
            started_ms: now_ms,
            deadlines_ms,
        })
    }

    /// Apply every pending class change due at or before `now_ms`
    ///
    /// Returns the number of changes applied.
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let split = self.pending.partition_point(|c| c.due_ms <= now_ms);
        let due: Vec<ClassChange> = self.pending.drain(..split).collect();
        for change in &due {
            self.dom.add_class(&change.page, change.class);
        }
        if !due.is_empty() {
            debug!(
                applied = due.len(),
                remaining = self.pending.len(),
                "Applied page class changes"
            );
        }
        due.len()
    }

    /// Apply everything still pending, regardless of clock
    pub fn settle(&mut self) -> usize {
        self.poll(f64::INFINITY)
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Page most recently requested through `show_page`
    pub fn active_page(&self) -> Option<&PageId> {
        self.active.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn viewport(&self) -> &S {
        &self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct FakeDom {
        order: Vec<PageKey>,
        classes: HashMap<PageKey, HashSet<PageClass>>,
    }

    impl FakeDom {
        fn with_pages(ids: &[&str]) -> Self {
            let mut dom = Self::default();
            for id in ids {
                dom.push(PageKey::Id(PageId::new(id)));
            }
            dom
        }

        fn push(&mut self, page: PageKey) {
            self.order.push(page.clone());
            self.classes.insert(page, HashSet::new());
        }

        fn has(&self, id: &str, class: PageClass) -> bool {
            self.has_class(&PageKey::Id(PageId::new(id)), class)
        }

        fn count(&self, class: PageClass) -> usize {
            self.classes.values().filter(|c| c.contains(&class)).count()
        }

        /// Exactly `id` active and every other page hidden
        fn assert_settled_on(&self, id: &str) {
            for page in &self.order {
                let classes = &self.classes[page];
                if page.id().is_some_and(|p| p.as_str() == id) {
                    assert!(classes.contains(&PageClass::Active), "{page} should be active");
                    assert!(!classes.contains(&PageClass::Hidden), "{page} should not be hidden");
                } else {
                    assert!(classes.contains(&PageClass::Hidden), "{page} should be hidden");
                    assert!(!classes.contains(&PageClass::Active), "{page} should not be active");
                }
            }
            assert_eq!(self.count(PageClass::Active), 1);
        }
    }

    impl PageDom for FakeDom {
        fn pages(&self) -> Vec<PageKey> {
            self.order.clone()
        }

        fn has_class(&self, page: &PageKey, class: PageClass) -> bool {
            self.classes.get(page).is_some_and(|c| c.contains(&class))
        }

        fn add_class(&mut self, page: &PageKey, class: PageClass) {
            self.classes.entry(page.clone()).or_default().insert(class);
        }

        fn remove_class(&mut self, page: &PageKey, class: PageClass) {
            if let Some(c) = self.classes.get_mut(page) {
                c.remove(&class);
            }
        }
    }

    #[derive(Default)]
    struct FakeViewport {
        targets: Vec<TransitionTarget>,
    }

    impl TransformTargetSink for FakeViewport {
        fn set_transform_target(&mut self, target: TransitionTarget) {
            self.targets.push(target);
        }
    }

    const PAGES: [&str; 4] = ["home", "about", "projects", "contact"];

    fn router() -> PageRouter<FakeDom, FakeViewport> {
        let mut dom = FakeDom::with_pages(&PAGES);
        // Document as served: home visible, the rest hidden
        dom.add_class(&PageKey::Id(PageId::new("home")), PageClass::Active);
        for id in &PAGES[1..] {
            dom.add_class(&PageKey::Id(PageId::new(id)), PageClass::Hidden);
        }
        PageRouter::new(dom, FakeViewport::default(), TransitionConfig::default())
    }

    #[test]
    fn test_settles_on_every_page() {
        for id in PAGES {
            let mut router = router();
            router.show_page(id, 0.0).unwrap();
            router.poll(550.0);
            assert!(router.is_settled());
            router.dom().assert_settled_on(id);
            assert_eq!(router.active_page().map(PageId::as_str), Some(id));
        }
    }

    #[test]
    fn test_timeline() {
        let mut router = router();
        let transition = router.show_page("about", 1000.0).unwrap();
        assert_eq!(transition.deadlines_ms, vec![1050.0, 1500.0]);
        assert_eq!(transition.started_ms, 1000.0);

        // Immediately: old page loses active, new page is unhidden
        assert!(!router.dom().has("home", PageClass::Active));
        assert!(!router.dom().has("home", PageClass::Hidden));
        assert!(!router.dom().has("about", PageClass::Hidden));
        assert!(!router.dom().has("about", PageClass::Active));

        router.poll(1049.0);
        assert!(!router.dom().has("about", PageClass::Active));

        router.poll(1050.0);
        assert!(router.dom().has("about", PageClass::Active));
        // Overlap window: home still laid out
        assert!(!router.dom().has("home", PageClass::Hidden));

        router.poll(1500.0);
        router.dom().assert_settled_on("about");
    }

    #[test]
    fn test_home_and_other_targets() {
        let mut router = router();
        router.show_page("home", 0.0).unwrap();
        router.show_page("projects", 10.0).unwrap();

        let targets = &router.viewport().targets;
        assert_eq!(targets.len(), 2);
        assert_eq!(
            targets[0],
            TransitionTarget {
                core_x: 0.0,
                camera_z: 30.0,
                duration_secs: 1.0,
            }
        );
        assert_eq!(
            targets[1],
            TransitionTarget {
                core_x: 20.0,
                camera_z: 25.0,
                duration_secs: 1.0,
            }
        );
    }

    #[test]
    fn test_missing_page_leaves_document_untouched() {
        let mut router = router();
        let err = router.show_page("nowhere", 0.0).unwrap_err();
        assert_eq!(err, RouterError::PageNotFound("nowhere".to_string()));
        assert_eq!(router.generation(), 0);
        assert!(router.viewport().targets.is_empty());
        assert!(router.is_settled());
        assert!(router.dom().has("home", PageClass::Active));
        assert!(router.dom().has("about", PageClass::Hidden));
    }

    #[test]
    fn test_overlapping_transitions_settle_on_latest() {
        let mut router = router();
        let first = router.show_page("about", 0.0).unwrap();
        router.poll(100.0);
        assert!(router.dom().has("about", PageClass::Active));

        let second = router.show_page("contact", 200.0).unwrap();
        assert!(second.generation > first.generation);

        // The first transition's hide deadline no longer hides anything early
        router.poll(500.0);
        assert!(!router.dom().has("home", PageClass::Hidden));

        router.poll(700.0);
        router.dom().assert_settled_on("contact");
    }

    #[test]
    fn test_rapid_transitions_before_any_deadline() {
        let mut router = router();
        router.show_page("about", 0.0).unwrap();
        router.show_page("projects", 10.0).unwrap();
        router.show_page("home", 20.0).unwrap();
        router.settle();
        router.dom().assert_settled_on("home");
        assert_eq!(router.viewport().targets.last().map(|t| t.core_x), Some(0.0));
    }

    #[test]
    fn test_reshowing_active_page_never_hides_it() {
        let mut router = router();
        router.show_page("home", 0.0).unwrap();
        router.settle();
        router.show_page("home", 1000.0).unwrap();
        assert!(!router.dom().has("home", PageClass::Active));
        router.settle();
        router.dom().assert_settled_on("home");
    }

    #[test]
    fn test_unstyled_document_settles() {
        let dom = FakeDom::with_pages(&PAGES);
        let mut router = PageRouter::new(dom, FakeViewport::default(), TransitionConfig::default());
        router.show_page("contact", 0.0).unwrap();
        router.settle();
        router.dom().assert_settled_on("contact");
    }

    #[test]
    fn test_pages_without_id_are_hidden() {
        let mut dom = FakeDom::with_pages(&["home", "about"]);
        let unnamed = PageKey::Position(2);
        dom.push(unnamed.clone());
        dom.add_class(&unnamed, PageClass::Active);

        let mut router = PageRouter::new(dom, FakeViewport::default(), TransitionConfig::default());
        router.show_page("about", 0.0).unwrap();
        assert!(!router.dom().has_class(&unnamed, PageClass::Active));

        router.poll(500.0);
        assert!(router.dom().has_class(&unnamed, PageClass::Hidden));
        router.dom().assert_settled_on("about");
    }

    #[test]
    fn test_page_without_id_is_not_a_target() {
        let mut dom = FakeDom::with_pages(&["home"]);
        dom.push(PageKey::Position(1));

        let mut router = PageRouter::new(dom, FakeViewport::default(), TransitionConfig::default());
        let err = router.show_page("page[1]", 0.0).unwrap_err();
        assert_eq!(err, RouterError::PageNotFound("page[1]".to_string()));
        assert_eq!(router.generation(), 0);
    }
}
