//! DOM side of the page router
//!
//! Page elements are the document's `.page` nodes, addressed by id, or by
//! position in the node list for pages that carry no id. Delayed
//! class changes are fired by `setTimeout`; a new navigation clears the
//! previous navigation's timers, and any timer that still fires checks the
//! router generation before touching the document.

use std::cell::RefCell;
use std::rc::Rc;

use corelight_core::{PageClass, PageDom, PageKey, PageRouter, TransitionConfig};
use corelight_scene::ViewportController;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Window};

/// Selector matching every page element
const PAGE_SELECTOR: &str = ".page";

/// Selector for elements that navigate when clicked, e.g. `<a data-page="about">`
const LINK_SELECTOR: &str = "[data-page]";

/// The document's page elements
pub struct DocumentPages {
    document: Document,
}

impl DocumentPages {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn page_elements(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(PAGE_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element(&self, page: &PageKey) -> Option<Element> {
        let element = match page {
            PageKey::Id(id) => self.document.get_element_by_id(id.as_str()),
            PageKey::Position(n) => self.page_elements().into_iter().nth(*n),
        };
        if element.is_none() {
            tracing::warn!("Page element disappeared: {}", page);
        }
        element
    }
}

impl PageDom for DocumentPages {
    fn pages(&self) -> Vec<PageKey> {
        self.page_elements()
            .iter()
            .enumerate()
            .map(|(n, element)| match element.id() {
                id if id.is_empty() => PageKey::Position(n),
                id => PageKey::Id(id.into()),
            })
            .collect()
    }

    fn has_class(&self, page: &PageKey, class: PageClass) -> bool {
        self.element(page)
            .map(|e| e.class_list().contains(class.as_str()))
            .unwrap_or(false)
    }

    fn add_class(&mut self, page: &PageKey, class: PageClass) {
        if let Some(element) = self.element(page) {
            if let Err(e) = element.class_list().add_1(class.as_str()) {
                tracing::warn!("Failed to add class {} to {}: {:?}", class, page, e);
            }
        }
    }

    fn remove_class(&mut self, page: &PageKey, class: PageClass) {
        if let Some(element) = self.element(page) {
            if let Err(e) = element.class_list().remove_1(class.as_str()) {
                tracing::warn!("Failed to remove class {} from {}: {:?}", class, page, e);
            }
        }
    }
}

type Router = PageRouter<DocumentPages, ViewportController>;

/// Page router bound to the browser's timers
#[derive(Clone)]
pub struct Navigator {
    window: Window,
    router: Rc<RefCell<Router>>,
    timers: Rc<RefCell<Vec<i32>>>,
}

impl Navigator {
    pub fn new(
        window: Window,
        document: Document,
        viewport: ViewportController,
        config: TransitionConfig,
    ) -> Self {
        let router = PageRouter::new(DocumentPages::new(document), viewport, config);
        Self {
            window,
            router: Rc::new(RefCell::new(router)),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Start a transition to `page_id`
    pub fn show_page(&self, page_id: &str) -> Result<(), JsValue> {
        let now = self.now_ms();
        let transition = self
            .router
            .borrow_mut()
            .show_page(page_id, now)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

        self.clear_timers();
        for deadline in transition.deadlines_ms {
            self.schedule(transition.generation, deadline, deadline - transition.started_ms)?;
        }
        Ok(())
    }

    fn schedule(&self, generation: u64, deadline_ms: f64, delay_ms: f64) -> Result<(), JsValue> {
        let router = Rc::clone(&self.router);
        let callback = Closure::once_into_js(move || {
            let Ok(mut router) = router.try_borrow_mut() else {
                tracing::warn!("Page router busy, dropping class update");
                return;
            };
            // Superseded transitions leave the document alone
            if router.generation() == generation {
                router.poll(deadline_ms);
            }
        });

        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.ceil().max(0.0) as i32,
            )?;
        self.timers.borrow_mut().push(handle);
        Ok(())
    }

    fn clear_timers(&self) {
        for handle in self.timers.borrow_mut().drain(..) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    /// Expose `window.showPage(pageId)` for inline handlers in the markup
    pub fn install_global(&self) -> Result<(), JsValue> {
        let navigator = self.clone();
        let show_page = Closure::wrap(Box::new(move |page_id: String| {
            navigator.show_page(&page_id)
        }) as Box<dyn FnMut(String) -> Result<(), JsValue>>);

        js_sys::Reflect::set(&self.window, &JsValue::from_str("showPage"), show_page.as_ref())?;
        show_page.forget();
        Ok(())
    }

    /// Route clicks on `[data-page]` elements through the router
    pub fn install_links(&self, document: &Document) -> Result<usize, JsValue> {
        let links = document.query_selector_all(LINK_SELECTOR)?;
        let mut installed = 0;

        for i in 0..links.length() {
            let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(page_id) = link.get_attribute("data-page") else {
                continue;
            };

            let navigator = self.clone();
            let on_click = Closure::wrap(Box::new(move |event: Event| {
                event.prevent_default();
                if let Err(e) = navigator.show_page(&page_id) {
                    tracing::error!("Navigation failed: {:?}", e);
                }
            }) as Box<dyn FnMut(Event)>);

            link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
            installed += 1;
        }

        Ok(installed)
    }
}
