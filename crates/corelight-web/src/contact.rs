//! Contact form wiring: DOM controls and the HTTP round trip

use std::cell::RefCell;
use std::rc::Rc;

use corelight_core::{FormConfig, FormSubmitter, FormView, SubmitOutcome, SubmitRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, Window};

const FORM_ID: &str = "contactForm";
const CONTAINER_ID: &str = "register-form-container";
const SUCCESS_ID: &str = "success-message";
const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// The contact form's elements
#[derive(Clone)]
struct ContactForm {
    window: Window,
    form: HtmlFormElement,
    submit: HtmlButtonElement,
    container: HtmlElement,
    success: HtmlElement,
}

impl ContactForm {
    /// Look up the form's elements, `None` if the page has no contact form
    fn from_document(window: &Window, document: &Document) -> Result<Option<Self>, JsValue> {
        let Some(form) = document.get_element_by_id(FORM_ID) else {
            return Ok(None);
        };
        let form: HtmlFormElement = form.dyn_into()?;
        let submit: HtmlButtonElement = form
            .query_selector(SUBMIT_SELECTOR)?
            .ok_or_else(|| JsValue::from_str("contact form has no submit button"))?
            .dyn_into()?;
        let container: HtmlElement = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| JsValue::from_str("missing #register-form-container"))?
            .dyn_into()?;
        let success: HtmlElement = document
            .get_element_by_id(SUCCESS_ID)
            .ok_or_else(|| JsValue::from_str("missing #success-message"))?
            .dyn_into()?;

        Ok(Some(Self {
            window: window.clone(),
            form,
            submit,
            container,
            success,
        }))
    }

    fn set_display(element: &HtmlElement, value: &str) {
        if let Err(e) = element.style().set_property("display", value) {
            tracing::warn!("Failed to set display={}: {:?}", value, e);
        }
    }
}

impl FormView for ContactForm {
    fn submit_label(&self) -> String {
        self.submit.inner_text()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit.set_inner_text(label);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit.set_disabled(!enabled);
    }

    fn hide_form(&mut self) {
        Self::set_display(&self.container, "none");
    }

    fn show_success(&mut self) {
        Self::set_display(&self.success, "block");
    }

    fn reset_fields(&mut self) {
        self.form.reset();
    }

    fn notify_error(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::error!("Failed to show alert '{}': {:?}", message, e);
        }
    }
}

/// Attach the submit handler; a page without a contact form is left alone
pub fn install(window: &Window, document: &Document, config: &FormConfig) -> Result<bool, JsValue> {
    let Some(view) = ContactForm::from_document(window, document)? else {
        tracing::info!("No contact form on this page");
        return Ok(false);
    };

    let submitter = Rc::new(RefCell::new(FormSubmitter::new(config.clone())));
    let form = view.form.clone();
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        // Stop the full-page reload
        event.prevent_default();
        handle_submit(Rc::clone(&submitter), view.clone());
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(true)
}

fn handle_submit(submitter: Rc<RefCell<FormSubmitter>>, mut view: ContactForm) {
    use wasm_bindgen_futures::spawn_local;

    // Fields are captured before the request goes out
    let body = FormData::new_with_form(&view.form);

    let begun = submitter.borrow_mut().begin(&mut view);
    let request = match begun {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Ignoring submit: {}", e);
            return;
        }
    };

    spawn_local(async move {
        let outcome = match body {
            Ok(body) => send(&request, body).await,
            Err(e) => SubmitOutcome::Unreachable {
                reason: format!("{:?}", e),
            },
        };

        if let Err(e) = submitter.borrow_mut().finish(&mut view, outcome) {
            tracing::warn!("Dropped submission outcome: {}", e);
        }
    });
}

/// POST the form to the service and classify what came back
async fn send(request: &SubmitRequest, body: FormData) -> SubmitOutcome {
    let sent = match gloo_net::http::Request::post(&request.endpoint)
        .header("Accept", request.accept)
        .body(body)
    {
        Ok(req) => req.send().await,
        Err(e) => Err(e),
    };

    match sent {
        Ok(response) => SubmitOutcome::from_status(response.status()),
        Err(e) => {
            tracing::error!("Form submission failed: {:?}", e);
            SubmitOutcome::Unreachable {
                reason: e.to_string(),
            }
        }
    }
}
