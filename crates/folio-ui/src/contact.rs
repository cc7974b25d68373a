//! Contact-form submission simulation.
//!
//! Nothing is sent anywhere: the submit control shows a sending label for a
//! fixed delay, then the user is thanked and the form is reset.

use smol_str::SmolStr;
use tracing::{debug, info};

use crate::config::{ContactConfig, ElementConfig};
use crate::markup::render_sending_label;
use crate::view::{Node, RequestToken, TokenSource, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending {
        token: RequestToken,
        /// Submit label to restore, if the control exists.
        original_label: Option<String>,
    },
}

#[derive(Debug)]
pub struct ContactForm {
    form: SmolStr,
    submit_button: SmolStr,
    settings: ContactConfig,
    state: SubmissionState,
    tokens: TokenSource,
}

impl ContactForm {
    pub fn new(elements: &ElementConfig, settings: ContactConfig) -> Self {
        Self {
            form: elements.contact_form.clone(),
            submit_button: elements.submit_button.clone(),
            settings,
            state: SubmissionState::Idle,
            tokens: TokenSource::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Start a simulated submission. Returns `false` when there is no form
    /// on the page; a submission already in flight absorbs the event.
    pub fn submit(&mut self, view: &mut impl View) -> bool {
        if !view.exists(Node::Query(&self.form)) {
            return false;
        }
        if matches!(self.state, SubmissionState::Sending { .. }) {
            debug!("contact form already sending, ignoring submit");
            return true;
        }
        let button = Node::Query(&self.submit_button);
        let original_label = view.inner_html(button);
        view.set_markup(button, &render_sending_label(&self.settings.sending_label));
        view.set_disabled(button, true);

        let token = self.tokens.next_token();
        view.start_timer(self.settings.submit_delay_ms, token);
        info!("simulating contact form submission {token}");
        self.state = SubmissionState::Sending {
            token,
            original_label,
        };
        true
    }

    /// Complete the submission started with `token`.
    pub fn timer_fired(&mut self, token: RequestToken, view: &mut impl View) -> bool {
        let original_label = match &self.state {
            SubmissionState::Sending {
                token: current,
                original_label,
            } if *current == token => original_label.clone(),
            _ => return false,
        };
        self.state = SubmissionState::Idle;

        view.alert(&self.settings.thank_you_message);
        view.reset_form(Node::Query(&self.form));
        let button = Node::Query(&self.submit_button);
        if let Some(label) = original_label {
            view.set_inner_html(button, &label);
        }
        view.set_disabled(button, false);
        true
    }
}
