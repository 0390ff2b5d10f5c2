//! Form controller.
//!
//! The controller owns the declared tree and the current [`FormState`].
//! Change and submit events replace the state; [`FormController::render`]
//! injects the current state into the tree for the presenters.
//!
//! # Example
//!
//! ```
//! use formstate::prelude::*;
//!
//! let children = vec![
//!     Node::field(FieldDecl::new("title").required()),
//!     Node::wrapper(vec![Node::field(FieldDecl::new("body"))]),
//! ];
//! let mut form = FormController::new(children, FormConfig::new().submit_label("Save"))?;
//!
//! form.handle_input_change("title", "Hello")?;
//! let result = form.handle_submit(None);
//! assert!(result.valid);
//! # Ok::<(), FormError>(())
//! ```

mod config;

pub use config::FormConfig;

use log::{debug, trace, warn};

use crate::error::{FormError, FormResult};
use crate::node::{ChangeEvent, Node, RenderNode, discover, inject};
use crate::state::{FieldResult, FormState, SubmitResult};

/// Callback invoked after every submission.
///
/// Receives the aggregated result and the state the controller just stored.
pub type SubmitHandler = Box<dyn FnMut(&SubmitResult, &FormState)>;

/// Platform submission event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the platform's default submission behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The declared tree with current state injected, ready for presenters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedForm {
    pub children: Vec<RenderNode>,
    /// Present only when a non-empty submit label is configured.
    pub submit_label: Option<String>,
}

/// Owns the state of one form.
pub struct FormController {
    children: Vec<Node>,
    state: FormState,
    config: FormConfig,
    on_submit: Option<SubmitHandler>,
    dirty: bool,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("children", &self.children)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("on_submit", &self.on_submit.as_ref().map(|_| "..."))
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FormController {
    /// Discover the fields in `children` and seed their state.
    ///
    /// Fails on configuration errors: unnamed, duplicate or reserved field
    /// names.
    pub fn new(children: Vec<Node>, config: FormConfig) -> FormResult<Self> {
        let discovered = discover(&children)?;
        let state = FormState::initialize(&discovered, &config.values, config.locale)?;
        debug!("Form constructed with {} fields", state.len());

        Ok(Self {
            children,
            state,
            config,
            on_submit: None,
            dirty: true,
        })
    }

    /// Set the submit callback.
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&SubmitResult, &FormState) + 'static,
    {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Current state (read-only).
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The declared tree.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Apply an edit to one field and re-evaluate it.
    ///
    /// Unknown fields are rejected and the state is left as it was.
    pub fn handle_input_change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> FormResult<FieldResult> {
        let (next, result) = self.state.apply_change(name, value).inspect_err(|e| {
            warn!("Rejected change event: {e}");
        })?;
        trace!("Field '{}' changed, valid={}", name, result.valid);

        self.state = next;
        self.dirty = true;
        Ok(result)
    }

    /// Apply a change event produced by a [`ChangeHandler`](crate::node::ChangeHandler).
    pub fn dispatch(&mut self, event: ChangeEvent) -> FormResult<FieldResult> {
        let Some(name) = event.name else {
            warn!("Rejected change event: {}", FormError::MalformedEvent);
            return Err(FormError::MalformedEvent);
        };
        self.handle_input_change(&name, event.value)
    }

    /// Evaluate and touch every field, then invoke the submit callback.
    ///
    /// The new state is stored before the callback runs.
    pub fn handle_submit(&mut self, event: Option<&mut SubmitEvent>) -> SubmitResult {
        if let Some(event) = event {
            event.prevent_default();
        }

        let (next, result) = self.state.apply_submit();
        debug!(
            "Form submitted: valid={} ({} fields)",
            result.valid,
            result.fields.len()
        );

        self.state = next;
        self.dirty = true;

        if let Some(handler) = self.on_submit.as_mut() {
            handler(&result, &self.state);
        }
        result
    }

    /// Replace the declared tree, keeping field state.
    ///
    /// The new tree must declare exactly the same fields in the same order.
    /// Field rules are fixed at construction; custom errors and presentation
    /// metadata are taken from the new tree.
    pub fn set_children(&mut self, children: Vec<Node>) -> FormResult<()> {
        let discovered = discover(&children)?;
        let found: Vec<&str> = discovered.iter().map(|f| f.name.as_str()).collect();
        if found != self.state.names() {
            return Err(FormError::FieldSetChanged {
                expected: self.state.names().join(", "),
                found: found.join(", "),
            });
        }

        self.children = children;
        self.dirty = true;
        Ok(())
    }

    /// Inject the current state into the declared tree.
    pub fn render(&self) -> RenderedForm {
        RenderedForm {
            children: inject(&self.children, &self.state),
            submit_label: self.config.visible_submit_label().map(str::to_string),
        }
    }

    /// Check if the state changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
