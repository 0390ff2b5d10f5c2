//! Form state and validation for declaratively composed fields.
//!
//! A form is declared as a tree of [`Node`]s. The [`FormController`]
//! discovers the named fields in that tree, tracks a value, touched flag,
//! validity and error list per field, re-evaluates a field on every edit
//! and every field on submit, and injects the current state back into the
//! tree for rendering.

pub mod controller;
pub mod error;
pub mod node;
pub mod state;
pub mod validation;
pub mod widgets;

pub use controller::{FormConfig, FormController, RenderedForm, SubmitEvent, SubmitHandler};
pub use error::{FormError, FormResult};
pub use node::{FieldDecl, Node};
pub use state::{FieldRecord, FieldResult, FormState, SubmitResult};

pub mod prelude {
    pub use crate::controller::{
        FormConfig, FormController, RenderedForm, SubmitEvent, SubmitHandler,
    };
    pub use crate::error::{FormError, FormResult};
    pub use crate::node::{
        ChangeEvent, ChangeHandler, FieldDecl, FieldProps, FieldView, Node, Opaque, RenderNode,
        SelectOption, Widget,
    };
    pub use crate::state::{FieldRecord, FieldResult, FormState, SubmitResult};
    pub use crate::validation::{FieldError, Locale, Rule, Validations};
}
