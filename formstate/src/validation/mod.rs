//! Field validation.
//!
//! Rules are declared per field as an ordered [`Validations`] set and run
//! by [`evaluate`], a pure function of the raw value and the rules.
//!
//! # Example
//!
//! ```
//! use formstate::validation::{evaluate, Validations};
//!
//! let rules = Validations::new().required().min_length(3);
//!
//! let verdict = evaluate("", &rules);
//! assert!(!verdict.valid);
//! assert_eq!(verdict.errors[0].rule.as_deref(), Some("required"));
//!
//! assert!(evaluate("hello", &rules).valid);
//! ```

mod evaluator;
mod messages;
mod rule;

pub use evaluator::{FieldError, Verdict, evaluate, evaluate_in};
pub use messages::Locale;
pub use rule::{Pattern, Rule, RuleParam, RuleSpec, Validations};
