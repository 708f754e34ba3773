//! rusty-forms predicate library
//!
//! Pure predicates behind declarative form validation. Each predicate looks
//! at one field value plus the parameters bound by its rule and answers with
//! a three-valued [`Verdict`]: pass, fail, or not applicable (nothing to check).
//!
//! Predicates are reachable by name through [`PredicateLibrary`], which is
//! what the rusty-forms engine uses to run a model's rules.

pub mod coerce;
pub mod date;
pub mod library;
pub mod matching;
pub mod numeric;
pub mod patterns;
pub mod presence;
pub mod string;
pub mod value;

// Re-export all validators
pub use date::*;
pub use library::{Predicate, PredicateContext, PredicateLibrary};
pub use matching::*;
pub use numeric::*;
pub use patterns::PatternRegistry;
pub use presence::*;
pub use string::*;
pub use value::{FieldValue, Param, Verdict};
