//! Custom extractors.

mod form_values;

pub use form_values::FormValues;
