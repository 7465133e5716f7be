pub mod components;
pub mod form;
pub mod id;
pub mod prelude;
pub mod style;

pub use components::{Form, FormField, Input};
