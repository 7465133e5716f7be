pub use crate::components::{Form, FormField, Input};
pub use crate::form::{
    Control, ControlState, ControlStatus, FormData, FormError, FormFieldState, FormGroup,
    FormOptions, FormResult, FormScope, FormValues, ValidationMode, Validator, is_required,
    validator,
};
pub use crate::style::class_names;
