mod control;
mod data;
mod field;
mod group;
mod scope;
mod state;
mod validation;


pub use calmforms_derive::FormData;
pub use control::{Control, ControlBuilder};
pub use data::{FormData, FormValues};
pub use field::{FieldSink, FormFieldState, NoopField};
pub use group::{
    ControlRegistry, FormGroup, GroupListener, GroupSnapshot, GroupSummary, SubscriptionId,
    aggregate_touched, aggregate_valid,
};
pub use scope::FormScope;
pub use state::{
    ControlState, ControlStatus, FormError, FormOptions, FormResult, ValidationMode,
};
pub use validation::{
    FnValidator, Presence, REQUIRED_KEY, Required, SharedValidator, Validator, failed_keys,
    is_required, validate, validator,
};
