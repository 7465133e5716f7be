use std::fmt::{Display, Formatter};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::SharedString;

/// Snapshot of one control. `valid == None` means validity was not evaluated
/// or does not apply, which is distinct from `Some(false)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlState<T> {
    pub value: T,
    pub valid: Option<bool>,
    pub touched: bool,
}

impl<T> ControlState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            valid: None,
            touched: false,
        }
    }

    /// Unevaluated validity counts as passing.
    pub fn is_passing(&self) -> bool {
        self.valid.unwrap_or(true)
    }
}

/// Where a control sits in its lifecycle. A control is `Pristine` until its
/// value changes or it is touched; after that its validity picks the state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlStatus {
    Pristine,
    DirtyUnvalidated,
    DirtyValid,
    DirtyInvalid,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationMode {
    OnChange,
    OnBlur,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub validate_mode: ValidationMode,
    pub submit_invalid: bool,
    pub id_prefix: SharedString,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_mode: ValidationMode::OnChange,
            submit_invalid: true,
            id_prefix: "calm".into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    MissingGroup,
    DuplicateControlId(SharedString),
    FieldOccupied {
        field: SharedString,
        control: SharedString,
    },
    MissingControl(SharedString),
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingGroup => {
                f.write_str("control mounted outside of a form group")
            }
            FormError::DuplicateControlId(id) => {
                write!(f, "control id `{id}` is already registered in this group")
            }
            FormError::FieldOccupied { field, control } => write!(
                f,
                "form field `{field}` already holds control `{control}`; a field supports one control"
            ),
            FormError::MissingControl(id) => {
                write!(f, "no control with id `{id}` is registered in this group")
            }
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
