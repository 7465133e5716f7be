use std::sync::{Arc, RwLock};

use gpui::SharedString;

use super::state::{FormError, FormResult, read_lock, write_lock};
use crate::style::{class_names, state_class_names};

/// The field-side handles a control writes its flags to.
pub trait FieldSink: Send + Sync {
    /// Claims the field for `control`. Returns `true` only when this call took
    /// the field, `false` when `control` already held it.
    fn attach(&self, _control: &SharedString) -> FormResult<bool> {
        Ok(false)
    }

    fn detach(&self, _control: &SharedString) -> FormResult<()> {
        Ok(())
    }

    fn set_valid(&self, valid: Option<bool>) -> FormResult<()>;
    fn set_touched(&self, touched: bool) -> FormResult<()>;
}

/// Field used when a control is mounted outside any form field.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopField;

impl FieldSink for NoopField {
    fn set_valid(&self, _valid: Option<bool>) -> FormResult<()> {
        Ok(())
    }

    fn set_touched(&self, _touched: bool) -> FormResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FieldState {
    valid: Option<bool>,
    touched: bool,
    control: Option<SharedString>,
}

/// Pass-through scope for exactly one control.
///
/// It mirrors the latest `valid` / `touched` reported by its control. A second
/// control cannot attach while the first one is mounted.
#[derive(Clone)]
pub struct FormFieldState {
    id: SharedString,
    state: Arc<RwLock<FieldState>>,
}

impl FormFieldState {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(RwLock::new(FieldState::default())),
        }
    }

    pub fn id(&self) -> &SharedString {
        &self.id
    }

    pub fn valid(&self) -> FormResult<Option<bool>> {
        Ok(read_lock(&self.state, "reading field validity")?.valid)
    }

    pub fn touched(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading field touched")?.touched)
    }

    pub fn control(&self) -> FormResult<Option<SharedString>> {
        Ok(read_lock(&self.state, "reading field control")?
            .control
            .clone())
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        let state = read_lock(&self.state, "deriving field class name")?;
        let flags = state_class_names(state.valid, state.touched);
        Ok(class_names([("form-field", true), (flags.as_str(), true)]))
    }
}

impl FieldSink for FormFieldState {
    fn attach(&self, control: &SharedString) -> FormResult<bool> {
        let mut state = write_lock(&self.state, "attaching control to field")?;
        match &state.control {
            Some(current) if current == control => Ok(false),
            Some(current) => Err(FormError::FieldOccupied {
                field: self.id.clone(),
                control: current.clone(),
            }),
            None => {
                state.control = Some(control.clone());
                Ok(true)
            }
        }
    }

    fn detach(&self, control: &SharedString) -> FormResult<()> {
        let mut state = write_lock(&self.state, "detaching control from field")?;
        if state.control.as_ref() == Some(control) {
            state.control = None;
        }
        Ok(())
    }

    fn set_valid(&self, valid: Option<bool>) -> FormResult<()> {
        write_lock(&self.state, "writing field validity")?.valid = valid;
        Ok(())
    }

    fn set_touched(&self, touched: bool) -> FormResult<()> {
        write_lock(&self.state, "writing field touched")?.touched = touched;
        Ok(())
    }
}
