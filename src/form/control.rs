use std::sync::{Arc, RwLock};

use gpui::SharedString;

use super::field::FieldSink;
use super::group::ControlRegistry;
use super::scope::FormScope;
use super::state::{
    ControlState, ControlStatus, FormResult, ValidationMode, read_lock, write_lock,
};
use super::validation::{SharedValidator, Validator, failed_keys, validate};
use crate::style::state_class_names;

pub struct ControlBuilder<T> {
    id: Option<SharedString>,
    initial: T,
    validators: Vec<SharedValidator<T>>,
}

impl<T> ControlBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn id(mut self, id: impl Into<SharedString>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn validator(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn validators(mut self, validators: impl IntoIterator<Item = SharedValidator<T>>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Mounts the control into `scope`: evaluates the initial value, attaches
    /// to the enclosing field and registers with the enclosing group.
    ///
    /// Fails with `FormError::MissingGroup` when `scope` has no group.
    pub fn mount(self, scope: &FormScope<T>) -> FormResult<Control<T>> {
        let group = scope.group()?;
        let field = scope.field();
        let id = self.id.unwrap_or_else(|| scope.next_id());
        let validate_mode = scope.options().validate_mode;

        let valid = evaluate(&self.validators, validate_mode, &self.initial, false);
        let state = ControlState {
            value: self.initial.clone(),
            valid,
            touched: false,
        };

        let attached = field.attach(&id)?;
        if let Err(error) = group.register_control(&id, state.clone()) {
            if attached {
                field.detach(&id)?;
            }
            return Err(error);
        }
        field.set_valid(valid)?;
        field.set_touched(false)?;
        tracing::debug!(control = %id, ?valid, "mounted control");

        Ok(Control {
            inner: Arc::new(ControlInner {
                id,
                validate_mode,
                validators: self.validators,
                group,
                field,
                cell: RwLock::new(ControlCell {
                    state,
                    initial: self.initial,
                    mounted: true,
                }),
            }),
        })
    }
}

struct ControlCell<T> {
    state: ControlState<T>,
    initial: T,
    mounted: bool,
}

struct ControlInner<T> {
    id: SharedString,
    validate_mode: ValidationMode,
    validators: Vec<SharedValidator<T>>,
    group: Arc<dyn ControlRegistry<T>>,
    field: Arc<dyn FieldSink>,
    cell: RwLock<ControlCell<T>>,
}

impl<T> ControlInner<T> {
    fn release(&self) -> FormResult<bool> {
        {
            let mut cell = write_lock(&self.cell, "unmounting control")?;
            if !cell.mounted {
                return Ok(false);
            }
            cell.mounted = false;
        }
        self.group.remove_control(&self.id)?;
        self.field.detach(&self.id)?;
        tracing::debug!(control = %self.id, "unmounted control");
        Ok(true)
    }
}

impl<T> Drop for ControlInner<T> {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            tracing::warn!(control = %self.id, %error, "failed to deregister dropped control");
        }
    }
}

/// One input's value with its derived validity and touched flags.
///
/// `Control` is a shared handle: clones refer to the same control. The
/// control deregisters from its group when [`Control::unmount`] is called or
/// the last handle is dropped.
pub struct Control<T> {
    inner: Arc<ControlInner<T>>,
}

impl<T> Clone for Control<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Control<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn builder(initial: T) -> ControlBuilder<T> {
        ControlBuilder {
            id: None,
            initial,
            validators: Vec::new(),
        }
    }

    pub fn id(&self) -> &SharedString {
        &self.inner.id
    }

    pub fn state(&self) -> FormResult<ControlState<T>> {
        Ok(read_lock(&self.inner.cell, "reading control state")?
            .state
            .clone())
    }

    pub fn value(&self) -> FormResult<T> {
        Ok(read_lock(&self.inner.cell, "reading control value")?
            .state
            .value
            .clone())
    }

    pub fn valid(&self) -> FormResult<Option<bool>> {
        Ok(read_lock(&self.inner.cell, "reading control validity")?
            .state
            .valid)
    }

    pub fn touched(&self) -> FormResult<bool> {
        Ok(read_lock(&self.inner.cell, "reading control touched")?
            .state
            .touched)
    }

    pub fn is_mounted(&self) -> FormResult<bool> {
        Ok(read_lock(&self.inner.cell, "reading control mount state")?.mounted)
    }

    pub fn is_dirty(&self) -> FormResult<bool> {
        let cell = read_lock(&self.inner.cell, "reading control dirty state")?;
        Ok(cell.state.value != cell.initial)
    }

    pub fn status(&self) -> FormResult<ControlStatus> {
        let cell = read_lock(&self.inner.cell, "reading control status")?;
        if cell.state.value == cell.initial && !cell.state.touched {
            return Ok(ControlStatus::Pristine);
        }
        Ok(match cell.state.valid {
            None => ControlStatus::DirtyUnvalidated,
            Some(true) => ControlStatus::DirtyValid,
            Some(false) => ControlStatus::DirtyInvalid,
        })
    }

    /// Keys of the validators currently rejecting the value.
    pub fn failed_keys(&self) -> FormResult<Vec<SharedString>> {
        let value = self.value()?;
        Ok(failed_keys(&self.inner.validators, &value))
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        let cell = read_lock(&self.inner.cell, "deriving control class name")?;
        Ok(state_class_names(cell.state.valid, cell.state.touched))
    }

    /// Stores `value` as given and re-runs the validator chain.
    pub fn set_value(&self, value: T) -> FormResult<()> {
        let (previous, next, mounted) = {
            let mut cell = write_lock(&self.inner.cell, "writing control value")?;
            let previous = (cell.state.valid, cell.state.touched);
            let touched = cell.state.touched;
            cell.state.valid = evaluate(
                &self.inner.validators,
                self.inner.validate_mode,
                &value,
                touched,
            );
            cell.state.value = value;
            (previous, cell.state.clone(), cell.mounted)
        };
        tracing::trace!(control = %self.inner.id, valid = ?next.valid, "control value changed");
        self.publish(previous, next, mounted)
    }

    /// Marks the control as touched. There is no way back.
    pub fn touch(&self) -> FormResult<()> {
        let (previous, next, mounted) = {
            let mut cell = write_lock(&self.inner.cell, "touching control")?;
            if cell.state.touched {
                return Ok(());
            }
            let previous = (cell.state.valid, cell.state.touched);
            cell.state.touched = true;
            cell.state.valid = evaluate(
                &self.inner.validators,
                self.inner.validate_mode,
                &cell.state.value,
                true,
            );
            (previous, cell.state.clone(), cell.mounted)
        };
        tracing::trace!(control = %self.inner.id, "control touched");
        self.publish(previous, next, mounted)
    }

    /// Deregisters from the group and releases the field. Returns `false` if
    /// the control was already unmounted.
    pub fn unmount(&self) -> FormResult<bool> {
        self.inner.release()
    }

    fn publish(
        &self,
        (previous_valid, previous_touched): (Option<bool>, bool),
        next: ControlState<T>,
        mounted: bool,
    ) -> FormResult<()> {
        if !mounted {
            tracing::trace!(control = %self.inner.id, "unmounted control changed locally");
            return Ok(());
        }
        if next.valid != previous_valid {
            self.inner.field.set_valid(next.valid)?;
        }
        if next.touched != previous_touched {
            self.inner.field.set_touched(next.touched)?;
        }
        self.inner.group.set_control(&self.inner.id, next)?;
        Ok(())
    }
}

fn evaluate<T>(
    validators: &[SharedValidator<T>],
    mode: ValidationMode,
    value: &T,
    touched: bool,
) -> Option<bool> {
    if validators.is_empty() {
        return None;
    }
    match mode {
        ValidationMode::OnBlur if !touched => None,
        ValidationMode::OnChange | ValidationMode::OnBlur => Some(validate(validators, value)),
    }
}
