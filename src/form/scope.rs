use std::sync::Arc;

use gpui::SharedString;

use super::field::{FieldSink, FormFieldState, NoopField};
use super::group::{ControlRegistry, FormGroup};
use super::state::{FormError, FormOptions, FormResult};
use crate::id::IdAllocator;

/// The handles a control can see from where it is mounted: the enclosing
/// group, the enclosing field, the options and the id source.
///
/// Scopes are created by the composition root with [`FormScope::new`] and
/// narrowed with [`FormScope::with_group`] / [`FormScope::with_field`]. Clones
/// share the id allocator.
pub struct FormScope<T> {
    options: FormOptions,
    ids: IdAllocator,
    group: Option<Arc<dyn ControlRegistry<T>>>,
    field: Arc<dyn FieldSink>,
}

impl<T> Clone for FormScope<T> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            ids: self.ids.clone(),
            group: self.group.clone(),
            field: self.field.clone(),
        }
    }
}

impl<T> FormScope<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(options: FormOptions) -> Self {
        let ids = IdAllocator::new(options.id_prefix.clone());
        Self {
            options,
            ids,
            group: None,
            field: Arc::new(NoopField),
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn next_id(&self) -> SharedString {
        self.ids.next_id()
    }

    /// Creates a [`FormGroup`] with this scope's options and returns it along
    /// with the scope its controls mount from.
    pub fn form_group(&self) -> (FormGroup<T>, FormScope<T>) {
        let group = FormGroup::with_options(self.options.clone());
        let scope = self.with_group(group.clone());
        (group, scope)
    }

    /// Creates a [`FormFieldState`] (generating an id when `id` is `None`) and
    /// returns it along with the scope its control mounts from.
    pub fn form_field(&self, id: Option<SharedString>) -> (FormFieldState, FormScope<T>) {
        let field = FormFieldState::new(id.unwrap_or_else(|| self.next_id()));
        let scope = self.with_field(field.clone());
        (field, scope)
    }

    pub fn with_group(&self, group: impl ControlRegistry<T> + 'static) -> Self {
        Self {
            group: Some(Arc::new(group)),
            field: Arc::new(NoopField),
            ..self.clone()
        }
    }

    pub fn with_field(&self, field: impl FieldSink + 'static) -> Self {
        Self {
            field: Arc::new(field),
            ..self.clone()
        }
    }

    pub fn group(&self) -> FormResult<Arc<dyn ControlRegistry<T>>> {
        self.group.clone().ok_or(FormError::MissingGroup)
    }

    pub fn field(&self) -> Arc<dyn FieldSink> {
        self.field.clone()
    }
}
