use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use gpui::SharedString;

use super::data::{FormData, FormValues};
use super::state::{ControlState, FormError, FormOptions, FormResult, read_lock, write_lock};
use super::validation::{SharedValidator, Validator, validate};
use crate::style::state_class_names;

/// What a mounted control reports to. Implemented by [`FormGroup`]; a control
/// only ever sees this interface.
pub trait ControlRegistry<T>: Send + Sync {
    /// Inserts a new entry. Fails if `id` is already taken.
    fn register_control(&self, id: &SharedString, state: ControlState<T>) -> FormResult<()>;

    /// Upserts an entry. Returns `false` and changes nothing when the stored
    /// state already equals `state`.
    fn set_control(&self, id: &SharedString, state: ControlState<T>) -> FormResult<bool>;

    /// Removes an entry. Removing an absent id is not an error.
    fn remove_control(&self, id: &SharedString) -> FormResult<bool>;
}

pub type GroupListener = Arc<dyn Fn(&GroupSummary) + Send + Sync>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupSummary {
    pub valid: bool,
    pub touched: bool,
    pub controls: usize,
}

#[derive(Clone, Debug)]
pub struct GroupSnapshot<T> {
    pub controls: BTreeMap<SharedString, ControlState<T>>,
    pub valid: bool,
    pub touched: bool,
    pub submit_count: u32,
}

impl<T: Clone> GroupSnapshot<T> {
    pub fn values(&self) -> FormValues<T> {
        self.controls
            .iter()
            .map(|(id, state)| (id.clone(), state.value.clone()))
            .collect()
    }
}

/// AND over the entries' validity, with unevaluated entries counted as valid.
pub fn aggregate_valid<'a, T: 'a>(states: impl IntoIterator<Item = &'a ControlState<T>>) -> bool {
    states.into_iter().all(ControlState::is_passing)
}

/// OR over the entries' touched flags.
pub fn aggregate_touched<'a, T: 'a>(
    states: impl IntoIterator<Item = &'a ControlState<T>>,
) -> bool {
    states.into_iter().any(|state| state.touched)
}

struct GroupState<T> {
    controls: BTreeMap<SharedString, ControlState<T>>,
    submit_count: u32,
}

/// Aggregation scope owning the id → control state mapping.
#[derive(Clone)]
pub struct FormGroup<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    options: FormOptions,
    state: Arc<RwLock<GroupState<T>>>,
    validators: Arc<RwLock<Vec<SharedValidator<FormValues<T>>>>>,
    listeners: Arc<RwLock<BTreeMap<SubscriptionId, GroupListener>>>,
    next_subscription: Arc<AtomicU64>,
}

impl<T> FormGroup<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_options(FormOptions::default())
    }

    pub fn with_options(options: FormOptions) -> Self {
        Self {
            options,
            state: Arc::new(RwLock::new(GroupState {
                controls: BTreeMap::new(),
                submit_count: 0,
            })),
            validators: Arc::new(RwLock::new(Vec::new())),
            listeners: Arc::new(RwLock::new(BTreeMap::new())),
            next_subscription: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Adds a validator over the whole value map. Its result is ANDed into
    /// [`FormGroup::valid`].
    pub fn register_validator<V>(&self, validator: V) -> FormResult<()>
    where
        V: Validator<FormValues<T>> + 'static,
    {
        write_lock(&self.validators, "registering group validator")?.push(Arc::new(validator));
        self.notify()
    }

    pub fn set_control(
        &self,
        id: impl Into<SharedString>,
        state: ControlState<T>,
    ) -> FormResult<bool> {
        ControlRegistry::set_control(self, &id.into(), state)
    }

    pub fn remove_control(&self, id: impl Into<SharedString>) -> FormResult<bool> {
        ControlRegistry::remove_control(self, &id.into())
    }

    pub fn control(&self, id: &str) -> FormResult<Option<ControlState<T>>> {
        Ok(read_lock(&self.state, "reading control state")?
            .controls
            .get(id)
            .cloned())
    }

    pub fn contains(&self, id: &str) -> FormResult<bool> {
        Ok(read_lock(&self.state, "checking control id")?
            .controls
            .contains_key(id))
    }

    pub fn len(&self) -> FormResult<usize> {
        Ok(read_lock(&self.state, "counting controls")?.controls.len())
    }

    pub fn is_empty(&self) -> FormResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn valid(&self) -> FormResult<bool> {
        let state = read_lock(&self.state, "aggregating group validity")?;
        self.valid_for(&state.controls)
    }

    pub fn touched(&self) -> FormResult<bool> {
        let state = read_lock(&self.state, "aggregating group touched")?;
        Ok(aggregate_touched(state.controls.values()))
    }

    pub fn summary(&self) -> FormResult<GroupSummary> {
        Ok(GroupSummary {
            valid: self.valid()?,
            touched: self.touched()?,
            controls: self.len()?,
        })
    }

    pub fn values(&self) -> FormResult<FormValues<T>> {
        Ok(collect_values(
            &read_lock(&self.state, "collecting control values")?.controls,
        ))
    }

    pub fn snapshot(&self) -> FormResult<GroupSnapshot<T>> {
        let state = read_lock(&self.state, "creating group snapshot")?;
        Ok(GroupSnapshot {
            valid: self.valid_for(&state.controls)?,
            touched: aggregate_touched(state.controls.values()),
            controls: state.controls.clone(),
            submit_count: state.submit_count,
        })
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        Ok(state_class_names(Some(self.valid()?), self.touched()?))
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&GroupSummary) + Send + Sync + 'static,
    ) -> FormResult<SubscriptionId> {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        write_lock(&self.listeners, "subscribing to group")?.insert(id, Arc::new(listener));
        Ok(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> FormResult<bool> {
        Ok(write_lock(&self.listeners, "unsubscribing from group")?
            .remove(&id)
            .is_some())
    }

    /// Counts a submit attempt and hands the current snapshot to `f`.
    ///
    /// Returns `Ok(None)` without calling `f` when the group is invalid and
    /// [`FormOptions::submit_invalid`] is off.
    pub fn submit<R>(&self, f: impl FnOnce(&GroupSnapshot<T>) -> R) -> FormResult<Option<R>> {
        {
            let mut state = write_lock(&self.state, "counting submit")?;
            state.submit_count = state.submit_count.saturating_add(1);
        }
        let snapshot = self.snapshot()?;
        if !snapshot.valid && !self.options.submit_invalid {
            tracing::debug!(
                submit_count = snapshot.submit_count,
                "submit blocked by invalid group"
            );
            return Ok(None);
        }
        tracing::debug!(
            submit_count = snapshot.submit_count,
            valid = snapshot.valid,
            "submitting group"
        );
        Ok(Some(f(&snapshot)))
    }

    pub fn submit_as<D>(&self) -> FormResult<Option<D>>
    where
        D: FormData<T>,
    {
        self.submit(|snapshot| D::from_values(&snapshot.values()))?
            .transpose()
    }

    pub fn submit_count(&self) -> FormResult<u32> {
        Ok(read_lock(&self.state, "reading submit count")?.submit_count)
    }

    /// Control validity ANDed with the group validators over `controls`.
    fn valid_for(&self, controls: &BTreeMap<SharedString, ControlState<T>>) -> FormResult<bool> {
        if !aggregate_valid(controls.values()) {
            return Ok(false);
        }
        let validators = read_lock(&self.validators, "reading group validators")?;
        Ok(validate(&validators, &collect_values(controls)))
    }

    fn notify(&self) -> FormResult<()> {
        let listeners = read_lock(&self.listeners, "reading group listeners")?
            .values()
            .cloned()
            .collect::<Vec<_>>();
        if listeners.is_empty() {
            return Ok(());
        }
        let summary = self.summary()?;
        for listener in listeners {
            listener(&summary);
        }
        Ok(())
    }
}

impl<T> Default for FormGroup<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ControlRegistry<T> for FormGroup<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn register_control(&self, id: &SharedString, state: ControlState<T>) -> FormResult<()> {
        {
            let mut group = write_lock(&self.state, "registering control")?;
            if group.controls.contains_key(id) {
                return Err(FormError::DuplicateControlId(id.clone()));
            }
            group.controls.insert(id.clone(), state);
        }
        tracing::debug!(control = %id, "registered control");
        self.notify()
    }

    fn set_control(&self, id: &SharedString, state: ControlState<T>) -> FormResult<bool> {
        {
            let mut group = write_lock(&self.state, "updating control")?;
            if group.controls.get(id) == Some(&state) {
                tracing::trace!(control = %id, "control state unchanged");
                return Ok(false);
            }
            group.controls.insert(id.clone(), state);
        }
        tracing::trace!(control = %id, "control state updated");
        self.notify()?;
        Ok(true)
    }

    fn remove_control(&self, id: &SharedString) -> FormResult<bool> {
        let removed = write_lock(&self.state, "removing control")?
            .controls
            .remove(id)
            .is_some();
        if removed {
            tracing::debug!(control = %id, "removed control");
            self.notify()?;
        }
        Ok(removed)
    }
}

fn collect_values<T: Clone>(controls: &BTreeMap<SharedString, ControlState<T>>) -> FormValues<T> {
    controls
        .iter()
        .map(|(id, state)| (id.clone(), state.value.clone()))
        .collect()
}
