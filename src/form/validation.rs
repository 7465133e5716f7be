use std::sync::Arc;

use gpui::SharedString;

/// A named, side-effect free predicate over a value.
///
/// Predicates must be total. A validator that does not apply to a value should
/// return `true` and leave presence checks to [`is_required`].
pub trait Validator<T: ?Sized>: Send + Sync {
    fn key(&self) -> &str;
    fn validate(&self, value: &T) -> bool;
}

pub type SharedValidator<T> = Arc<dyn Validator<T>>;

pub struct FnValidator<F> {
    key: SharedString,
    predicate: F,
}

impl<T, F> Validator<T> for FnValidator<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn key(&self) -> &str {
        self.key.as_ref()
    }

    fn validate(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

pub fn validator<T, F>(key: impl Into<SharedString>, predicate: F) -> FnValidator<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    FnValidator {
        key: key.into(),
        predicate,
    }
}

/// `true` iff every validator accepts `value`. An empty chain accepts anything.
pub fn validate<T>(validators: &[SharedValidator<T>], value: &T) -> bool {
    validators
        .iter()
        .fold(true, |valid, validator| valid && validator.validate(value))
}

/// Keys of the validators rejecting `value`, in chain order.
pub fn failed_keys<T>(validators: &[SharedValidator<T>], value: &T) -> Vec<SharedString> {
    validators
        .iter()
        .filter(|validator| !validator.validate(value))
        .map(|validator| SharedString::from(validator.key().to_owned()))
        .collect()
}

/// Whether a value counts as filled in: empty text, zero, `false` and `None`
/// do not.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for SharedString {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

macro_rules! impl_presence_for_int {
    ($($ty:ty),*) => {
        $(impl Presence for $ty {
            fn is_present(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_presence_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_presence_for_float {
    ($($ty:ty),*) => {
        $(impl Presence for $ty {
            fn is_present(&self) -> bool {
                *self != 0.0 && !self.is_nan()
            }
        })*
    };
}

impl_presence_for_float!(f32, f64);

pub const REQUIRED_KEY: &str = "required";

#[derive(Clone, Copy, Debug, Default)]
pub struct Required;

impl<T: Presence + ?Sized> Validator<T> for Required {
    fn key(&self) -> &str {
        REQUIRED_KEY
    }

    fn validate(&self, value: &T) -> bool {
        value.is_present()
    }
}

pub fn is_required() -> Required {
    Required
}
