mod form;
mod form_field;
mod input;

#[cfg(test)]
mod test_component_smoke;

use gpui::{Rgba, rgb};

use crate::style::has_class;

pub use form::Form;
pub use form_field::FormField;
pub use input::Input;

const BORDER_INVALID: u32 = 0xfa5252;
const BORDER_VALID: u32 = 0x40c057;
const BORDER_DEFAULT: u32 = 0xced4da;
const TEXT_DEFAULT: u32 = 0x212529;
const TEXT_PLACEHOLDER: u32 = 0xadb5bd;

/// Border colour for a rendered class name. Valid is only highlighted once the
/// user has left the control.
pub(crate) fn border_color_for(class_name: &str) -> Rgba {
    if has_class(class_name, "invalid") {
        rgb(BORDER_INVALID)
    } else if has_class(class_name, "valid") && has_class(class_name, "touched") {
        rgb(BORDER_VALID)
    } else {
        rgb(BORDER_DEFAULT)
    }
}

pub(crate) fn text_color(placeholder: bool) -> Rgba {
    if placeholder {
        rgb(TEXT_PLACEHOLDER)
    } else {
        rgb(TEXT_DEFAULT)
    }
}
