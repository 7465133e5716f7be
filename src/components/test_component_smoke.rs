use super::*;
use crate::form::{Control, FormGroup, FormOptions, FormScope, is_required};
use gpui::{AnyElement, IntoElement, ParentElement, SharedString, div};
use std::cell::RefCell;
use std::rc::Rc;

fn into_any(element: impl IntoElement) -> AnyElement {
    element.into_any_element()
}

fn assert_render_once<T: gpui::RenderOnce>() {}

struct NameForm {
    group: FormGroup<SharedString>,
    field: crate::form::FormFieldState,
    first_name: Control<SharedString>,
}

fn name_form(options: FormOptions) -> NameForm {
    let root = FormScope::<SharedString>::new(options);
    let (group, form_scope) = root.form_group();
    let (field, field_scope) = form_scope.form_field(None);
    let first_name = Control::builder(SharedString::from(""))
        .id("first_name-input")
        .validator(is_required())
        .mount(&field_scope)
        .expect("mount first name");
    NameForm {
        group,
        field,
        first_name,
    }
}

#[test]
fn form_components_are_render_once() {
    assert_render_once::<Form>();
    assert_render_once::<FormField>();
    assert_render_once::<Input>();
}

#[test]
fn smoke_form_tree_builds_into_any_element() {
    let form = name_form(FormOptions::default());
    let _ = into_any(
        Form::new(form.group.clone()).class("form-column").child(
            FormField::new(form.field.clone())
                .child(div().child("First name"))
                .child(Input::new(form.first_name.clone()).placeholder("Alex")),
        ),
    );
}

#[test]
fn input_runs_core_handler_before_caller_handler() {
    let form = name_form(FormOptions::default());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let control = form.first_name.clone();
    let changes = seen.clone();
    let blurs = seen.clone();
    let input = Input::new(form.first_name.clone())
        .on_change(move |value| {
            let stored = control.value().expect("value");
            changes
                .borrow_mut()
                .push(format!("change:{value}:{stored}"));
        })
        .on_blur(move || blurs.borrow_mut().push("blur".to_string()));

    input.change("Alex").expect("change");
    input.blur().expect("blur");

    assert_eq!(
        seen.borrow().as_slice(),
        ["change:Alex:Alex".to_string(), "blur".to_string()]
    );
    assert!(form.first_name.touched().expect("touched"));
}

#[test]
fn input_class_name_reflects_control_state() {
    let form = name_form(FormOptions::default());
    let input = Input::new(form.first_name.clone()).class("wide");
    assert_eq!(input.class_name().expect("class").as_str(), "wide input invalid");

    input.change("Alex").expect("change");
    input.blur().expect("blur");
    assert_eq!(
        input.class_name().expect("class").as_str(),
        "wide input valid touched"
    );
    assert_eq!(input.id().as_str(), "first_name-input");
}

#[test]
fn field_and_form_class_names_follow_their_state() {
    let form = name_form(FormOptions::default());
    let field = FormField::new(form.field.clone()).class("row");
    let view = Form::new(form.group.clone()).class("form-column");

    assert_eq!(field.class_name().expect("class").as_str(), "form-field invalid row");
    assert_eq!(view.class_name().expect("class").as_str(), "form-column form invalid");

    form.first_name.set_value("Alex".into()).expect("set value");
    form.first_name.touch().expect("touch");

    assert_eq!(
        field.class_name().expect("class").as_str(),
        "form-field valid touched row"
    );
    assert_eq!(
        view.class_name().expect("class").as_str(),
        "form-column form valid touched"
    );
}

#[test]
fn form_submit_hands_snapshot_to_handler() {
    let form = name_form(FormOptions {
        submit_invalid: false,
        ..FormOptions::default()
    });
    let submitted = Rc::new(RefCell::new(None));
    let sink = submitted.clone();
    let view = Form::new(form.group.clone()).on_submit(move |snapshot| {
        *sink.borrow_mut() = snapshot.values().get("first_name-input").cloned();
    });

    assert!(!view.submit().expect("submit"));
    assert!(submitted.borrow().is_none());

    form.first_name.set_value("Alex".into()).expect("set value");
    assert!(view.submit().expect("submit"));
    assert_eq!(submitted.borrow().clone(), Some(SharedString::from("Alex")));
    assert_eq!(form.group.submit_count().expect("count"), 2);
}

#[test]
fn border_color_tracks_class_flags() {
    assert_eq!(border_color_for("input invalid"), gpui::rgb(BORDER_INVALID));
    assert_eq!(border_color_for("input valid"), gpui::rgb(BORDER_DEFAULT));
    assert_eq!(border_color_for("input valid touched"), gpui::rgb(BORDER_VALID));
}

#[test]
fn form_state_dump_lists_controls() {
    let form = name_form(FormOptions::default());
    form.first_name.set_value("Alex".into()).expect("set value");
    let view = Form::new(form.group.clone()).show_state(true);

    let dump = view.state_dump().expect("dump");
    assert!(dump.contains("first_name-input"));
    assert!(dump.contains("Alex"));
    let _ = into_any(view);
}
