#[test]
fn form_data_derive_ui() {
    let testcases = trybuild::TestCases::new();
    testcases.pass("tests/ui/form_data/pass.rs");
}
