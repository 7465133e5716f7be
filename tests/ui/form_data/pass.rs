use calmforms::form::{FormData, FormValues};

#[derive(Debug, calmforms::form::FormData)]
struct SignupForm {
    #[form(id = "email-input")]
    email: String,
    nickname: String,
}

fn main() {
    let values: FormValues<String> = [
        ("email-input", "a@calm.forms".to_string()),
        ("nickname", "alex".to_string()),
    ]
    .into_iter()
    .collect();

    let form = SignupForm::from_values(&values).expect("all controls present");
    assert_eq!(form.email, "a@calm.forms");
    assert_eq!(form.nickname, "alex");

    let partial: FormValues<String> = [("nickname", "alex".to_string())].into_iter().collect();
    assert!(SignupForm::from_values(&partial).is_err());
}
