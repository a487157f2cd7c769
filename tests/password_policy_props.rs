use assessment_schemas::{Schema, UserCreateRequest};
use proptest::prelude::*;
use serde_json::json;

fn construct(password: &str) -> Result<UserCreateRequest, String> {
    UserCreateRequest::from_value(json!({
        "first_name": "Ada",
        "surname": "Lovelace",
        "email": "ada@example.com",
        "password": password,
        "confirm_password": password,
    }))
    .map_err(|report| report.to_string())
}

prop_compose! {
    fn strong_password()
        (lower in "[a-z]{1,6}",
         upper in "[A-Z]{1,6}",
         digit in "[0-9]{1,4}",
         special in r#"[!@#$%^&*(),.?":{}|<>]{1,3}"#,
         filler in "[a-zA-Z0-9]{10}")
        -> String {
        format!("{}{}{}{}{}", upper, lower, digit, special, filler)
    }
}

proptest! {
    #[test]
    fn strong_passwords_are_accepted(password in strong_password()) {
        prop_assert!(construct(&password).is_ok(), "rejected {:?}", password);
    }

    #[test]
    fn dropping_digits_is_named(password in strong_password()) {
        let stripped: String = password.chars().filter(|c| !c.is_ascii_digit()).collect();
        let padded = format!("{}abcdefghij", stripped);
        let message = construct(&padded).unwrap_err();
        prop_assert!(message.contains("at least one digit"));
        prop_assert!(!message.contains("uppercase"));
    }

    #[test]
    fn dropping_letters_names_both_cases(password in strong_password()) {
        let stripped: String = password.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
        let padded = format!("{}1234567890", stripped);
        let message = construct(&padded).unwrap_err();
        prop_assert!(message.contains("lowercase letter"));
        prop_assert!(message.contains("uppercase letter"));
        prop_assert!(!message.contains("special character"));
    }
}
