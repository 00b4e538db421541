//! Reusable form-filling commands
//!
//! Each command mirrors one user-visible interaction with a form section and
//! expands to a plain list of [`Step`]s. Commands carry no assertions beyond
//! the single synchronization point in [`submit_initial_signup`]; outcome
//! checks belong to the scenario.

use crate::data::{InitialSignup, PersonalData, ShippingInformation};
use crate::elements::{account, address, by_data_qa, by_id, login, register, signup};
use crate::step::Step;

/// Options for [`fill_personal_data`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalDataOptions {
    /// Leave the password field untouched, for negative paths that want the
    /// browser's required-field validation to fire.
    pub skip_password: bool,
}

/// Fill the initial signup form (name + email) and submit it.
///
/// Blocks until the detailed registration form is reached, confirmed by both
/// the URL and the landmark heading. This is the suite's only synchronization
/// point; later commands assume the detailed form is on screen.
pub fn submit_initial_signup(data: &InitialSignup) -> Vec<Step> {
    vec![
        Step::TypeText {
            selector: by_data_qa(signup::NAME),
            text: data.name.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(signup::EMAIL),
            text: data.email.clone(),
        },
        Step::Click {
            selector: by_data_qa(signup::BUTTON),
        },
        Step::ExpectUrlContains {
            fragment: signup::FORM_URL_FRAGMENT.to_string(),
        },
        Step::ExpectTextContains {
            selector: signup::FORM_HEADING.to_string(),
            text: signup::FORM_HEADING_TEXT.to_string(),
        },
    ]
}

/// Fill the account information section: title, password, birthdate dropdowns,
/// and the two preference checkboxes when their flags are set.
pub fn fill_personal_data(data: &PersonalData, options: PersonalDataOptions) -> Vec<Step> {
    let mut steps = vec![Step::Check {
        selector: by_id(register::TITLE_MRS_ID),
    }];

    if !options.skip_password {
        steps.push(Step::TypeText {
            selector: by_data_qa(register::PASSWORD),
            text: data.password.clone(),
        });
    }

    steps.push(Step::Select {
        selector: by_data_qa(register::DAY),
        value: data.day.clone(),
    });
    steps.push(Step::Select {
        selector: by_data_qa(register::MONTH),
        value: data.month.clone(),
    });
    steps.push(Step::Select {
        selector: by_data_qa(register::YEAR),
        value: data.year.clone(),
    });

    if data.newsletter {
        steps.push(Step::Check {
            selector: by_id(register::NEWSLETTER_ID),
        });
    }
    if data.optin {
        steps.push(Step::Check {
            selector: by_id(register::OPTIN_ID),
        });
    }

    steps
}

/// Fill the address information section. Company and the second address line
/// are typed only when supplied and non-blank.
pub fn fill_shipping_data(data: &ShippingInformation) -> Vec<Step> {
    let mut steps = vec![
        Step::TypeText {
            selector: by_data_qa(address::FIRST_NAME),
            text: data.first_name.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::LAST_NAME),
            text: data.last_name.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::ADDRESS1),
            text: data.address1.clone(),
        },
        Step::Select {
            selector: by_data_qa(address::COUNTRY),
            value: data.country.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::STATE),
            text: data.state.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::CITY),
            text: data.city.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::ZIPCODE),
            text: data.zipcode.clone(),
        },
        Step::TypeText {
            selector: by_data_qa(address::MOBILE_NUMBER),
            text: data.mobile_number.clone(),
        },
    ];

    if let Some(company) = non_blank(&data.company) {
        steps.push(Step::TypeText {
            selector: by_data_qa(address::COMPANY),
            text: company.to_string(),
        });
    }
    if let Some(address2) = non_blank(&data.address2) {
        steps.push(Step::TypeText {
            selector: by_data_qa(address::ADDRESS2),
            text: address2.to_string(),
        });
    }

    steps
}

/// Click the create-account button. No post-condition; the scenario asserts
/// the outcome.
pub fn create_account() -> Vec<Step> {
    vec![Step::Click {
        selector: by_data_qa(account::CREATE_BUTTON),
    }]
}

/// Fill the login form and submit it.
pub fn login(email: &str, password: &str) -> Vec<Step> {
    vec![
        Step::TypeText {
            selector: by_data_qa(login::EMAIL),
            text: email.to_string(),
        },
        Step::TypeText {
            selector: by_data_qa(login::PASSWORD),
            text: password.to_string(),
        },
        Step::Click {
            selector: by_data_qa(login::BUTTON),
        },
    ]
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
