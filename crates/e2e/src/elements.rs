//! Selector constants for the storefront's signup, registration, and login forms
//!
//! The site marks interactive elements with `data-qa` attributes; a handful of
//! older controls (title radio, preference checkboxes) only carry ids.

/// CSS selector for an element by its `data-qa` attribute.
pub fn by_data_qa(value: &str) -> String {
    format!("[data-qa=\"{value}\"]")
}

/// CSS selector for an element by id.
pub fn by_id(value: &str) -> String {
    format!("#{value}")
}

/// Initial signup form (name + email, gates the detailed registration form).
pub mod signup {
    pub const NAME: &str = "signup-name";
    pub const EMAIL: &str = "signup-email";
    pub const BUTTON: &str = "signup-button";

    /// URL fragment of the detailed registration form.
    pub const FORM_URL_FRAGMENT: &str = "/signup";

    /// Landmark heading confirming the detailed form has loaded.
    pub const FORM_HEADING: &str = "h2.title.text-center";
    pub const FORM_HEADING_TEXT: &str = "Enter Account Information";

    /// Error shown when the email is already registered.
    pub const EMAIL_EXISTS_TEXT: &str = "Email Address already exist!";
}

/// Account information section of the registration form.
pub mod register {
    /// "Mrs." title radio button (id, no data-qa attribute)
    pub const TITLE_MRS_ID: &str = "id_gender2";
    pub const PASSWORD: &str = "password";
    pub const DAY: &str = "days";
    pub const MONTH: &str = "months";
    pub const YEAR: &str = "years";
    /// Preference checkboxes (ids, no data-qa attribute)
    pub const NEWSLETTER_ID: &str = "newsletter";
    pub const OPTIN_ID: &str = "optin";
}

/// Address information section of the registration form.
pub mod address {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const COMPANY: &str = "company";
    pub const ADDRESS1: &str = "address";
    pub const ADDRESS2: &str = "address2";
    pub const COUNTRY: &str = "country";
    pub const STATE: &str = "state";
    pub const CITY: &str = "city";
    pub const ZIPCODE: &str = "zipcode";
    pub const MOBILE_NUMBER: &str = "mobile_number";
}

/// Account creation outcome and post-login indicators.
pub mod account {
    pub const CREATE_BUTTON: &str = "create-account";
    pub const CREATED_BANNER: &str = "account-created";
    pub const CREATED_TEXT: &str = "Account Created!";
    pub const CONTINUE_BUTTON: &str = "continue-button";
    pub const CREATED_URL_FRAGMENT: &str = "/account_created";

    /// Navbar entry shown for an authenticated session.
    pub const LOGGED_IN_LINK: &str = "a:has-text(\"Logged in as\")";
    pub const LOGOUT_LINK: &str = "a:has-text(\"Logout\")";
}

/// Login form.
pub mod login {
    pub const EMAIL: &str = "login-email";
    pub const PASSWORD: &str = "login-password";
    pub const BUTTON: &str = "login-button";

    /// Landing path containing both the login and initial signup forms.
    pub const PATH: &str = "/login";
}
