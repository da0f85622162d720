/// Prefix for every API request. Empty means same-origin relative paths.
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(base_url) => base_url,
    None => "",
};

pub const STORAGE_KEY_USER_ID: &str = "user_id";
pub const STORAGE_KEY_USER_EMAIL: &str = "user_email";
pub const STORAGE_KEY_USER_NAME: &str = "user_name";

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/users/auth/login";
pub const REGISTER_PATH: &str = "/users/auth/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const NOTIFICATION_TIMEOUT_MS: u32 = 5_000;
pub const AUTH_REDIRECT_DELAY_MS: u32 = 2_000;
pub const ALERT_AUTO_HIDE_MS: u32 = 5_000;

pub const LOGOUT_LINK_ID: &str = "logoutBtn";
pub const INVALID_CLASS: &str = "is-invalid";
pub const VALID_CLASS: &str = "is-valid";
pub const LOADING_CLASS: &str = "loading";
pub const ENTRANCE_ANIMATION_CLASS: &str = "fade-in-up";
pub const ENTRANCE_ANIMATION_SELECTOR: &str = ".card, .btn, .form-control";
pub const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";
pub const DISMISSIBLE_ALERT_SELECTOR: &str = ".alert-dismissible";
pub const REQUIRED_FIELDS_SELECTOR: &str =
    "input[required], select[required], textarea[required]";

pub const AUTH_REQUIRED_MESSAGE: &str = "Debes iniciar sesión para acceder a esta página";
