use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithAppointments {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UsersQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl UsersQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "skip", self.skip);
        push_pair(&mut pairs, "limit", self.limit);
        pairs
    }
}

// Session record cached in the browser

/// Identity written on login. Every field is stored verbatim under its own key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for SessionUser {
    fn from(value: &User) -> Self {
        SessionUser {
            id: value.id.to_string(),
            email: value.email.clone(),
            name: value.name.clone(),
        }
    }
}

/// Identity as read back from storage: any key may be missing independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<SessionUser> for StoredUser {
    fn from(value: SessionUser) -> Self {
        StoredUser {
            id: Some(value.id),
            email: Some(value.email),
            name: Some(value.name),
        }
    }
}

// Activities

fn default_state() -> String {
    "Querétaro".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub cost: f64,
    pub location: String,
    pub city: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub cost: f64,
    pub location: String,
    pub city: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub city: Option<String>,
}

impl ActivityQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "skip", self.skip);
        push_pair(&mut pairs, "limit", self.limit);
        push_pair(&mut pairs, "city", self.city.as_ref());
        pairs
    }
}

// Appointments

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub activity_id: i64,
    pub appointment_date: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub activity_id: i64,
    pub appointment_date: NaiveDateTime,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentWithDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub activity: Activity,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub user_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "skip", self.skip);
        push_pair(&mut pairs, "limit", self.limit);
        push_pair(&mut pairs, "user_id", self.user_id);
        push_pair(&mut pairs, "activity_id", self.activity_id);
        push_pair(&mut pairs, "status", self.status);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn push_pair<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
