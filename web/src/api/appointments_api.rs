use shared::{
    Appointment, AppointmentCreate, AppointmentQuery, AppointmentUpdate, AppointmentWithDetails,
    DeleteResponse,
};

use super::{with_query, ApiClient, Transport};
use crate::error::ApiError;

const ENDPOINT: &str = "/appointments/";

/// Books `appointment` for `user_id`; the API takes the owner as a query
/// parameter, not in the body.
pub async fn create<T: Transport>(
    client: &ApiClient<T>,
    user_id: i64,
    appointment: &AppointmentCreate,
) -> Result<Appointment, ApiError> {
    let path = with_query(ENDPOINT, &[("user_id", user_id.to_string())]);
    let created: Appointment = client.post(&path, appointment).await?;
    log::info!(
        "Api create appointment, appointment_id={}, user_id={user_id}",
        created.id
    );
    Ok(created)
}

pub async fn list<T: Transport>(
    client: &ApiClient<T>,
    query: &AppointmentQuery,
) -> Result<Vec<AppointmentWithDetails>, ApiError> {
    client.get(&with_query(ENDPOINT, &query.pairs())).await
}

pub async fn get_by_id<T: Transport>(
    client: &ApiClient<T>,
    appointment_id: i64,
) -> Result<AppointmentWithDetails, ApiError> {
    client.get(&format!("{ENDPOINT}{appointment_id}")).await
}

pub async fn update<T: Transport>(
    client: &ApiClient<T>,
    appointment_id: i64,
    update: &AppointmentUpdate,
) -> Result<Appointment, ApiError> {
    client
        .put(&format!("{ENDPOINT}{appointment_id}"), update)
        .await
}

pub async fn delete<T: Transport>(
    client: &ApiClient<T>,
    appointment_id: i64,
) -> Result<DeleteResponse, ApiError> {
    client.delete(&format!("{ENDPOINT}{appointment_id}")).await
}

pub async fn user_history<T: Transport>(
    client: &ApiClient<T>,
    user_id: i64,
) -> Result<Vec<AppointmentWithDetails>, ApiError> {
    client
        .get(&format!("{ENDPOINT}user/{user_id}/history"))
        .await
}
