use shared::{LoginResponse, User, UserCreate, UserLogin, UserWithAppointments, UsersQuery};

use super::{with_query, ApiClient, Transport};
use crate::error::ApiError;

pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    request: &UserCreate,
) -> Result<User, ApiError> {
    let user: User = client.post("/users/register", request).await?;
    log::info!("Api register user, user_id={}", user.id);
    Ok(user)
}

pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    request: &UserLogin,
) -> Result<LoginResponse, ApiError> {
    let response: LoginResponse = client.post("/users/login", request).await?;
    log::info!("Api login, email={}, user_id={}", request.email, response.user_id);
    Ok(response)
}

pub async fn list<T: Transport>(
    client: &ApiClient<T>,
    query: &UsersQuery,
) -> Result<Vec<User>, ApiError> {
    client.get(&with_query("/users/", &query.pairs())).await
}

pub async fn get_by_id<T: Transport>(
    client: &ApiClient<T>,
    user_id: i64,
) -> Result<UserWithAppointments, ApiError> {
    client.get(&format!("/users/{user_id}")).await
}
