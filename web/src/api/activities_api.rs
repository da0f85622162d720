use shared::{Activity, ActivityCreate, ActivityQuery, DeleteResponse};

use super::{with_query, ApiClient, Transport};
use crate::error::ApiError;

const ENDPOINT: &str = "/activities/";

pub async fn create<T: Transport>(
    client: &ApiClient<T>,
    activity: &ActivityCreate,
) -> Result<Activity, ApiError> {
    let created: Activity = client.post(ENDPOINT, activity).await?;
    log::info!("Api create activity, activity_id={}", created.id);
    Ok(created)
}

pub async fn list<T: Transport>(
    client: &ApiClient<T>,
    query: &ActivityQuery,
) -> Result<Vec<Activity>, ApiError> {
    client.get(&with_query(ENDPOINT, &query.pairs())).await
}

pub async fn get_by_id<T: Transport>(
    client: &ApiClient<T>,
    activity_id: i64,
) -> Result<Activity, ApiError> {
    client.get(&format!("{ENDPOINT}{activity_id}")).await
}

pub async fn update<T: Transport>(
    client: &ApiClient<T>,
    activity_id: i64,
    activity: &ActivityCreate,
) -> Result<Activity, ApiError> {
    client.put(&format!("{ENDPOINT}{activity_id}"), activity).await
}

pub async fn delete<T: Transport>(
    client: &ApiClient<T>,
    activity_id: i64,
) -> Result<DeleteResponse, ApiError> {
    let response: DeleteResponse = client.delete(&format!("{ENDPOINT}{activity_id}")).await?;
    log::info!("Api delete activity, activity_id={activity_id}");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::ScriptedTransport;
    use crate::api::Method;

    #[tokio::test]
    async fn list_filters_by_city() {
        let transport = ScriptedTransport::replying(
            200,
            r#"[{"id":1,"name":"Tacos","description":"Ruta","duration":"2 horas","cost":250.0,"location":"Centro","city":"Querétaro","state":"Querétaro","image_url":null}]"#,
        );
        let client = ApiClient::with_transport("", transport);
        let query = ActivityQuery {
            limit: Some(6),
            city: Some("Querétaro".to_owned()),
            ..Default::default()
        };

        let activities = list(&client, &query).await.unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name, "Tacos");
        assert_eq!(
            client.transport().requests.borrow()[0].url,
            "/activities/?limit=6&city=Quer%C3%A9taro"
        );
    }

    #[tokio::test]
    async fn delete_reads_the_confirmation() {
        let client = ApiClient::with_transport(
            "",
            ScriptedTransport::replying(200, r#"{"message":"Activity deleted successfully"}"#),
        );

        let response = delete(&client, 4).await.unwrap();

        assert_eq!(response.message, "Activity deleted successfully");
        let requests = client.transport().requests.borrow();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].url, "/activities/4");
    }

    #[tokio::test]
    async fn failed_delete_is_logged_by_the_client_only() {
        testing_logger::setup();
        let client = ApiClient::with_transport(
            "",
            ScriptedTransport::replying(404, r#"{"detail":"Activity not found"}"#),
        );

        let error = delete(&client, 99).await.unwrap_err();

        assert_eq!(error.to_string(), "HTTP 404");
        testing_logger::validate(|captured| {
            assert_eq!(captured.len(), 1);
            assert_eq!(captured[0].level, log::Level::Error);
            assert_eq!(captured[0].body, "API DELETE Error: HTTP 404");
        });
    }
}
