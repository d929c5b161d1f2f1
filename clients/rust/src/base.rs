use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// Header the server reads the current user from
const USER_HEADER: &str = "pulsebridge-user";

pub(crate) struct BaseClient {
    address: String,
    user_id: Option<String>,
    client: Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            user_id: None,
            client: Client::new(),
        }
    }

    pub fn set_user(&mut self, user_id: String) {
        self.user_id = Some(user_id);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self.client.request(method, &url);

        if let Some(user_id) = &self.user_id {
            builder.header(USER_HEADER, user_id.clone())
        } else {
            builder
        }
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_codes: &[StatusCode],
    ) -> Result<Response, APIError> {
        let status = res.status();
        if expected_status_codes.contains(&status) {
            return Ok(res);
        }

        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
            StatusCode::FORBIDDEN => APIErrorVariant::Forbidden,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            StatusCode::CONFLICT => APIErrorVariant::Conflict,
            _ => APIErrorVariant::UnexpectedStatusCode(status),
        };
        let message = res.text().await.unwrap_or_default();
        Err(APIError { variant, message })
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<(StatusCode, T)> {
        let res = self.check_status_code(res, expected_status_codes).await?;
        let status = res.status();
        res.json::<T>()
            .await
            .map(|body| (status, body))
            .map_err(|e| APIError {
                variant: APIErrorVariant::MalformedResponse,
                message: e.to_string(),
            })
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<(StatusCode, T)> {
        let res = builder.send().await.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })?;
        self.handle_api_response(res, expected_status_codes).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::GET, path);
        self.send(builder, &[expected_status_code])
            .await
            .map(|(_, body)| body)
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::DELETE, path);
        self.send(builder, &[expected_status_code])
            .await
            .map(|(_, body)| body)
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::PUT, path).json(&body);
        self.send(builder, &[expected_status_code])
            .await
            .map(|(_, body)| body)
    }

    /// POST without a body, the status code is returned alongside the
    /// response for endpoints that answer with more than one success code
    pub async fn post_empty<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<(StatusCode, T)> {
        let builder = self.get_client(Method::POST, path);
        self.send(builder, expected_status_codes).await
    }
}
