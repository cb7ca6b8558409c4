use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct JsonResponse<T> {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T> {
    message: String,
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            message: String::new(),
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub(crate) fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    pub(crate) fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn to_json_response(self) -> JsonResponse<T> {
        JsonResponse {
            message: self.message,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    fn to_error(self, status: StatusCode) -> Error {
        let message = self.message.clone();
        let response = HttpResponse::build(status).json(self.to_json_response());

        InternalError::from_response(message, response).into()
    }

    pub(crate) fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).to_json_response())
    }

    pub(crate) fn created<I: Into<String>>(self, msg: I) -> HttpResponse {
        HttpResponse::Created().json(self.set_msg(msg).to_json_response())
    }

    pub(crate) fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.set_msg(msg).to_error(StatusCode::BAD_REQUEST)
    }

    pub(crate) fn form_error<I: Into<String>>(self, msg: I) -> Error {
        self.set_msg(msg).to_error(StatusCode::UNPROCESSABLE_ENTITY)
    }

    pub(crate) fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.set_msg(msg).to_error(StatusCode::NOT_FOUND)
    }

    pub(crate) fn forbidden<I: Into<String>>(self, msg: I) -> Error {
        self.set_msg(msg).to_error(StatusCode::FORBIDDEN)
    }

    pub(crate) fn conflict<I: Into<String>>(self, msg: I) -> Error {
        self.set_msg(msg).to_error(StatusCode::CONFLICT)
    }

    pub(crate) fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        let msg = msg.into();
        let msg = if msg.trim().is_empty() {
            "Internal Server Error".to_string()
        } else {
            msg
        };
        self.set_msg(msg).to_error(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_error_carries_status_and_envelope() {
        let err = JsonResponse::<String>::build().forbidden("nope");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "nope"}));
    }

    #[test]
    fn test_empty_internal_error_gets_default_message() {
        let response = JsonResponse::<String>::build()
            .internal_server_error("")
            .error_response();
        let body = response.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Internal Server Error");
    }
}
