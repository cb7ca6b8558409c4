use crate::helpers::JsonResponse;
use actix_web::{web::Bytes, Error};
use serde::de::DeserializeOwned;
use serde_valid::Validate;
use std::str;

/// Deserializes and validates a JSON body, reporting the failing path on error.
pub(crate) fn body_into_form<T>(body: &Bytes) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let body_str = str::from_utf8(body)
        .map_err(|err| JsonResponse::<()>::build().bad_request(err.to_string()))?;
    let deserializer = &mut serde_json::Deserializer::from_str(body_str);
    let form: T = serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let msg = format!("{}: {}", err.path(), err.inner());
        JsonResponse::<()>::build().bad_request(msg)
    })?;

    if let Err(errors) = form.validate() {
        let msg = errors.to_string();
        tracing::debug!("Invalid data received {:?}", msg);
        return Err(JsonResponse::<()>::build().form_error(msg));
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms;
    use actix_web::http::StatusCode;

    #[test]
    fn test_reports_path_of_bad_field() {
        let body = Bytes::from_static(br#"{"client_id": "one", "device": "x", "problem": "y"}"#);
        let err = body_into_form::<forms::work_order::Add>(&body).unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_failure_is_unprocessable() {
        let body = Bytes::from_static(br#"{"name": ""}"#);
        let err = body_into_form::<forms::client::Add>(&body).unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_valid_body() {
        let body = Bytes::from_static(br#"{"name": "Ana", "phone": "555-0100"}"#);
        let form = body_into_form::<forms::client::Add>(&body).unwrap();
        assert_eq!(form.name, "Ana");
    }
}
