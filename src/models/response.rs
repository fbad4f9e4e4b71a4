use serde::Serialize;

/// Uniform envelope for every endpoint. Some routes in the old dashboard
/// returned bare arrays; everything now goes through this shape.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Success with a message and no payload, for routes that only
    /// report a state.
    pub fn ok_message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn ok_omits_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2, 3] }));
    }

    #[test]
    fn ok_message_carries_no_data() {
        let body = serde_json::to_value(ApiResponse::<Value>::ok_message(
            "izleme listesi aktif",
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "izleme listesi aktif" })
        );
    }

    #[test]
    fn fail_omits_data() {
        let body =
            serde_json::to_value(ApiResponse::<Value>::fail("kaleci verisi bulunamadı")).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "message": "kaleci verisi bulunamadı" })
        );
    }
}
