//! Boundary validation. Rejections here use the `{"detail": [...]}` shape and
//! HTTP 422, never the adapters' `{error, details}` shape.

use crate::domain::ports::BoundedFields;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One rejected input, located by its path in the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldIssue {
    fn body(field: Option<&str>, msg: impl Into<String>, kind: &str) -> Self {
        let mut loc = vec!["body".to_string()];
        if let Some(field) = field {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRejection {
    pub detail: Vec<FieldIssue>,
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

// serde_json reports absent fields as "missing field `name`".
fn missing_field(text: &str) -> Option<&str> {
    let marker = "missing field `";
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    rest.find('`').map(|end| &rest[..end])
}

impl From<JsonRejection> for RequestRejection {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let issue = match &rejection {
            JsonRejection::JsonDataError(_) => {
                match missing_field(&text) {
                    Some(field) => FieldIssue::body(Some(field), "Field required", "missing"),
                    None => FieldIssue::body(None, text.clone(), "value_error"),
                }
            }
            JsonRejection::JsonSyntaxError(_) => {
                FieldIssue::body(None, text.clone(), "json_invalid")
            }
            JsonRejection::MissingJsonContentType(_) => {
                FieldIssue::body(None, text.clone(), "content_type")
            }
            _ => FieldIssue::body(None, text.clone(), "value_error"),
        };
        RequestRejection { detail: vec![issue] }
    }
}

/// Range check every bounded field against the limits registry.
pub fn check_bounds<T: BoundedFields>(value: &T) -> Vec<FieldIssue> {
    value
        .bounded_fields()
        .into_iter()
        .filter_map(|field| {
            let limit = field.quantity.limit();
            if field.value < limit.min {
                Some(FieldIssue::body(
                    Some(field.name),
                    format!("Input should be greater than or equal to {}", limit.min),
                    "greater_than_equal",
                ))
            } else if field.value > limit.max {
                Some(FieldIssue::body(
                    Some(field.name),
                    format!("Input should be less than or equal to {}", limit.max),
                    "less_than_equal",
                ))
            } else {
                None
            }
        })
        .collect()
}

/// JSON body extractor that also enforces the registry bounds.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + BoundedFields,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected request body: {}", e.body_text());
            RequestRejection::from(e)
        })?;

        let detail = check_bounds(&value);
        if !detail.is_empty() {
            tracing::debug!("Rejected {} out-of-bounds field(s)", detail.len());
            return Err(RequestRejection { detail });
        }
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CropRequest, IrrigationRequest};

    #[test]
    fn test_check_bounds_reports_wire_names() {
        let req = CropRequest {
            n: 250.0,
            p: 10.0,
            k: 10.0,
            ph: 3.0,
            temperature: 25.0,
            humidity: 50.0,
            rainfall: 100.0,
        };
        let issues = check_bounds(&req);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].loc, vec!["body", "N"]);
        assert_eq!(issues[0].kind, "less_than_equal");
        assert_eq!(issues[0].msg, "Input should be less than or equal to 200");
        assert_eq!(issues[1].loc, vec!["body", "ph"]);
        assert_eq!(issues[1].kind, "greater_than_equal");
        assert_eq!(issues[1].msg, "Input should be greater than or equal to 3.5");
    }

    #[test]
    fn test_in_bounds_request_passes() {
        let req = IrrigationRequest {
            region: "South India".into(),
            crop_type: "Maize".into(),
            soil_type: "Clay".into(),
            season: "Kharif".into(),
            farm_area: 0.1,
            soil_ph: 10.0,
            nitrogen: 200.0,
            phosphorus: 0.0,
            potassium: 250.0,
            soil_moisture: 100.0,
            temperature: 55.0,
            rainfall: 500.0,
        };
        assert!(check_bounds(&req).is_empty());
    }

    #[test]
    fn test_missing_field_name() {
        assert_eq!(
            missing_field("Failed to deserialize the JSON body into the target type: missing field `K` at line 1 column 20"),
            Some("K")
        );
        assert_eq!(missing_field("invalid type: string \"x\", expected f64"), None);
    }

    #[test]
    fn test_rejection_serialises_type_key() {
        let rejection = RequestRejection {
            detail: vec![FieldIssue::body(Some("K"), "Field required", "missing")],
        };
        assert_eq!(
            serde_json::to_value(&rejection).unwrap(),
            serde_json::json!({
                "detail": [{"loc": ["body", "K"], "msg": "Field required", "type": "missing"}]
            })
        );
    }
}
