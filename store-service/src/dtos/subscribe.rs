use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "rina@example.com")]
    pub email: String,

    pub name: Option<String>,
}
