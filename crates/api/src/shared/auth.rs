use crate::error::PulseError;
use actix_web::HttpRequest;
use pulsebridge_domain::{User, ID};
use pulsebridge_infra::PulseContext;

/// Header set by the auth gateway with the id of the authenticated user
pub const USER_HEADER: &str = "pulsebridge-user";

fn parse_user_header(req: &HttpRequest) -> Result<ID, PulseError> {
    let user_id = match req.headers().get(USER_HEADER) {
        Some(user_id) => user_id,
        None => {
            return Err(PulseError::Unauthorized(format!(
                "Unable to find the {} header",
                USER_HEADER
            )))
        }
    };
    user_id
        .to_str()
        .ok()
        .and_then(|user_id| user_id.trim().parse::<ID>().ok())
        .ok_or_else(|| {
            PulseError::Unauthorized(format!("Malformed {} header provided", USER_HEADER))
        })
}

/// Resolves the `User` making the request
pub async fn protect_route(req: &HttpRequest, ctx: &PulseContext) -> Result<User, PulseError> {
    let user_id = parse_user_header(req)?;

    match ctx.repos.users.find(&user_id).await {
        Some(user) => Ok(user),
        None => Err(PulseError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}
