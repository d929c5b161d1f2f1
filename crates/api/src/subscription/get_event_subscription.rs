use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::get_event_subscription::{APIResponse, PathParams};
use pulsebridge_domain::{Subscription, User, ID};
use pulsebridge_infra::PulseContext;

pub async fn get_event_subscription_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventSubscriptionUseCase {
        event_id: path.event_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.subscription, res.can_subscribe)))
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotFound(ID),
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
        }
    }
}

/// Subscription state of the current user for an event
#[derive(Debug)]
pub struct GetEventSubscriptionUseCase {
    pub event_id: ID,
    pub user: User,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub subscription: Option<Subscription>,
    pub can_subscribe: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventSubscriptionUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventSubscription";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::EventNotFound(self.event_id.clone())),
        };

        let subscription = ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&event.id, &self.user.id)
            .await;

        Ok(UseCaseResponse {
            subscription,
            can_subscribe: !event.is_owned_by(&self.user.id),
        })
    }
}
