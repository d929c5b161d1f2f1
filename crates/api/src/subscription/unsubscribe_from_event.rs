use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::unsubscribe_from_event::{APIResponse, PathParams};
use pulsebridge_domain::{Subscription, User, ID};
use pulsebridge_infra::PulseContext;

pub async fn unsubscribe_from_event_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UnsubscribeFromEventUseCase {
        event_id: path.event_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| {
            HttpResponse::Ok().json(APIResponse::new(
                subscription,
                "Successfully unsubscribed from the event",
            ))
        })
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    NotSubscribed(ID),
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotSubscribed(event_id) => Self::NotFound(format!(
                "You are not subscribed to the event with id: {}.",
                event_id
            )),
        }
    }
}

#[derive(Debug)]
pub struct UnsubscribeFromEventUseCase {
    pub event_id: ID,
    pub user: User,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnsubscribeFromEventUseCase {
    type Response = Subscription;

    type Error = UseCaseError;

    const NAME: &'static str = "UnsubscribeFromEvent";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let subscription = ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&self.event_id, &self.user.id)
            .await;

        match subscription {
            Some(subscription) => ctx
                .repos
                .subscriptions
                .delete(&subscription.id)
                .await
                .ok_or_else(|| UseCaseError::NotSubscribed(self.event_id.clone())),
            None => Err(UseCaseError::NotSubscribed(self.event_id.clone())),
        }
    }
}
