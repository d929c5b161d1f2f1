use super::subscribers::SendConfirmationOnSubscribed;
use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::subscribe_to_event::{APIResponse, PathParams};
use pulsebridge_domain::{Event, Subscription, User, ID};
use pulsebridge_infra::{PulseContext, SubscriptionStoreError};
use tracing::info;

pub async fn subscribe_to_event_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SubscribeToEventUseCase {
        event_id: path.event_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            if res.created {
                HttpResponse::Created().json(APIResponse::new(
                    res.subscription,
                    "Successfully subscribed to the event",
                ))
            } else {
                HttpResponse::Ok().json(APIResponse::new(
                    res.subscription,
                    "You are already subscribed to this event",
                ))
            }
        })
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotFound(ID),
    OwnEvent,
    StorageError,
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::OwnEvent => {
                Self::Forbidden("You cannot subscribe to your own event".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct SubscribeToEventUseCase {
    pub event_id: ID,
    pub user: User,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub subscription: Subscription,
    pub event: Event,
    pub volunteer: User,
    /// False when the volunteer was already subscribed
    pub created: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubscribeToEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "SubscribeToEvent";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::EventNotFound(self.event_id.clone())),
        };
        if event.is_owned_by(&self.user.id) {
            return Err(UseCaseError::OwnEvent);
        }

        let existing = ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&event.id, &self.user.id)
            .await;
        if let Some(subscription) = existing {
            return Ok(UseCaseResponse {
                subscription,
                event,
                volunteer: self.user.clone(),
                created: false,
            });
        }

        let subscription = Subscription::new(
            event.id.clone(),
            self.user.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        match ctx.repos.subscriptions.insert(&subscription).await {
            Ok(_) => Ok(UseCaseResponse {
                subscription,
                event,
                volunteer: self.user.clone(),
                created: true,
            }),
            // Lost the race against a concurrent subscribe
            Err(SubscriptionStoreError::AlreadyExists { .. }) => {
                info!(
                    "Concurrent subscription detected for event: {} and volunteer: {}",
                    event.id, self.user.id
                );
                match ctx
                    .repos
                    .subscriptions
                    .find_by_event_and_volunteer(&event.id, &self.user.id)
                    .await
                {
                    Some(subscription) => Ok(UseCaseResponse {
                        subscription,
                        event,
                        volunteer: self.user.clone(),
                        created: false,
                    }),
                    None => Err(UseCaseError::StorageError),
                }
            }
            Err(SubscriptionStoreError::Storage(_)) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendConfirmationOnSubscribed)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subscription::test_utils::{setup, TestContext};
    use pulsebridge_domain::DEFAULT_REMINDER_HOURS;

    #[actix_web::test]
    async fn subscribes_volunteer_to_event() {
        let TestContext {
            ctx,
            event,
            volunteer,
            ..
        } = setup().await;

        let mut usecase = SubscribeToEventUseCase {
            event_id: event.id.clone(),
            user: volunteer.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.created);
        assert_eq!(res.subscription.reminder_hours, DEFAULT_REMINDER_HOURS);
        assert!(!res.subscription.reminder_sent);

        let stored = ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&event.id, &volunteer.id)
            .await
            .expect("Subscription to be stored");
        assert_eq!(stored.id, res.subscription.id);
    }

    #[actix_web::test]
    async fn second_subscribe_is_idempotent() {
        let TestContext {
            ctx,
            event,
            volunteer,
            ..
        } = setup().await;

        let first = execute(
            SubscribeToEventUseCase {
                event_id: event.id.clone(),
                user: volunteer.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        let second = execute(
            SubscribeToEventUseCase {
                event_id: event.id.clone(),
                user: volunteer.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.subscription.id, second.subscription.id);
        assert_eq!(
            ctx.repos
                .subscriptions
                .find_by_volunteer(&volunteer.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[actix_web::test]
    async fn rejects_owner_of_event() {
        let TestContext { ctx, event, owner, .. } = setup().await;

        let mut usecase = SubscribeToEventUseCase {
            event_id: event.id.clone(),
            user: owner,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::OwnEvent)));
    }

    #[actix_web::test]
    async fn rejects_missing_event() {
        let TestContext { ctx, volunteer, .. } = setup().await;

        let mut usecase = SubscribeToEventUseCase {
            event_id: ID::new(),
            user: volunteer,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::EventNotFound(_))));
    }

    #[actix_web::test]
    async fn sends_confirmation_in_the_background() {
        let TestContext {
            ctx,
            event,
            volunteer,
            mailer,
            ..
        } = setup().await;

        execute(
            SubscribeToEventUseCase {
                event_id: event.id.clone(),
                user: volunteer.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        for _ in 0..50 {
            if !mailer.sent_mails().is_empty() {
                break;
            }
            actix_web::rt::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let sent = mailer.sent_mails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, volunteer.email);
        assert_eq!(sent[0].subject, format!("Subscription confirmed: {}", event.title));
    }

    #[actix_web::test]
    async fn confirmation_failure_does_not_fail_subscribe() {
        let TestContext {
            ctx,
            event,
            volunteer,
            mailer,
            ..
        } = setup().await;
        mailer.set_failing(true);

        let res = execute(
            SubscribeToEventUseCase {
                event_id: event.id.clone(),
                user: volunteer.clone(),
            },
            &ctx,
        )
        .await;
        assert!(res.is_ok());
        assert!(ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&event.id, &volunteer.id)
            .await
            .is_some());
    }
}
