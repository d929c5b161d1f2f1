use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::update_subscription_reminder::{APIResponse, PathParams, RequestBody};
use pulsebridge_domain::{Subscription, User, ID};
use pulsebridge_infra::PulseContext;

pub async fn update_subscription_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;
    let reminder_hours = Guard::against_invalid_reminder_hours(body.reminder_hours)?;

    let usecase = UpdateSubscriptionReminderUseCase {
        subscription_id: path.subscription_id.clone(),
        reminder_hours,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| {
            HttpResponse::Ok().json(APIResponse::new(
                subscription,
                "Reminder preference was updated",
            ))
        })
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
    EventNotFound(ID),
    EventAlreadyStarted(ID),
    StorageError,
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(subscription_id) => Self::NotFound(format!(
                "The subscription with id: {}, was not found.",
                subscription_id
            )),
            UseCaseError::Forbidden => {
                Self::Forbidden("You are not allowed to change this reminder".into())
            }
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::EventAlreadyStarted(event_id) => Self::Conflict(format!(
                "The event with id: {} has already started.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UpdateSubscriptionReminderUseCase {
    pub subscription_id: ID,
    /// Validated to be within the allowed bounds
    pub reminder_hours: i64,
    pub user: User,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSubscriptionReminderUseCase {
    type Response = Subscription;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSubscriptionReminder";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let mut subscription = match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(subscription) => subscription,
            None => return Err(UseCaseError::NotFound(self.subscription_id.clone())),
        };
        if !subscription.can_be_managed_by(&self.user) {
            return Err(UseCaseError::Forbidden);
        }

        let event = match ctx.repos.events.find(&subscription.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::EventNotFound(subscription.event_id)),
        };
        let now = ctx.sys.get_timestamp_millis();
        if event.has_started(now) {
            return Err(UseCaseError::EventAlreadyStarted(event.id));
        }

        subscription.update_reminder(self.reminder_hours, now);
        ctx.repos
            .subscriptions
            .save(&subscription)
            .await
            .map(|_| subscription)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subscription::test_utils::{setup, subscribe, StaticTimeSys, TestContext};
    use std::sync::Arc;

    #[actix_web::test]
    async fn updates_and_rearms_reminder() {
        let TestContext {
            ctx,
            event,
            volunteer,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;
        ctx.repos
            .subscriptions
            .mark_reminder_sent(&subscription, 1)
            .await
            .unwrap();

        let mut usecase = UpdateSubscriptionReminderUseCase {
            subscription_id: subscription.id.clone(),
            reminder_hours: 48,
            user: volunteer,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminder_hours, 48);
        assert!(!res.reminder_sent);

        let stored = ctx.repos.subscriptions.find(&subscription.id).await.unwrap();
        assert_eq!(stored.reminder_hours, 48);
        assert!(!stored.reminder_sent);
    }

    #[actix_web::test]
    async fn rejects_update_after_event_started() {
        let TestContext {
            mut ctx,
            event,
            volunteer,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;
        ctx.sys = Arc::new(StaticTimeSys(event.start_ts + 1));

        let mut usecase = UpdateSubscriptionReminderUseCase {
            subscription_id: subscription.id.clone(),
            reminder_hours: 2,
            user: volunteer,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::EventAlreadyStarted(_))
        ));

        let stored = ctx.repos.subscriptions.find(&subscription.id).await.unwrap();
        assert_eq!(stored.reminder_hours, subscription.reminder_hours);
        assert_eq!(stored.updated, subscription.updated);
    }

    #[actix_web::test]
    async fn checks_permissions_before_event() {
        let TestContext {
            ctx,
            event,
            volunteer,
            owner,
            admin,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;
        ctx.repos.events.delete(&event.id).await;

        let mut usecase = UpdateSubscriptionReminderUseCase {
            subscription_id: subscription.id.clone(),
            reminder_hours: 2,
            user: owner,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::Forbidden)
        ));

        let mut usecase = UpdateSubscriptionReminderUseCase {
            subscription_id: subscription.id.clone(),
            reminder_hours: 2,
            user: admin,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::EventNotFound(_))
        ));
    }

    #[actix_web::test]
    async fn rejects_missing_subscription() {
        let TestContext { ctx, volunteer, .. } = setup().await;

        let mut usecase = UpdateSubscriptionReminderUseCase {
            subscription_id: ID::new(),
            reminder_hours: 2,
            user: volunteer,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
