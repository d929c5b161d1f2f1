use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::{dtos::SubscriptionWithDetailsDTO, get_subscriptions::APIResponse};
use pulsebridge_domain::{Event, User, ID};
use pulsebridge_infra::PulseContext;
use std::collections::HashMap;

pub async fn get_subscriptions_controller(
    http_req: HttpRequest,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSubscriptionsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|subscriptions| HttpResponse::Ok().json(APIResponse::new(subscriptions)))
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Admins see every `Subscription`, everybody else only their own
#[derive(Debug)]
pub struct GetSubscriptionsUseCase {
    pub user: User,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionsUseCase {
    type Response = Vec<SubscriptionWithDetailsDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSubscriptions";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let subscriptions = if self.user.is_admin() {
            ctx.repos.subscriptions.find_all().await
        } else {
            ctx.repos.subscriptions.find_by_volunteer(&self.user.id).await
        };
        let mut subscriptions = subscriptions.map_err(|_| UseCaseError::StorageError)?;
        subscriptions.sort_by(|s1, s2| s2.created.cmp(&s1.created));

        let event_ids = subscriptions
            .iter()
            .map(|s| s.event_id.clone())
            .collect::<Vec<_>>();
        let volunteer_ids = subscriptions
            .iter()
            .map(|s| s.volunteer_id.clone())
            .collect::<Vec<_>>();

        let events = ctx
            .repos
            .events
            .find_many(&event_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect::<HashMap<ID, Event>>();
        let volunteers = ctx
            .repos
            .users
            .find_many(&volunteer_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect::<HashMap<ID, User>>();

        Ok(subscriptions
            .into_iter()
            .map(|s| {
                let event = events.get(&s.event_id).cloned();
                let volunteer = volunteers.get(&s.volunteer_id).cloned();
                SubscriptionWithDetailsDTO::new(s, event, volunteer)
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subscription::test_utils::{setup, subscribe, StaticTimeSys, TestContext};
    use std::sync::Arc;

    #[actix_web::test]
    async fn lists_own_subscriptions_newest_first() {
        let TestContext {
            mut ctx,
            event,
            volunteer,
            owner,
            ..
        } = setup().await;
        let other_event = Event::new(owner.id.clone(), "Food drive", event.start_ts);
        ctx.repos.events.insert(&other_event).await.unwrap();

        let now = ctx.sys.get_timestamp_millis();
        let older = subscribe(&ctx, &event, &volunteer).await;
        ctx.sys = Arc::new(StaticTimeSys(now + 1000));
        let newer = subscribe(&ctx, &other_event, &volunteer).await;

        let mut usecase = GetSubscriptionsUseCase {
            user: volunteer.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].subscription.id, newer.id);
        assert_eq!(res[1].subscription.id, older.id);
        assert_eq!(
            res[0].event.as_ref().map(|e| e.title.clone()),
            Some("Food drive".to_string())
        );
        assert_eq!(
            res[1].volunteer.as_ref().map(|v| v.id.clone()),
            Some(volunteer.id.clone())
        );

        let mut usecase = GetSubscriptionsUseCase { user: owner };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn admin_lists_all_subscriptions() {
        let TestContext {
            ctx,
            event,
            volunteer,
            admin,
            ..
        } = setup().await;
        let other_volunteer = User::new("other@example.com", "other");
        ctx.repos.users.insert(&other_volunteer).await.unwrap();
        subscribe(&ctx, &event, &volunteer).await;
        subscribe(&ctx, &event, &other_volunteer).await;

        let mut usecase = GetSubscriptionsUseCase { user: admin };
        assert_eq!(usecase.execute(&ctx).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn lists_subscription_with_missing_event() {
        let TestContext {
            ctx,
            event,
            volunteer,
            ..
        } = setup().await;
        subscribe(&ctx, &event, &volunteer).await;
        ctx.repos.events.delete(&event.id).await;

        let mut usecase = GetSubscriptionsUseCase { user: volunteer };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert!(res[0].event.is_none());
        assert!(res[0].volunteer.is_some());
    }
}
