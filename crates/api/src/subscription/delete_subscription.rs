use crate::{
    error::PulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use pulsebridge_api_structs::delete_subscription::{APIResponse, PathParams};
use pulsebridge_domain::{Subscription, User, ID};
use pulsebridge_infra::PulseContext;

pub async fn delete_subscription_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PulseContext>,
) -> Result<HttpResponse, PulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteSubscriptionUseCase {
        subscription_id: path.subscription_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| {
            HttpResponse::Ok().json(APIResponse::new(
                subscription,
                "Subscription was removed",
            ))
        })
        .map_err(PulseError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
}

impl From<UseCaseError> for PulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(subscription_id) => Self::NotFound(format!(
                "The subscription with id: {}, was not found.",
                subscription_id
            )),
            UseCaseError::Forbidden => {
                Self::Forbidden("You are not allowed to remove this subscription".into())
            }
        }
    }
}

/// Removes a `Subscription` by id, used by volunteers from their list
/// of subscriptions and by admins
#[derive(Debug)]
pub struct DeleteSubscriptionUseCase {
    pub subscription_id: ID,
    pub user: User,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSubscriptionUseCase {
    type Response = Subscription;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSubscription";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let subscription = match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(subscription) => subscription,
            None => return Err(UseCaseError::NotFound(self.subscription_id.clone())),
        };
        if !subscription.can_be_managed_by(&self.user) {
            return Err(UseCaseError::Forbidden);
        }

        ctx.repos
            .subscriptions
            .delete(&subscription.id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subscription::test_utils::{setup, subscribe, TestContext};

    #[actix_web::test]
    async fn volunteer_removes_own_subscription() {
        let TestContext {
            ctx,
            event,
            volunteer,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;

        let mut usecase = DeleteSubscriptionUseCase {
            subscription_id: subscription.id.clone(),
            user: volunteer,
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.subscriptions.find(&subscription.id).await.is_none());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn admin_removes_any_subscription() {
        let TestContext {
            ctx,
            event,
            volunteer,
            admin,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;

        let mut usecase = DeleteSubscriptionUseCase {
            subscription_id: subscription.id.clone(),
            user: admin,
        };
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::test]
    async fn rejects_other_users() {
        let TestContext {
            ctx,
            event,
            volunteer,
            owner,
            ..
        } = setup().await;
        let subscription = subscribe(&ctx, &event, &volunteer).await;

        let mut usecase = DeleteSubscriptionUseCase {
            subscription_id: subscription.id.clone(),
            user: owner,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::Forbidden)
        ));
        assert!(ctx.repos.subscriptions.find(&subscription.id).await.is_some());
    }
}
