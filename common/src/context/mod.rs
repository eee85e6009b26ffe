use std::sync::Arc;

use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use anyhow::anyhow;

use crate::context::effectfull_context::{EffectfullContext, HandlerContext, ServiceState};
use crate::{
    auth::Auth,
    error::{self, AddCode, ServiceError},
    repository::RepositoryObject,
};

pub use self::context_trait::GeneralContext;
pub mod context_trait;
pub mod effectfull_context;
pub mod test_context;

impl FromRequest for GeneralContext {
    type Error = ServiceError;

    type Future = futures_util::future::LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut actix_web::dev::Payload) -> Self::Future {
        fn from_request_inner(
            req: &HttpRequest,
            _payload: &mut Payload,
        ) -> error::Result<GeneralContext> {
            let auth = req
                .headers()
                .get("Authorization")
                .and_then(|x| x.to_str().ok())
                .and_then(|x| x.strip_prefix("Bearer "))
                .map(Auth::from_token);

            let user_auth = match auth {
                Some(Ok(Some(res))) => {
                    log::debug!("Token parsed successfully");
                    res
                }
                Some(Ok(None)) => {
                    log::warn!("Token expired");
                    Auth::None
                }
                Some(Err(err)) => {
                    log::warn!("Error parsing token: {}", err);
                    Auth::None
                }
                None => Auth::None,
            };

            let Some(state) = req.app_data::<Data<Arc<ServiceState>>>() else {
                return Err(anyhow!("No state provided").code(500));
            };

            Ok(GeneralContext::Effectfull(EffectfullContext(
                Arc::clone(state),
                HandlerContext { user_auth },
            )))
        }
        let result = from_request_inner(req, payload);

        Box::pin(async move { result })
    }
}

impl GeneralContext {
    fn state(&self) -> &Arc<ServiceState> {
        match self {
            GeneralContext::Effectfull(context) => &context.0,
            GeneralContext::Test(context) => &context.state,
        }
    }

    pub fn auth(&self) -> Auth {
        match self {
            GeneralContext::Effectfull(context) => context.1.user_auth.clone(),
            GeneralContext::Test(context) => context.user_auth.clone(),
        }
    }

    pub fn get_repository<T: 'static>(&self) -> Option<RepositoryObject<T>> {
        self.state()
            .repositories
            .get::<RepositoryObject<T>>()
            .cloned()
    }

    pub fn try_get_repository<T: 'static>(&self) -> error::Result<RepositoryObject<T>> {
        self.get_repository::<T>().ok_or(
            anyhow!(
                "Repository for type {} not found",
                std::any::type_name::<T>()
            )
            .code(500),
        )
    }
}
