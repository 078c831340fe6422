//! Shared utilities for use cases.
//!
//! Model calls go through [`generate_cancellable`], which bounds them by the
//! configured timeout and the caller's cancellation token.

use crate::config::BehaviorConfig;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GatewayError, GenerateRequest, GenerateResponse, ModelGateway};
use relay_domain::{ModelCapabilities, ModelRequirements};
use tokio_util::sync::CancellationToken;

/// Run one generation, honoring the timeout and cancellation.
pub(crate) async fn generate_cancellable<G: ModelGateway + ?Sized>(
    gateway: &G,
    request: GenerateRequest,
    behavior: &BehaviorConfig,
    cancellation_token: &Option<CancellationToken>,
) -> Result<GenerateResponse, GatewayError> {
    let call = async {
        match behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, gateway.generate(request))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => gateway.generate(request).await,
        }
    };

    match cancellation_token {
        Some(token) => {
            if token.is_cancelled() {
                return Err(GatewayError::Cancelled);
            }
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(GatewayError::Cancelled),
                result = call => result,
            }
        }
        None => call.await,
    }
}

/// Resolve an explicitly requested model, or select one by requirements.
pub(crate) fn choose_model<C: ModelCatalog + ?Sized>(
    catalog: &C,
    requested: Option<&str>,
    requirements: &ModelRequirements,
) -> Result<ModelCapabilities, GatewayError> {
    match requested {
        Some(name) => catalog
            .resolve(name)
            .ok_or_else(|| GatewayError::ModelNotAvailable(name.to_string())),
        None => catalog.select_best(requirements).ok_or_else(|| {
            GatewayError::ModelNotAvailable(format!(
                "no model with intelligence >= {}",
                requirements.min_intelligence
            ))
        }),
    }
}
