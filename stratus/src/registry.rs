//! Built-in scenario registry.
//!
//! A harness discovers scenarios through [`ScenarioEntry`] records: the
//! declarative [`ScenarioSpec`] metadata plus an object-safe run function
//! taking the client and the harness-supplied arguments. The harness is
//! expected to resolve the inputs named in `spec.conversions` (logical
//! image/flavor names to concrete refs) before calling `run`.

use crate::client::ComputeApi;
use crate::scenarios::compat::BootArgs;
use crate::scenarios::{keypairs, ScenarioError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use stratus_core::{FlavorRef, ImageRef, KeypairParams, ScenarioSpec};

pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ScenarioError>> + Send + 'a>>;

/// Keyword arguments a harness passes to a scenario invocation.
///
/// Scenarios read only the fields they declare; `image` and `flavor` must
/// already be resolved per the spec's conversion rules.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScenarioArgs {
    #[serde(default)]
    pub keypair_params: KeypairParams,
    #[serde(flatten)]
    pub boot: BootArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<FlavorRef>,
}

/// One discoverable scenario: metadata plus a uniform entry point.
pub struct ScenarioEntry {
    pub spec: &'static ScenarioSpec,
    pub run: for<'a> fn(&'a dyn ComputeApi, &'a ScenarioArgs) -> ScenarioFuture<'a>,
}

/// All scenarios shipped by this crate, in registration order.
pub fn builtin_scenarios() -> Vec<ScenarioEntry> {
    vec![
        ScenarioEntry {
            spec: &keypairs::CREATE_AND_LIST_KEYPAIRS,
            run: |compute, args| {
                Box::pin(keypairs::create_and_list_keypairs(
                    compute,
                    &args.keypair_params,
                ))
            },
        },
        ScenarioEntry {
            spec: &keypairs::CREATE_AND_DELETE_KEYPAIR,
            run: |compute, args| {
                Box::pin(keypairs::create_and_delete_keypair(
                    compute,
                    &args.keypair_params,
                ))
            },
        },
        ScenarioEntry {
            spec: &keypairs::BOOT_AND_DELETE_SERVER_WITH_KEYPAIR,
            run: |compute, args| {
                Box::pin(async move {
                    let image = args.image.as_ref().ok_or(ScenarioError::MissingArg("image"))?;
                    let flavor = args
                        .flavor
                        .as_ref()
                        .ok_or(ScenarioError::MissingArg("flavor"))?;
                    keypairs::boot_and_delete_server_with_keypair(
                        compute,
                        image,
                        flavor,
                        &args.boot,
                        &args.keypair_params,
                    )
                    .await
                })
            },
        },
        ScenarioEntry {
            spec: &keypairs::CREATE_AND_GET_KEYPAIR,
            run: |compute, args| {
                Box::pin(keypairs::create_and_get_keypair(
                    compute,
                    &args.keypair_params,
                ))
            },
        },
    ]
}
