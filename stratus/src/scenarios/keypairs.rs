//! Scenarios for compute keypairs.
//!
//! Each body is a short call sequence against a [`ComputeApi`] client.
//! The matching `*_SPEC` record carries the registration metadata the
//! harness reads before invoking the body.

use crate::client::ComputeApi;
use crate::name::random_name;
use crate::scenarios::compat::BootArgs;
use crate::scenarios::{ensure, ScenarioError};
use stratus_core::{
    CleanupScope, FlavorRef, ImageRef, InputConversion, KeypairParams, ResourceKind, ScenarioSpec,
    Service,
};
use tracing::{info, instrument};

const NAME_PREFIX: &str = "stratus";

pub static CREATE_AND_LIST_KEYPAIRS: ScenarioSpec = ScenarioSpec {
    name: "compute.keypair.create_and_list",
    required_services: &[Service::Compute],
    requires_users: true,
    cleanup: &[CleanupScope::Compute],
    conversions: &[],
};

/// Create a keypair with a random name, then list keypairs and verify the
/// new one shows up.
#[instrument(skip_all, fields(scenario = CREATE_AND_LIST_KEYPAIRS.name))]
pub async fn create_and_list_keypairs<C: ComputeApi + ?Sized>(
    compute: &C,
    params: &KeypairParams,
) -> Result<(), ScenarioError> {
    let keypair = compute
        .create_keypair(&random_name(NAME_PREFIX), params)
        .await?;
    ensure(!keypair.name.is_empty(), "keypair wasn't created")?;

    let listed = compute.list_keypairs().await?;
    ensure(
        listed.iter().any(|k| k.name == keypair.name),
        format!("keypair {} missing from listing", keypair.name),
    )?;

    info!(keypair = %keypair.name, "created and listed");
    Ok(())
}

pub static CREATE_AND_DELETE_KEYPAIR: ScenarioSpec = ScenarioSpec {
    name: "compute.keypair.create_and_delete",
    required_services: &[Service::Compute],
    requires_users: true,
    cleanup: &[CleanupScope::Compute],
    conversions: &[],
};

/// Create a keypair with a random name, then delete it.
#[instrument(skip_all, fields(scenario = CREATE_AND_DELETE_KEYPAIR.name))]
pub async fn create_and_delete_keypair<C: ComputeApi + ?Sized>(
    compute: &C,
    params: &KeypairParams,
) -> Result<(), ScenarioError> {
    let keypair = compute
        .create_keypair(&random_name(NAME_PREFIX), params)
        .await?;
    compute.delete_keypair(&keypair.name).await?;
    Ok(())
}

pub static BOOT_AND_DELETE_SERVER_WITH_KEYPAIR: ScenarioSpec = ScenarioSpec {
    name: "compute.keypair.boot_and_delete_server",
    required_services: &[Service::Compute, Service::Image],
    requires_users: true,
    cleanup: &[CleanupScope::Compute],
    conversions: &[
        InputConversion {
            param: "image",
            kind: ResourceKind::Image,
        },
        InputConversion {
            param: "flavor",
            kind: ResourceKind::Flavor,
        },
    ],
};

/// Boot a server with a freshly created keypair, then tear both down.
///
/// The server references the keypair while alive, so deletion order is
/// fixed: server first, keypair second.
#[instrument(skip_all, fields(scenario = BOOT_AND_DELETE_SERVER_WITH_KEYPAIR.name))]
pub async fn boot_and_delete_server_with_keypair<C: ComputeApi + ?Sized>(
    compute: &C,
    image: &ImageRef,
    flavor: &FlavorRef,
    boot_args: &BootArgs,
    keypair_params: &KeypairParams,
) -> Result<(), ScenarioError> {
    let boot_params = boot_args.resolved();

    let keypair = compute
        .create_keypair(&random_name(NAME_PREFIX), keypair_params)
        .await?;
    let server = compute
        .boot_server(
            &random_name(NAME_PREFIX),
            image,
            flavor,
            &keypair.name,
            &boot_params,
        )
        .await?;

    compute.delete_server(&server.id).await?;
    compute.delete_keypair(&keypair.name).await?;

    info!(server = %server.id, keypair = %keypair.name, "booted and deleted");
    Ok(())
}

pub static CREATE_AND_GET_KEYPAIR: ScenarioSpec = ScenarioSpec {
    name: "compute.keypair.create_and_get",
    required_services: &[Service::Compute],
    requires_users: true,
    cleanup: &[CleanupScope::Compute],
    conversions: &[],
};

/// Create a keypair with a random name, then fetch its details.
#[instrument(skip_all, fields(scenario = CREATE_AND_GET_KEYPAIR.name))]
pub async fn create_and_get_keypair<C: ComputeApi + ?Sized>(
    compute: &C,
    params: &KeypairParams,
) -> Result<(), ScenarioError> {
    let keypair = compute
        .create_keypair(&random_name(NAME_PREFIX), params)
        .await?;
    compute.get_keypair(&keypair.name).await?;
    Ok(())
}
