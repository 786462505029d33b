use rand::Rng;

/// Random resource name: `<prefix>-<8 hex>`.
///
/// Scenarios never ask the caller to pick names; every run gets fresh
/// ones so concurrent runs against the same credential do not collide.
pub(crate) fn random_name(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("{prefix}-{suffix:08x}")
}
