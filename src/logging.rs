use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, for programs driving a reader
///
/// `RUST_LOG=type2_tag=trace` logs every APDU sent and received. Does nothing
/// if a global subscriber is already set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
pub(crate) fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("type2_tag=trace,type2_tlv=trace")
        .with_test_writer()
        .try_init();
}
