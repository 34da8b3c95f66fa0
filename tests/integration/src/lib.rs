//! End-to-end tests for the LocalStack testcontainers fixture.
//!
//! These tests start real LocalStack containers and need a docker daemon.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p ruststack-testcontainers-integration -- --ignored
//! ```

use std::sync::Once;

use tokio::io::AsyncReadExt;

/// Key of the object stored in every test bucket.
pub const OBJECT_KEY: &str = "bar";

/// Content of the object stored in every test bucket.
pub const OBJECT_CONTENT: &str = "baz";

/// Body of the message sent through test queues.
pub const MESSAGE_BODY: &str = "ping";

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,ruststack_testcontainers=debug")
                }),
            )
            .with_test_writer()
            .init();
    });
}

/// Generate a unique, lowercase resource name for a test.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Read a rusoto streaming body into a string.
pub async fn read_rusoto_body(body: rusoto_s3::StreamingBody) -> String {
    let mut content = String::new();
    Box::pin(body.into_async_read())
        .read_to_string(&mut content)
        .await
        .unwrap_or_else(|e| panic!("failed to read object body: {e}"));
    content
}

mod test_aws_sdk;
mod test_provider;
mod test_rusoto;
