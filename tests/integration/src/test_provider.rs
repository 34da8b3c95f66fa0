//! Runtime SDK selection tests.

#[cfg(test)]
mod tests {
    use ruststack_testcontainers::{SdkVersion, Service, new_instance};

    use crate::init_tracing;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_start_container_selected_at_runtime() {
        init_tracing();
        let sdk: SdkVersion = std::env::var("LOCALSTACK_SDK")
            .unwrap_or_else(|_| "v2".to_owned())
            .parse()
            .expect("sdk version");

        let localstack = new_instance(sdk, None)
            .expect("new instance")
            .with_services([Service::Sqs]);
        assert_eq!(localstack.version(), sdk);

        match sdk {
            SdkVersion::V1 => {
                let running = localstack
                    .into_v1()
                    .expect("v1 container")
                    .start()
                    .await
                    .expect("start localstack");
                running
                    .service_client::<rusoto_sqs::SqsClient>(Service::Sqs)
                    .await
                    .expect("sqs client");
            }
            SdkVersion::V2 => {
                let running = localstack
                    .into_v2()
                    .expect("v2 container")
                    .start()
                    .await
                    .expect("start localstack");
                running
                    .service_client::<aws_sdk_sqs::Client>(Service::Sqs)
                    .await
                    .expect("sqs client");
            }
        }
    }
}
