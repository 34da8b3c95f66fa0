//! Fixture tests with current SDK clients.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;
    use ruststack_testcontainers::{AwsSdk, AwsSdkLocalStack, RunningLocalStack, Service};

    use crate::{MESSAGE_BODY, OBJECT_CONTENT, OBJECT_KEY, init_tracing, unique_name};

    /// Image and tag come from `LOCALSTACK_*` so CI can pin another release.
    async fn start_localstack() -> RunningLocalStack<AwsSdk> {
        init_tracing();
        AwsSdkLocalStack::from_env()
            .expect("localstack config")
            .with_services([Service::S3, Service::Sqs])
            .start()
            .await
            .expect("start localstack")
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_store_objects_in_separate_buckets() {
        let localstack = start_localstack().await;
        let s3 = localstack
            .service_client::<aws_sdk_s3::Client>(Service::S3)
            .await
            .expect("s3 client");

        let buckets = [unique_name("foo"), unique_name("bar")];
        for bucket in &buckets {
            s3.create_bucket()
                .bucket(bucket)
                .send()
                .await
                .expect("create_bucket");
            s3.put_object()
                .bucket(bucket)
                .key(OBJECT_KEY)
                .body(ByteStream::from_static(OBJECT_CONTENT.as_bytes()))
                .send()
                .await
                .expect("put_object");
        }

        let resp = s3.list_buckets().send().await.expect("list_buckets");
        let names: Vec<&str> = resp.buckets().iter().filter_map(|b| b.name()).collect();

        for bucket in &buckets {
            assert!(names.contains(&bucket.as_str()), "should contain {bucket}");

            let objects = s3
                .list_objects_v2()
                .bucket(bucket)
                .send()
                .await
                .expect("list_objects_v2");
            assert_eq!(objects.contents().len(), 1);

            let object = s3
                .get_object()
                .bucket(bucket)
                .key(OBJECT_KEY)
                .send()
                .await
                .expect("get_object");
            let body = object.body.collect().await.expect("read body").into_bytes();
            assert_eq!(body.as_ref(), OBJECT_CONTENT.as_bytes());
        }
    }

    /// Recent `aws-sdk-sqs` releases use the SQS JSON protocol, which the
    /// default `0.9.6` image may not serve. Run with `LOCALSTACK_VERSION` set
    /// to a release that does.
    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_send_and_receive_message() {
        let localstack = start_localstack().await;
        let sqs = localstack
            .service_client::<aws_sdk_sqs::Client>(Service::Sqs)
            .await
            .expect("sqs client");

        let queue = sqs
            .create_queue()
            .queue_name(unique_name("baz"))
            .send()
            .await
            .expect("create_queue");
        let queue_url = queue.queue_url().expect("queue url");

        sqs.send_message()
            .queue_url(queue_url)
            .message_body(MESSAGE_BODY)
            .send()
            .await
            .expect("send_message");

        let received = sqs
            .receive_message()
            .queue_url(queue_url)
            .wait_time_seconds(1)
            .send()
            .await
            .expect("receive_message");

        let messages = received.messages();
        assert!(!messages.is_empty(), "should receive at least one message");
        assert_eq!(messages[0].body(), Some(MESSAGE_BODY));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_publish_distinct_ports_per_service() {
        let localstack = start_localstack().await;

        let s3 = localstack.endpoint_uri(Service::S3).await.expect("s3 endpoint");
        let sqs = localstack.endpoint_uri(Service::Sqs).await.expect("sqs endpoint");

        assert_eq!(s3.host(), sqs.host());
        assert_ne!(s3.port_u16(), sqs.port_u16());

        let config = localstack.sdk_config(Service::Sqs).await.expect("sdk config");
        assert_eq!(config.region().map(ToString::to_string).as_deref(), Some("us-west-1"));
    }
}
