//! Fixture tests with legacy SDK clients.

#[cfg(test)]
mod tests {
    use rusoto_s3::{
        CreateBucketRequest, GetObjectRequest, ListObjectsV2Request, PutObjectRequest, S3,
        S3Client,
    };
    use rusoto_sqs::{
        CreateQueueRequest, ReceiveMessageRequest, SendMessageRequest, Sqs, SqsClient,
    };
    use ruststack_testcontainers::{RunningLocalStack, Rusoto, RusotoLocalStack, Service};

    use crate::{
        MESSAGE_BODY, OBJECT_CONTENT, OBJECT_KEY, init_tracing, read_rusoto_body, unique_name,
    };

    async fn start_localstack() -> RunningLocalStack<Rusoto> {
        init_tracing();
        RusotoLocalStack::new()
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
            .service_client::<S3Client>(Service::S3)
            .await
            .expect("s3 client");

        let buckets = [unique_name("foo"), unique_name("bar")];
        for bucket in &buckets {
            s3.create_bucket(CreateBucketRequest {
                bucket: bucket.clone(),
                ..Default::default()
            })
            .await
            .expect("create_bucket");
            s3.put_object(PutObjectRequest {
                bucket: bucket.clone(),
                key: OBJECT_KEY.to_owned(),
                body: Some(OBJECT_CONTENT.as_bytes().to_vec().into()),
                ..Default::default()
            })
            .await
            .expect("put_object");
        }

        let resp = s3.list_buckets().await.expect("list_buckets");
        let names: Vec<String> = resp
            .buckets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|b| b.name)
            .collect();

        for bucket in &buckets {
            assert!(names.contains(bucket), "should contain {bucket}");

            let objects = s3
                .list_objects_v2(ListObjectsV2Request {
                    bucket: bucket.clone(),
                    ..Default::default()
                })
                .await
                .expect("list_objects_v2");
            assert_eq!(objects.contents.map_or(0, |c| c.len()), 1);

            let object = s3
                .get_object(GetObjectRequest {
                    bucket: bucket.clone(),
                    key: OBJECT_KEY.to_owned(),
                    ..Default::default()
                })
                .await
                .expect("get_object");
            let body = read_rusoto_body(object.body.expect("object body")).await;
            assert_eq!(body, OBJECT_CONTENT);
        }
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_send_and_receive_message() {
        let localstack = start_localstack().await;
        let sqs = localstack
            .service_client::<SqsClient>(Service::Sqs)
            .await
            .expect("sqs client");

        let queue_url = sqs
            .create_queue(CreateQueueRequest {
                queue_name: unique_name("baz"),
                ..Default::default()
            })
            .await
            .expect("create_queue")
            .queue_url
            .expect("queue url");

        sqs.send_message(SendMessageRequest {
            queue_url: queue_url.clone(),
            message_body: MESSAGE_BODY.to_owned(),
            ..Default::default()
        })
        .await
        .expect("send_message");

        let messages = sqs
            .receive_message(ReceiveMessageRequest {
                queue_url,
                wait_time_seconds: Some(1),
                ..Default::default()
            })
            .await
            .expect("receive_message")
            .messages
            .unwrap_or_default();

        assert!(!messages.is_empty(), "should receive at least one message");
        assert_eq!(messages[0].body.as_deref(), Some(MESSAGE_BODY));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_should_expose_endpoint_configuration() {
        let localstack = start_localstack().await;

        let config = localstack
            .endpoint_configuration(Service::S3)
            .await
            .expect("endpoint configuration");
        let uri = localstack.endpoint_uri(Service::S3).await.expect("s3 endpoint");

        assert_eq!(config.signing_region, "us-west-1");
        assert_eq!(config.service_endpoint, ruststack_testcontainers::base_url(&uri));
    }
}
