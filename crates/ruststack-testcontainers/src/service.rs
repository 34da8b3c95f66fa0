//! Catalog of the AWS services LocalStack can emulate.
//!
//! Every [`Service`] carries the name LocalStack uses for it in the
//! `SERVICES` environment variable and the fixed port the emulator listens on
//! inside the container.

use std::fmt;
use std::str::FromStr;

use crate::error::{LocalStackError, LocalStackResult};

/// An AWS service emulated by LocalStack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    /// Amazon API Gateway.
    ApiGateway,
    /// Amazon Kinesis Data Streams.
    Kinesis,
    /// Amazon DynamoDB.
    DynamoDb,
    /// Amazon DynamoDB Streams.
    DynamoDbStreams,
    /// Amazon S3.
    S3,
    /// Amazon Kinesis Data Firehose.
    Firehose,
    /// AWS Lambda.
    Lambda,
    /// Amazon SNS.
    Sns,
    /// Amazon SQS.
    Sqs,
    /// Amazon Redshift.
    Redshift,
    /// Amazon SES.
    Ses,
    /// Amazon Route 53.
    Route53,
    /// AWS CloudFormation.
    CloudFormation,
    /// Amazon CloudWatch metrics.
    CloudWatch,
    /// AWS Systems Manager Parameter Store.
    Ssm,
    /// AWS Secrets Manager.
    SecretsManager,
    /// AWS Step Functions.
    StepFunctions,
    /// Amazon CloudWatch Logs.
    CloudWatchLogs,
    /// AWS STS.
    Sts,
    /// AWS IAM.
    Iam,
}

impl Service {
    /// Every service in catalog order.
    pub const ALL: [Self; 20] = [
        Self::ApiGateway,
        Self::Kinesis,
        Self::DynamoDb,
        Self::DynamoDbStreams,
        Self::S3,
        Self::Firehose,
        Self::Lambda,
        Self::Sns,
        Self::Sqs,
        Self::Redshift,
        Self::Ses,
        Self::Route53,
        Self::CloudFormation,
        Self::CloudWatch,
        Self::Ssm,
        Self::SecretsManager,
        Self::StepFunctions,
        Self::CloudWatchLogs,
        Self::Sts,
        Self::Iam,
    ];

    /// The name LocalStack uses for this service (e.g. `"s3"`, `"sqs"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ApiGateway => "apigateway",
            Self::Kinesis => "kinesis",
            Self::DynamoDb => "dynamodb",
            Self::DynamoDbStreams => "dynamodbstreams",
            Self::S3 => "s3",
            Self::Firehose => "firehose",
            Self::Lambda => "lambda",
            Self::Sns => "sns",
            Self::Sqs => "sqs",
            Self::Redshift => "redshift",
            Self::Ses => "ses",
            Self::Route53 => "route53",
            Self::CloudFormation => "cloudformation",
            Self::CloudWatch => "cloudwatch",
            Self::Ssm => "ssm",
            Self::SecretsManager => "secretsmanager",
            Self::StepFunctions => "stepfunctions",
            Self::CloudWatchLogs => "cloudwatchlogs",
            Self::Sts => "sts",
            Self::Iam => "iam",
        }
    }

    /// The port the service listens on inside the container.
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::ApiGateway => 4567,
            Self::Kinesis => 4568,
            Self::DynamoDb => 4569,
            Self::DynamoDbStreams => 4570,
            Self::S3 => 4572,
            Self::Firehose => 4573,
            Self::Lambda => 4574,
            Self::Sns => 4575,
            Self::Sqs => 4576,
            Self::Redshift => 4577,
            Self::Ses => 4579,
            Self::Route53 => 4580,
            Self::CloudFormation => 4581,
            Self::CloudWatch => 4582,
            Self::Ssm => 4583,
            Self::SecretsManager => 4584,
            Self::StepFunctions => 4585,
            Self::CloudWatchLogs => 4586,
            Self::Sts => 4592,
            Self::Iam => 4593,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = LocalStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|service| service.name() == name)
            .ok_or_else(|| LocalStackError::UnknownService(s.trim().to_owned()))
    }
}

/// Parse a comma-separated services string (the LocalStack `SERVICES` format).
///
/// Blank entries are skipped, so an empty or whitespace-only input yields an
/// empty list.
pub fn parse_services(raw: &str) -> LocalStackResult<Vec<Service>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}
