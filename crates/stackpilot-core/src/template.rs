//! Inline template for the bootstrap bucket stack.
//!
//! Every later stack is created from a template file hosted in S3, but no
//! bucket exists yet to host one — so the first stack's template is passed
//! to CloudFormation as a request body rendered from this string.

/// Render the bootstrap bucket template for the given bucket name.
///
/// The bucket policy lets CloudFormation read the templates staged into the
/// bucket when creating the downstream stacks.
pub fn bootstrap_template(bucket_name: &str) -> String {
    format!(
        r#"---
Resources:
  BootstrapBucket:
    Type: AWS::S3::Bucket
    Properties:
      BucketName: {bucket_name}
      Tags:
        - Key: "ManagedBy"
          Value: "stackpilot"

  BootstrapBucketAccessPolicy:
    Type: AWS::S3::BucketPolicy
    Properties:
      Bucket:
        Ref: "BootstrapBucket"
      PolicyDocument:
        Statement:
          - Action: "*"
            Effect: "Allow"
            Resource:
              Fn::Join:
              - ""
              - - "arn:aws:s3:::"
                - Ref: "BootstrapBucket"
                - "/*"
            Principal:
              Service:
              - cloudformation.amazonaws.com
"#
    )
}
