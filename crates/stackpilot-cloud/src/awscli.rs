#[derive(Debug, thiserror::Error)]
pub enum AwsCliError {
    #[error("aws CLI not found — install: https://aws.amazon.com/cli/")]
    NotFound { source: std::io::Error },

    #[error("aws command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("aws output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}

impl AwsCliError {
    /// The provider's error classification code, when the CLI reported one.
    ///
    /// Failed calls print a line of the form
    /// `An error occurred (AlreadyExistsException) when calling the
    /// CreateStack operation: ...`; the code between the parentheses is the
    /// stable classifier, the rest is free text.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => {
                let rest = stderr.split("An error occurred (").nth(1)?;
                rest.split(')').next()
            }
            _ => None,
        }
    }

    /// Stack name collision on create.
    pub fn is_already_exists(&self) -> bool {
        self.code() == Some("AlreadyExistsException")
    }

    /// `describe-stacks` against a stack that does not exist.
    pub fn is_missing_stack(&self) -> bool {
        match self {
            Self::CommandFailed { stderr, .. } => {
                self.code() == Some("ValidationError") && stderr.contains("does not exist")
            }
            _ => false,
        }
    }

    /// S3 call against a bucket that does not exist.
    pub fn is_missing_bucket(&self) -> bool {
        self.code() == Some("NoSuchBucket")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(stderr: &str) -> AwsCliError {
        AwsCliError::CommandFailed {
            args: vec![],
            stderr: stderr.to_owned(),
        }
    }

    #[test]
    fn code_extracted_from_error_line() {
        let err = failed(
            "An error occurred (AlreadyExistsException) when calling the \
             CreateStack operation: Stack [LambdaS3Bucket] already exists",
        );
        assert_eq!(err.code(), Some("AlreadyExistsException"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn code_absent_for_plain_stderr() {
        let err = failed("something went wrong");
        assert_eq!(err.code(), None);
        assert!(!err.is_already_exists());
    }

    #[test]
    fn missing_stack_requires_validation_error_code() {
        let err = failed(
            "An error occurred (ValidationError) when calling the \
             DescribeStacks operation: Stack with id Foo does not exist",
        );
        assert!(err.is_missing_stack());

        // Free-text match alone is not enough
        let err = failed("Stack with id Foo does not exist");
        assert!(!err.is_missing_stack());
    }

    #[test]
    fn missing_bucket_code() {
        let err = failed(
            "An error occurred (NoSuchBucket) when calling the \
             ListObjectsV2 operation: The specified bucket does not exist",
        );
        assert!(err.is_missing_bucket());
    }

    #[test]
    fn not_found_has_no_code() {
        let err = AwsCliError::NotFound {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no aws"),
        };
        assert_eq!(err.code(), None);
    }
}
