use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// stackpilot.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackpilotConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub stacks: StackConfig,
    #[serde(default)]
    pub buckets: BucketConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// AWS region (defaults to the CLI's configured region when unset)
    pub region: Option<String>,
}

/// CloudFormation stack names, in creation order: bootstrap storage,
/// build storage, then the function + gateway stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default = "default_bootstrap_stack")]
    pub bootstrap_storage: String,
    #[serde(default = "default_build_stack")]
    pub build_storage: String,
    #[serde(default = "default_function_stack")]
    pub function: String,
}

/// S3 bucket names. These are also encoded as literals inside the staged
/// templates, so overriding one here requires editing the matching template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketConfig {
    #[serde(default = "default_bootstrap_bucket")]
    pub bootstrap: String,
    #[serde(default = "default_build_bucket")]
    pub build: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding the template files, relative to the project dir
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
    /// Template creating the build bucket (staged into the bootstrap bucket)
    #[serde(default = "default_bucket_template")]
    pub bucket_template: String,
    /// Template creating the function + gateway (staged into the build bucket)
    #[serde(default = "default_function_template")]
    pub function_template: String,
    /// Zipped function source (staged into the build bucket)
    #[serde(default = "default_code_archive")]
    pub code_archive: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between status polls
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    /// Poll budget for the storage stacks
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Poll budget for the function stack, which provisions materially
    /// slower resources than a bucket
    #[serde(default = "default_function_max_attempts")]
    pub function_max_attempts: u32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            bootstrap_storage: default_bootstrap_stack(),
            build_storage: default_build_stack(),
            function: default_function_stack(),
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            bootstrap: default_bootstrap_bucket(),
            build: default_build_bucket(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            bucket_template: default_bucket_template(),
            function_template: default_function_template(),
            code_archive: default_code_archive(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            max_attempts: default_max_attempts(),
            function_max_attempts: default_function_max_attempts(),
        }
    }
}

impl StackpilotConfig {
    /// Load from stackpilot.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join("stackpilot.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

impl ArtifactConfig {
    pub fn bucket_template_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.template_dir).join(&self.bucket_template)
    }

    pub fn function_template_path(&self, project_dir: &Path) -> PathBuf {
        project_dir
            .join(&self.template_dir)
            .join(&self.function_template)
    }

    pub fn code_archive_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.code_archive)
    }
}

fn default_bootstrap_stack() -> String {
    "BootstrapS3Bucket".to_owned()
}

fn default_build_stack() -> String {
    "LambdaS3Bucket".to_owned()
}

fn default_function_stack() -> String {
    "LambdaFunction".to_owned()
}

fn default_bootstrap_bucket() -> String {
    "stackpilot-bootstrap-01234".to_owned()
}

fn default_build_bucket() -> String {
    "stackpilot-functions-01234".to_owned()
}

fn default_template_dir() -> String {
    "templates".to_owned()
}

fn default_bucket_template() -> String {
    "bucket-stack.yaml".to_owned()
}

fn default_function_template() -> String {
    "function-stack.yaml".to_owned()
}

fn default_code_archive() -> String {
    "function.zip".to_owned()
}

fn default_delay_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    12
}

fn default_function_max_attempts() -> u32 {
    24
}
