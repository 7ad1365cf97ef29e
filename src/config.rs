// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "REPO_COORDINATOR";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub tools: ToolsConfig,
    pub toolchain: ToolchainConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Shared working area every repository is cloned into.
    pub work_root: PathBuf,
    pub host_path: PathBuf,
    /// Directory holding the catalog, the results file and the log file.
    pub data_dir: PathBuf,
    pub catalog_file: String,
    pub result_file: String,
    pub log_file: String,
    pub analysis_tool: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    pub git: String,
    pub conan: String,
    pub conan_profile: String,
    pub cmake: String,
    pub cmake_generator: String,
    pub build_type: String,
    pub extract_bc: String,
    pub llvm_link: String,
    pub llvm_ar: String,
    pub llvm_dis: String,
}

/// Compiler selection handed to the configure and build invocations only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolchainConfig {
    pub llvm_compiler: String,
    pub cc: String,
    pub cxx: String,
}

impl ToolchainConfig {
    pub fn environment(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("LLVM_COMPILER".to_string(), self.llvm_compiler.clone()),
            ("CC".to_string(), self.cc.clone()),
            ("CXX".to_string(), self.cxx.clone()),
        ])
    }
}

impl PathsConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    pub fn result_path(&self) -> PathBuf {
        self.data_dir.join(&self.result_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            paths: PathsConfig {
                work_root: PathBuf::from("/home/coordinator/workspace"),
                host_path: PathBuf::from("/home/coordinator/host"),
                data_dir: PathBuf::from("./data"),
                catalog_file: "repositories.json".to_string(),
                result_file: "results.json".to_string(),
                log_file: "coordinator.log".to_string(),
                analysis_tool: PathBuf::from("./analyzer"),
            },
            tools: ToolsConfig {
                git: "git".to_string(),
                conan: "conan".to_string(),
                conan_profile: "clang".to_string(),
                cmake: "cmake".to_string(),
                cmake_generator: "Unix Makefiles".to_string(),
                build_type: "Release".to_string(),
                extract_bc: "extract-bc".to_string(),
                llvm_link: "llvm-link-8".to_string(),
                llvm_ar: "llvm-ar-8".to_string(),
                llvm_dis: "llvm-dis-8".to_string(),
            },
            toolchain: ToolchainConfig {
                llvm_compiler: "clang".to_string(),
                cc: "wllvm".to_string(),
                cxx: "wllvm++".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.paths.work_root.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "paths.work_root must not be empty".to_string(),
            ));
        }

        if self.paths.catalog_file.trim().is_empty() || self.paths.result_file.trim().is_empty()
        {
            return Err(PipelineError::Config(
                "paths.catalog_file and paths.result_file must not be empty".to_string(),
            ));
        }

        if self.paths.analysis_tool.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "paths.analysis_tool must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
