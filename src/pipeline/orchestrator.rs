// file: src/pipeline/orchestrator.rs
// description: coordinates clone, compile, extraction, analysis, cleanup and persistence
// reference: orchestrates the per-repository build workflow

use super::commands::CommandFactory;
use super::context::RunContext;
use super::extraction::BitcodeExtractor;
use super::report::{AnalysisOutcome, RunReport};
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::models::{ArtifactKind, BuildStatus, IrFile, RepositoryDescriptor};
use crate::process::{CommandRunner, ProcessShim, ToolCommand};
use crate::repository::{ArtifactScanner, Workspace};
use crate::utils::telemetry::{StageTimer, StageTiming};
use crate::utils::validation::Validator;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

pub const CLONE_FAILED: &str = "Failed to clone the repository!";
pub const SUBMODULES_FAILED: &str = "Failed to clone the repository submodules!";
pub const INSTALL_FAILED: &str = "FAILED: CONAN INSTALL";
pub const FOLDERS_FAILED: &str = "FAILED: FOLDER PREPARATION";
pub const CONFIGURE_FAILED: &str = "FAILED: CMAKE PREPARATION";
pub const BUILD_FAILED: &str = "FAILED: CMAKE BUILD";
pub const CLEANUP_FAILED: &str = "FAILED: CLEANUP";

pub fn reset_failed(commit: &str) -> String {
    format!(
        "Failed to reset the current working tree to commit id: {}",
        commit
    )
}

pub struct PipelineOrchestrator<R = ProcessShim> {
    config: Config,
    catalog: CatalogStore,
    runner: R,
}

impl PipelineOrchestrator<ProcessShim> {
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, ProcessShim::new())
    }
}

impl<R: CommandRunner> PipelineOrchestrator<R> {
    pub fn with_runner(config: Config, runner: R) -> Self {
        let catalog = CatalogStore::new(config.paths.catalog_path(), config.paths.result_path());
        Self {
            config,
            catalog,
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Processes the repository at `index` start to finish and persists its descriptor.
    ///
    /// Only an unusable index or descriptor, or a failure to write the result, is an
    /// `Err`; stage failures end up in the persisted error messages.
    pub async fn run(&mut self, index: usize) -> Result<RunReport> {
        let mut descriptor = self.catalog.load(index).await?;
        Validator::validate_repository_name(&descriptor.name)?;

        info!("-----------------------------------");
        info!(
            "Running container pipeline at index: {} for repository with id/owner/name: {}/{}/{}",
            index, descriptor.id, descriptor.owner, descriptor.name
        );

        let workspace = Workspace::new(&self.config.paths.work_root, &descriptor.name);
        let mut ctx = RunContext::new();
        let mut stages = Stages {
            runner: &mut self.runner,
            commands: CommandFactory::new(&self.config, &workspace),
            workspace: &workspace,
            timings: Vec::new(),
        };

        stages.clone_repository(&descriptor, &mut ctx).await;
        stages.compile(&mut descriptor, &mut ctx).await;

        let (ir_files, analyses) = if ctx.build_succeeded() {
            let ir_files = stages.extract(&mut descriptor, &mut ctx).await;
            let analyses = stages.analyze(&ir_files, &mut ctx).await;
            (ir_files, analyses)
        } else {
            warn!(
                "Build status is {}, skipping LLVM IR extraction and analysis",
                ctx.build_status()
            );
            (Vec::new(), Vec::new())
        };

        let cleanup_succeeded = stages.cleanup(&mut ctx).await;
        let timings = stages.timings;

        let (dependencies, errors) = ctx.into_parts();
        descriptor.package_dependencies = dependencies;
        descriptor.error_messages = errors;
        self.catalog.store(index, &descriptor).await?;

        Ok(RunReport {
            index,
            descriptor,
            ir_files: ir_files.into_iter().map(|ir| ir.relative_path).collect(),
            analyses,
            cleanup_succeeded,
            timings,
        })
    }
}

struct Stages<'a, R> {
    runner: &'a mut R,
    commands: CommandFactory<'a>,
    workspace: &'a Workspace,
    timings: Vec<StageTiming>,
}

impl<R: CommandRunner> Stages<'_, R> {
    async fn run_step(&mut self, command: ToolCommand, ctx: &mut RunContext) -> bool {
        self.runner.run(&command, ctx).await == 0
    }

    /// Every sub-step runs even when an earlier one failed.
    async fn clone_repository(&mut self, descriptor: &RepositoryDescriptor, ctx: &mut RunContext) {
        let timer = StageTimer::start("Cloning");
        let command = self.commands.git_clone(descriptor);
        let cloned = self.run_step(command, ctx).await;
        record_outcome(ctx, cloned, "CLONING", CLONE_FAILED);
        self.timings.push(timer.finish());
        info!("Repository size: {}", descriptor.size);

        let timer = StageTimer::start("Cloning submodules");
        let command = self.commands.submodule_update();
        let updated = self.run_step(command, ctx).await;
        record_outcome(ctx, updated, "CLONING SUBMODULES", SUBMODULES_FAILED);
        self.timings.push(timer.finish());

        let timer = StageTimer::start("Resetting working tree");
        let command = self.commands.reset_hard(&descriptor.latest_commit_id);
        let reset = self.run_step(command, ctx).await;
        record_outcome(
            ctx,
            reset,
            "RESET WORKING TREE",
            &reset_failed(&descriptor.latest_commit_id),
        );
        if reset {
            info!(
                "Reset current working tree to commit id: {}",
                descriptor.latest_commit_id
            );
        }
        self.timings.push(timer.finish());
    }

    /// Install, folder preparation, configure and build; the first failure ends the stage.
    async fn compile(&mut self, descriptor: &mut RepositoryDescriptor, ctx: &mut RunContext) {
        let succeeded = self.install_dependencies(ctx).await
            && self.prepare_folders(ctx).await
            && self.configure(ctx).await
            && self.build(ctx).await;

        if succeeded {
            descriptor.build_status = BuildStatus::Success;
            ctx.mark_build_succeeded();
        } else {
            descriptor.build_status = BuildStatus::Failed;
        }
    }

    async fn install_dependencies(&mut self, ctx: &mut RunContext) -> bool {
        info!("RUNNING: CONAN INSTALL");
        let timer = StageTimer::start("Installing dependencies");

        let installed = match recreate_dir(&self.workspace.build_dir()).await {
            Ok(()) => {
                let command = self.commands.conan_install();
                self.run_step(command, ctx).await
            }
            Err(e) => {
                ctx.record_error(e.to_string());
                false
            }
        };

        record_outcome(ctx, installed, "CONAN INSTALL", INSTALL_FAILED);
        self.timings.push(timer.finish());
        installed
    }

    async fn prepare_folders(&mut self, ctx: &mut RunContext) -> bool {
        info!("RUNNING: FOLDER PREPARATION");
        let timer = StageTimer::start("Build folder preparation");

        let mut prepared = true;
        for kind in ArtifactKind::ALL {
            let dir = self.workspace.dest_dir(kind);
            if let Err(source) = fs::create_dir_all(&dir).await {
                ctx.record_error(PipelineError::FileOperation { path: dir, source }.to_string());
                prepared = false;
                break;
            }
        }

        record_outcome(ctx, prepared, "FOLDER PREPARATION", FOLDERS_FAILED);
        self.timings.push(timer.finish());
        prepared
    }

    async fn configure(&mut self, ctx: &mut RunContext) -> bool {
        info!("RUNNING: CMAKE PREPARATION");
        let timer = StageTimer::start("CMake preparation");
        let command = self.commands.cmake_configure();
        let configured = self.run_step(command, ctx).await;
        record_outcome(ctx, configured, "CMAKE PREPARATION", CONFIGURE_FAILED);
        self.timings.push(timer.finish());
        configured
    }

    async fn build(&mut self, ctx: &mut RunContext) -> bool {
        info!("RUNNING: CMAKE BUILD");
        let timer = StageTimer::start("CMake build");
        let command = self.commands.cmake_build();
        let built = self.run_step(command, ctx).await;
        record_outcome(ctx, built, "CMAKE BUILD", BUILD_FAILED);
        self.timings.push(timer.finish());
        built
    }

    async fn extract(
        &mut self,
        descriptor: &mut RepositoryDescriptor,
        ctx: &mut RunContext,
    ) -> Vec<IrFile> {
        let timer =
            StageTimer::start("Extracting and disassembling all build targets into LLVM IR");

        // Targets that hard-code their output paths in CMakeLists.txt bypass buildDest and
        // show up here as a successful build without artifacts.
        info!("GATHERING BUILD TARGETS");
        let inventory = ArtifactScanner::scan(self.workspace);
        descriptor.set_artifact_counts(inventory.counts());
        if inventory.is_empty() {
            warn!("Build succeeded but no build targets were found in buildDest");
        }

        let ir_files = BitcodeExtractor::new(&mut *self.runner, &self.commands, self.workspace)
            .extract_all(&inventory, ctx)
            .await;

        self.timings.push(timer.finish());
        ir_files
    }

    /// Failures are logged per file and never touch the descriptor.
    async fn analyze(&mut self, ir_files: &[IrFile], ctx: &mut RunContext) -> Vec<AnalysisOutcome> {
        let timer = StageTimer::start("Analysis of all LLVM IR files");
        info!("RUNNING ANALYSIS");

        let mut outcomes = Vec::with_capacity(ir_files.len());
        for ir in ir_files {
            let command = self.commands.analyze(ir);
            let succeeded = self.run_step(command, ctx).await;
            if succeeded {
                info!("ANALYSIS SUCCESS FOR: {}", ir.path.display());
            } else {
                error!("ANALYSIS FAILED FOR: {}", ir.path.display());
            }
            outcomes.push(AnalysisOutcome {
                ir_file: ir.relative_path.clone(),
                succeeded,
            });
        }

        self.timings.push(timer.finish());
        outcomes
    }

    async fn cleanup(&mut self, ctx: &mut RunContext) -> bool {
        let timer = StageTimer::start("Cleanup");
        let checkout = self.workspace.checkout();

        let removed = match remove_dir_if_present(checkout).await {
            Ok(()) => true,
            Err(e) => {
                ctx.record_error(e.to_string());
                false
            }
        };

        record_outcome(ctx, removed, "CLEANUP", CLEANUP_FAILED);
        self.timings.push(timer.finish());
        removed
    }
}

fn record_outcome(ctx: &mut RunContext, succeeded: bool, stage: &str, failure: &str) {
    if succeeded {
        info!("FINISHED: {}", stage);
    } else {
        error!("FAILED: {}", stage);
        ctx.record_error(failure);
    }
}

async fn remove_dir_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Fresh, empty directory; the parent must already exist.
async fn recreate_dir(path: &Path) -> Result<()> {
    remove_dir_if_present(path).await?;
    fs::create_dir(path)
        .await
        .map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::{Scripted, ScriptedRunner};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        config: Config,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let work_root = temp.path().join("work");
            let data_dir = temp.path().join("data");
            std::fs::create_dir_all(&work_root).unwrap();
            std::fs::create_dir_all(&data_dir).unwrap();

            let catalog = json!([
                {"id": 1, "owner": "acme", "name": "alpha", "cloneUrl": "https://example/alpha.git", "latestCommitId": "111"},
                {"id": 2, "owner": "acme", "name": "beta", "cloneUrl": "https://example/beta.git", "latestCommitId": "222"},
                {"id": 3, "owner": "acme", "name": "foo", "cloneUrl": "https://example/foo.git", "latestCommitId": "abc123", "size": 512}
            ]);
            std::fs::write(data_dir.join("repositories.json"), catalog.to_string()).unwrap();

            let mut config = Config::default_config();
            config.paths.work_root = work_root;
            config.paths.data_dir = data_dir;
            Self {
                _temp: temp,
                config,
            }
        }

        fn work_root(&self) -> PathBuf {
            self.config.paths.work_root.clone()
        }

        fn persisted(&self, index: usize) -> Value {
            let contents = std::fs::read_to_string(self.config.paths.result_path()).unwrap();
            let entries: Vec<Value> = serde_json::from_str(&contents).unwrap();
            entries[index].clone()
        }

        fn orchestrator(&self, runner: ScriptedRunner) -> PipelineOrchestrator<ScriptedRunner> {
            PipelineOrchestrator::with_runner(self.config.clone(), runner)
        }
    }

    fn no_failures(_program: &str, _args: &[String]) -> Option<Scripted> {
        None
    }

    /// Simulates the external tools: clone creates the checkout and the build writes
    /// `outputs` (category dir, file name) into buildDest. `fail` may replace the
    /// answer for any call.
    fn toolchain(
        outputs: Vec<(&'static str, &'static str)>,
        fail: impl Fn(&str, &[String]) -> Option<Scripted> + 'static,
    ) -> ScriptedRunner {
        ScriptedRunner::new(move |command| {
            let program = command.program_name();
            let args = command.args_lossy();
            if let Some(failure) = fail(program.as_str(), &args[..]) {
                return failure;
            }

            let cwd = command.current_dir.clone().unwrap_or_default();
            match (program.as_str(), args[0].as_str()) {
                ("git", "clone") => {
                    std::fs::create_dir_all(cwd.join(&args[2])).unwrap();
                    Scripted::ok().stdout(&format!("Cloning into '{}'...", args[2]))
                }
                ("conan", _) => Scripted::ok().stdout("zlib/1.2.11: Downloaded recipe revision 0"),
                ("cmake", "--build") => {
                    let dest = cwd.parent().unwrap().join("buildDest");
                    for (dir, name) in &outputs {
                        std::fs::write(dest.join(dir).join(name), b"\x7fELF").unwrap();
                    }
                    Scripted::ok()
                }
                _ => Scripted::ok(),
            }
        })
    }

    #[tokio::test]
    async fn test_end_to_end_single_executable() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(toolchain(vec![("exe", "app")], no_failures));

        let report = orchestrator.run(2).await.unwrap();

        let descriptor = &report.descriptor;
        assert_eq!(descriptor.build_status, BuildStatus::Success);
        assert_eq!(
            (descriptor.executables, descriptor.libraries, descriptor.archives),
            (1, 0, 0)
        );
        assert_eq!(report.ir_files, vec![PathBuf::from("buildDest/exe/app.ll")]);
        assert!(descriptor.error_messages.is_empty());
        assert_eq!(descriptor.package_dependencies, vec!["zlib/1.2.11"]);
        assert!(report.cleanup_succeeded);
        assert!(!fixture.work_root().join("foo").exists());

        let work_root = fixture.work_root();
        let analyses = orchestrator.runner().calls_to("./analyzer");
        assert_eq!(analyses.len(), 1);
        assert_eq!(
            analyses[0].args_lossy(),
            vec![
                work_root.join("foo/buildDest/exe/app.ll").display().to_string(),
                work_root.display().to_string(),
            ]
        );

        let persisted = fixture.persisted(2);
        assert_eq!(persisted["buildStatus"], json!("SUCCESS"));
        assert_eq!(persisted["executables"], json!(1));
        assert_eq!(persisted["errorMessage"], json!([]));
        assert_eq!(persisted["packageDependencies"], json!(["zlib/1.2.11"]));
        assert_eq!(fixture.persisted(0)["name"], json!("alpha"));
    }

    #[tokio::test]
    async fn test_stage_order() {
        let fixture = Fixture::new();
        let mut orchestrator =
            fixture.orchestrator(toolchain(vec![("ar", "libfoo.a")], no_failures));

        orchestrator.run(2).await.unwrap();

        let steps: Vec<String> = orchestrator
            .runner()
            .calls
            .iter()
            .map(|c| format!("{} {}", c.program_name(), c.args_lossy()[0]))
            .collect();
        let ir_path = fixture.work_root().join("foo/buildDest/ar/libfoo.a.ll");
        let mut expected: Vec<String> = [
            "git clone",
            "git submodule",
            "git reset",
            "conan install",
            "cmake -G",
            "cmake --build",
            "extract-bc -b",
            "llvm-dis-8 libfoo.a.bc",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        expected.push(format!("./analyzer {}", ir_path.display()));
        assert_eq!(steps, expected);
    }

    #[tokio::test]
    async fn test_install_failure_skips_remaining_compile_steps() {
        let fixture = Fixture::new();
        let runner = toolchain(vec![("exe", "app")], |program, _| {
            (program == "conan").then(|| Scripted::exit(1))
        });
        let mut orchestrator = fixture.orchestrator(runner);

        let report = orchestrator.run(2).await.unwrap();

        let descriptor = &report.descriptor;
        assert_eq!(descriptor.build_status, BuildStatus::Failed);
        assert_eq!(descriptor.error_messages, vec![INSTALL_FAILED]);
        assert!(orchestrator.runner().calls_to("cmake").is_empty());
        assert!(orchestrator.runner().calls_to("extract-bc").is_empty());
        assert_eq!(
            (descriptor.executables, descriptor.libraries, descriptor.archives),
            (0, 0, 0)
        );
        assert_eq!(fixture.persisted(2)["buildStatus"], json!("FAILED"));
    }

    #[tokio::test]
    async fn test_configure_failure_skips_build() {
        let fixture = Fixture::new();
        let runner = toolchain(vec![("exe", "app")], |program, args| {
            (program == "cmake" && args[0] == "-G")
                .then(|| Scripted::exit(1).stderr("CMake Error: could not find CMakeLists.txt"))
        });
        let mut orchestrator = fixture.orchestrator(runner);

        let report = orchestrator.run(2).await.unwrap();

        assert_eq!(report.descriptor.build_status, BuildStatus::Failed);
        assert_eq!(
            report.descriptor.error_messages,
            vec!["CMake Error: could not find CMakeLists.txt", CONFIGURE_FAILED]
        );
        assert_eq!(orchestrator.runner().calls_to("cmake").len(), 1);
        assert!(report.ir_files.is_empty());
    }

    #[tokio::test]
    async fn test_clone_failure_does_not_stop_compile() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(ScriptedRunner::new(|command| {
            if command.program_name() == "git" {
                Scripted::exit(128)
            } else {
                Scripted::ok()
            }
        }));

        let report = orchestrator.run(2).await.unwrap();

        let errors = &report.descriptor.error_messages;
        assert_eq!(orchestrator.runner().calls_to("git").len(), 3);
        assert_eq!(errors[0], CLONE_FAILED);
        assert_eq!(errors[1], SUBMODULES_FAILED);
        assert_eq!(errors[2], reset_failed("abc123"));
        assert!(errors.iter().any(|e| e == INSTALL_FAILED));
        assert_eq!(report.descriptor.build_status, BuildStatus::Failed);
        assert!(report.cleanup_succeeded);
        assert_eq!(fixture.persisted(2)["buildStatus"], json!("FAILED"));
    }

    #[tokio::test]
    async fn test_cleanup_after_every_stage_failed() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(ScriptedRunner::new(|command| {
            let args = command.args_lossy();
            if command.program_name() == "git" && args[0] == "clone" {
                let cwd = command.current_dir.clone().unwrap();
                std::fs::create_dir_all(cwd.join(&args[2])).unwrap();
                Scripted::exit(1).stderr("fatal: early EOF")
            } else {
                Scripted::exit(1)
            }
        }));

        let report = orchestrator.run(2).await.unwrap();

        assert!(report.cleanup_succeeded);
        assert!(!fixture.work_root().join("foo").exists());
        assert_eq!(report.descriptor.build_status, BuildStatus::Failed);

        let persisted = fixture.persisted(2);
        assert_eq!(persisted["buildStatus"], json!("FAILED"));
        assert_eq!(
            persisted["errorMessage"].as_array().unwrap().len(),
            report.descriptor.error_messages.len()
        );
    }

    #[tokio::test]
    async fn test_failed_cleanup_is_recorded_and_persisted() {
        let fixture = Fixture::new();
        let checkout = fixture.work_root().join("foo");
        std::fs::write(&checkout, b"not a directory").unwrap();
        let mut orchestrator = fixture.orchestrator(ScriptedRunner::succeeding());

        let report = orchestrator.run(2).await.unwrap();

        assert!(!report.cleanup_succeeded);
        let errors = &report.descriptor.error_messages;
        let [.., path_error, last] = errors.as_slice() else {
            panic!("expected cleanup errors, got {:?}", errors);
        };
        assert!(
            path_error.starts_with(&format!("File operation failed for {}", checkout.display())),
            "{}",
            path_error
        );
        assert_eq!(last, CLEANUP_FAILED);

        let persisted = fixture.persisted(2);
        let persisted_errors: Vec<&str> = persisted["errorMessage"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.as_str().unwrap())
            .collect();
        assert_eq!(persisted_errors.last(), Some(&CLEANUP_FAILED));
        assert_eq!(persisted_errors.len(), errors.len());
    }

    #[tokio::test]
    async fn test_successful_build_without_artifacts() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(toolchain(vec![], no_failures));

        let report = orchestrator.run(2).await.unwrap();

        let descriptor = &report.descriptor;
        assert_eq!(descriptor.build_status, BuildStatus::Success);
        assert_eq!(
            (descriptor.executables, descriptor.libraries, descriptor.archives),
            (0, 0, 0)
        );
        assert!(report.ir_files.is_empty());
        assert!(report.analyses.is_empty());
        assert!(descriptor.error_messages.is_empty());
        assert!(orchestrator.runner().calls_to("./analyzer").is_empty());
    }

    #[tokio::test]
    async fn test_analysis_failure_leaves_descriptor_untouched() {
        let fixture = Fixture::new();
        let outputs = vec![("exe", "app"), ("lib", "libx.so")];
        let mut orchestrator = fixture.orchestrator(toolchain(outputs, |program, _| {
            (program == "./analyzer").then(|| Scripted::exit(1))
        }));

        let report = orchestrator.run(2).await.unwrap();

        assert_eq!(report.analyses.len(), 2);
        assert_eq!(report.failed_analyses(), 2);
        assert_eq!(report.descriptor.build_status, BuildStatus::Success);
        assert!(report.descriptor.error_messages.is_empty());
    }

    #[tokio::test]
    async fn test_toolchain_env_only_on_configure_and_build() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(toolchain(vec![("exe", "app")], no_failures));

        orchestrator.run(2).await.unwrap();

        for call in &orchestrator.runner().calls {
            if call.program_name() == "cmake" {
                assert_eq!(call.env.get("LLVM_COMPILER").map(String::as_str), Some("clang"));
                assert_eq!(call.env.get("CXX").map(String::as_str), Some("wllvm++"));
            } else {
                assert!(call.env.is_empty(), "{} carries toolchain env", call);
            }
        }
    }

    #[tokio::test]
    async fn test_out_of_range_index_has_no_side_effects() {
        let fixture = Fixture::new();
        let mut orchestrator = fixture.orchestrator(ScriptedRunner::succeeding());

        let err = orchestrator.run(3).await.unwrap_err();

        assert!(matches!(err, PipelineError::OutOfRange { index: 3, len: 3 }));
        assert!(orchestrator.runner().calls.is_empty());
        assert!(!fixture.config.paths.result_path().exists());
        assert_eq!(std::fs::read_dir(fixture.work_root()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unsafe_repository_name_is_rejected() {
        let fixture = Fixture::new();
        let catalog = json!([
            {"name": "../outside", "cloneUrl": "https://example/x.git", "latestCommitId": "1"}
        ]);
        std::fs::write(fixture.config.paths.catalog_path(), catalog.to_string()).unwrap();
        let mut orchestrator = fixture.orchestrator(ScriptedRunner::succeeding());

        let err = orchestrator.run(0).await.unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
        assert!(orchestrator.runner().calls.is_empty());
    }
}
