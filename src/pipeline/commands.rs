// file: src/pipeline/commands.rs
// description: exact invocations of every external tool used by the pipeline

use crate::config::Config;
use crate::models::{Artifact, ArtifactKind, IrFile, RepositoryDescriptor};
use crate::process::ToolCommand;
use crate::repository::Workspace;
use std::ffi::OsString;

pub struct CommandFactory<'a> {
    config: &'a Config,
    workspace: &'a Workspace,
}

impl<'a> CommandFactory<'a> {
    pub fn new(config: &'a Config, workspace: &'a Workspace) -> Self {
        Self { config, workspace }
    }

    pub fn git_clone(&self, descriptor: &RepositoryDescriptor) -> ToolCommand {
        ToolCommand::new(&self.config.tools.git)
            .args(["clone", descriptor.clone_url.as_str(), descriptor.name.as_str()])
            .current_dir(self.workspace.root())
            .merge_stderr()
    }

    pub fn submodule_update(&self) -> ToolCommand {
        ToolCommand::new(&self.config.tools.git)
            .args(["submodule", "update", "--init", "--recursive"])
            .current_dir(self.workspace.checkout())
            .merge_stderr()
    }

    pub fn reset_hard(&self, commit: &str) -> ToolCommand {
        ToolCommand::new(&self.config.tools.git)
            .args(["reset", "--hard", commit])
            .current_dir(self.workspace.checkout())
    }

    pub fn conan_install(&self) -> ToolCommand {
        ToolCommand::new(&self.config.tools.conan)
            .args([
                "install".to_string(),
                "..".to_string(),
                format!("-pr={}", self.config.tools.conan_profile),
                "--build=missing".to_string(),
            ])
            .current_dir(self.workspace.build_dir())
            .confirm_prompts()
    }

    pub fn cmake_configure(&self) -> ToolCommand {
        let tools = &self.config.tools;
        let output_dir = |variable: &str, kind: ArtifactKind| {
            let mut arg = OsString::from(format!("-DCMAKE_{}_OUTPUT_DIRECTORY=", variable));
            arg.push(self.workspace.dest_dir(kind));
            arg
        };

        ToolCommand::new(&tools.cmake)
            .arg("-G")
            .arg(&tools.cmake_generator)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", tools.build_type))
            .arg(output_dir("RUNTIME", ArtifactKind::Executable))
            .arg(output_dir("LIBRARY", ArtifactKind::Library))
            .arg(output_dir("ARCHIVE", ArtifactKind::Archive))
            .arg("..")
            .current_dir(self.workspace.build_dir())
            .envs(self.config.toolchain.environment())
    }

    pub fn cmake_build(&self) -> ToolCommand {
        ToolCommand::new(&self.config.tools.cmake)
            .args(["--build", "."])
            .current_dir(self.workspace.build_dir())
            .envs(self.config.toolchain.environment())
    }

    pub fn extract_bitcode(&self, artifact: &Artifact) -> ToolCommand {
        let tools = &self.config.tools;
        let command = ToolCommand::new(&tools.extract_bc);
        let command = match artifact.kind {
            ArtifactKind::Executable | ArtifactKind::Library => {
                command.args(["--linker", tools.llvm_link.as_str()])
            }
            // extract-bc reports archive progress on stderr.
            ArtifactKind::Archive => command
                .args([
                    "-b",
                    "--archiver",
                    tools.llvm_ar.as_str(),
                    "--linker",
                    tools.llvm_link.as_str(),
                ])
                .merge_stderr(),
        };

        command
            .arg(artifact.file_name())
            .current_dir(self.workspace.dest_dir(artifact.kind))
    }

    pub fn disassemble(&self, artifact: &Artifact) -> ToolCommand {
        ToolCommand::new(&self.config.tools.llvm_dis)
            .arg(artifact.bitcode_file_name())
            .current_dir(self.workspace.dest_dir(artifact.kind))
    }

    /// Runs from the invoking directory so a relative tool path resolves as configured.
    pub fn analyze(&self, ir: &IrFile) -> ToolCommand {
        ToolCommand::new(&self.config.paths.analysis_tool)
            .arg(&ir.path)
            .arg(self.workspace.root())
    }
}
