// file: src/pipeline/extraction.rs
// description: bitcode extraction and IR disassembly for discovered build artifacts

use super::commands::CommandFactory;
use super::context::RunContext;
use crate::models::{Artifact, ArtifactKind, IrFile};
use crate::process::CommandRunner;
use crate::repository::{ArtifactInventory, Workspace};
use tracing::{error, info};

pub const EXTRACT_FAILED: &str = "FAILED: EXTRACT LLVM BITCODE";
pub const DISASSEMBLE_FAILED: &str = "FAILED: LLVM IR DISASSEMBLE";

pub struct BitcodeExtractor<'a, R> {
    runner: &'a mut R,
    commands: &'a CommandFactory<'a>,
    workspace: &'a Workspace,
}

impl<'a, R: CommandRunner> BitcodeExtractor<'a, R> {
    pub fn new(
        runner: &'a mut R,
        commands: &'a CommandFactory<'a>,
        workspace: &'a Workspace,
    ) -> Self {
        Self {
            runner,
            commands,
            workspace,
        }
    }

    /// Extracts and disassembles every artifact, returning the IR files that were produced.
    pub async fn extract_all(
        &mut self,
        inventory: &ArtifactInventory,
        ctx: &mut RunContext,
    ) -> Vec<IrFile> {
        let mut ir_files = Vec::new();

        for artifact in inventory.iter() {
            if !self.extract(artifact, ctx).await {
                continue;
            }
            if let Some(ir) = self.disassemble(artifact, ctx).await {
                ir_files.push(ir);
            }
        }

        info!("Generated {} LLVM IR files", ir_files.len());
        for ir in &ir_files {
            info!("  {}", ir.relative_path.display());
        }
        ir_files
    }

    async fn extract(&mut self, artifact: &Artifact, ctx: &mut RunContext) -> bool {
        match artifact.kind {
            ArtifactKind::Archive => info!(
                "EXTRACTING LLVM BITCODE MODULE FROM {}: {}",
                artifact.kind,
                artifact.file_name()
            ),
            ArtifactKind::Executable | ArtifactKind::Library => info!(
                "EXTRACTING LLVM BITCODE FROM {}: {}",
                artifact.kind,
                artifact.file_name()
            ),
        }

        let command = self.commands.extract_bitcode(artifact);
        if self.runner.run(&command, ctx).await == 0 {
            info!("Writing output to: {}", artifact.bitcode_file_name());
            true
        } else {
            error!("{} for {}", EXTRACT_FAILED, artifact.path.display());
            ctx.record_error(EXTRACT_FAILED);
            false
        }
    }

    async fn disassemble(&mut self, artifact: &Artifact, ctx: &mut RunContext) -> Option<IrFile> {
        info!("DISASSEMBLING {} INTO LLVM IR", artifact.bitcode_file_name());

        let command = self.commands.disassemble(artifact);
        if self.runner.run(&command, ctx).await != 0 {
            error!("{} for {}", DISASSEMBLE_FAILED, artifact.path.display());
            ctx.record_error(DISASSEMBLE_FAILED);
            return None;
        }

        let path = artifact.ir_path();
        let relative_path = self.workspace.relative(&path).to_path_buf();
        info!("Writing output to: {}", relative_path.display());
        Some(IrFile {
            path,
            relative_path,
        })
    }
}
