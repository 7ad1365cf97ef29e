// file: src/pipeline/report.rs
// description: outcome of a single pipeline run and its console summary

use crate::models::RepositoryDescriptor;
use crate::utils::logging::{format_error, format_info, format_success, format_warning};
use crate::utils::telemetry::StageTiming;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub ir_file: PathBuf,
    pub succeeded: bool,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub index: usize,
    /// The descriptor exactly as it was persisted.
    pub descriptor: RepositoryDescriptor,
    /// IR files relative to the checkout, in production order.
    pub ir_files: Vec<PathBuf>,
    pub analyses: Vec<AnalysisOutcome>,
    pub cleanup_succeeded: bool,
    pub timings: Vec<StageTiming>,
}

impl RunReport {
    pub fn failed_analyses(&self) -> usize {
        self.analyses.iter().filter(|a| !a.succeeded).count()
    }

    pub fn print_summary(&self) {
        let descriptor = &self.descriptor;
        println!("{}", "-".repeat(52));
        println!(
            "{}",
            format_info(&format!(
                "{}/{} at index {}: build {}",
                descriptor.owner, descriptor.name, self.index, descriptor.build_status
            ))
        );
        let counts = descriptor.artifact_counts();
        println!(
            "{}",
            format_info(&format!(
                "{} Executables, {} Libraries, {} Archives",
                counts.executables, counts.libraries, counts.archives
            ))
        );

        println!("ERROR MESSAGES");
        for message in &descriptor.error_messages {
            eprintln!("{}", format_error(message));
        }
        println!("{}", "-".repeat(52));

        println!("PACKAGE DEPENDENCIES");
        for dependency in &descriptor.package_dependencies {
            println!("{}", dependency);
        }
        println!("{}", "-".repeat(52));

        println!("LLVM IR FILES");
        for analysis in &self.analyses {
            let line = analysis.ir_file.display().to_string();
            if analysis.succeeded {
                println!("{}", format_success(&line));
            } else {
                println!("{}", format_warning(&format!("{} (analysis failed)", line)));
            }
        }
        println!("{}", "-".repeat(52));

        println!("STAGE TIMINGS");
        for timing in &self.timings {
            println!("{:<60} {:>8.2}s", timing.stage, timing.duration.as_secs_f64());
        }
        println!("{}", "-".repeat(52));
    }
}
