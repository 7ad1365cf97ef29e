// file: src/process/testing.rs
// description: scripted command runner for exercising the pipeline without real tools

use super::command::ToolCommand;
use super::shim::{CommandRunner, OutputStream, route_line};
use crate::pipeline::context::RunContext;

/// Output a scripted command produces.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl Scripted {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn exit(code: i32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn stdout(mut self, line: &str) -> Self {
        self.stdout.push(line.to_string());
        self
    }

    pub fn stderr(mut self, line: &str) -> Self {
        self.stderr.push(line.to_string());
        self
    }
}

type Script = Box<dyn FnMut(&ToolCommand) -> Scripted>;

/// Records every command and answers with the script, routing output through
/// the same classification as the process shim.
pub struct ScriptedRunner {
    pub calls: Vec<ToolCommand>,
    script: Script,
}

impl ScriptedRunner {
    pub fn new(script: impl FnMut(&ToolCommand) -> Scripted + 'static) -> Self {
        Self {
            calls: Vec::new(),
            script: Box::new(script),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(|_| Scripted::ok())
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.program_name()).collect()
    }

    pub fn calls_to(&self, program: &str) -> Vec<&ToolCommand> {
        self.calls
            .iter()
            .filter(|c| c.program_name() == program)
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&mut self, command: &ToolCommand, ctx: &mut RunContext) -> i32 {
        self.calls.push(command.clone());
        let scripted = (self.script)(command);
        for line in scripted.stdout {
            route_line(command, OutputStream::Stdout, line, ctx);
        }
        for line in scripted.stderr {
            route_line(command, OutputStream::Stderr, line, ctx);
        }
        scripted.code
    }
}
