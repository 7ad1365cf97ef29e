// file: src/process/shim.rs
// description: runs external tools and classifies their output lines
// reference: https://docs.rs/tokio/latest/tokio/process

use super::command::ToolCommand;
use crate::pipeline::context::RunContext;
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error};

/// Status reported when the child could not be spawned, awaited or exited on a signal.
pub const FAILURE_STATUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Executes one command to completion and returns its exit status (0 = success).
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, command: &ToolCommand, ctx: &mut RunContext) -> i32;
}

/// Echoes a line and files it into the run context.
pub fn route_line(command: &ToolCommand, stream: OutputStream, line: String, ctx: &mut RunContext) {
    match stream {
        OutputStream::Stderr if !command.merge_stderr => {
            eprintln!("{}", line);
            ctx.record_error(line);
        }
        _ => {
            println!("{}", line);
            ctx.observe_output(&line);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessShim;

impl ProcessShim {
    pub fn new() -> Self {
        Self
    }

    async fn execute(&self, command: &ToolCommand, ctx: &mut RunContext) -> io::Result<i32> {
        let mut process = Command::new(&command.program);
        process
            .args(&command.args)
            .envs(&command.env)
            .stdin(if command.confirm_prompts {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }

        let mut child = process.spawn()?;
        let confirmer = child.stdin.take().map(|stdin| tokio::spawn(answer_yes(stdin)));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(forward_lines(
                stdout,
                OutputStream::Stdout,
                tx.clone(),
            )));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(forward_lines(
                stderr,
                OutputStream::Stderr,
                tx.clone(),
            )));
        }
        drop(tx);

        while let Some((stream, line)) = rx.recv().await {
            route_line(command, stream, line, ctx);
        }

        let status = child.wait().await;
        if let Some(confirmer) = confirmer {
            confirmer.abort();
        }
        for reader in readers {
            reader.await.map_err(io::Error::other)??;
        }

        Ok(status?.code().unwrap_or(FAILURE_STATUS))
    }
}

impl CommandRunner for ProcessShim {
    async fn run(&mut self, command: &ToolCommand, ctx: &mut RunContext) -> i32 {
        debug!("Running: {}", command);
        match self.execute(command, ctx).await {
            Ok(code) => {
                debug!("{} exited with status {}", command.program_name(), code);
                code
            }
            Err(e) => {
                error!("Internal process error for {}: {}", command.program_name(), e);
                ctx.record_error(format!("Internal process error: {}", e));
                FAILURE_STATUS
            }
        }
    }
}

async fn forward_lines<R>(
    reader: R,
    stream: OutputStream,
    tx: UnboundedSender<(OutputStream, String)>,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(|c: char| c == '\n' || c == '\r')
            .to_string();
        if tx.send((stream, line)).is_err() {
            return Ok(());
        }
    }
}

async fn answer_yes(mut stdin: ChildStdin) {
    let answers = "y\n".repeat(256);
    while stdin.write_all(answers.as_bytes()).await.is_ok() {}
}
