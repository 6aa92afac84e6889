//! Generator backed by an external program
//!
//! The program gets the prompt on stdin and must print Space records on stdout. The
//! system instruction, model and temperature are passed in the environment as
//! `SPACE_SYSTEM_INSTRUCTION`, `SPACE_MODEL` and `SPACE_TEMPERATURE`, so any wrapper
//! script around a model client can be plugged in.

use space_parser::space::generation::{GenerateError, GenerationRequest, Generator};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    program: String,
    args: Vec<String>,
}

impl ProcessGenerator {
    /// Build from `[program, args...]`. Returns `None` for an empty list.
    pub fn from_args(exec: &[String]) -> Option<Self> {
        let (program, args) = exec.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Generator for ProcessGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        debug!(program = %self.program, args = ?self.args, "spawning generator");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("SPACE_SYSTEM_INSTRUCTION", &request.system_instruction)
            .env("SPACE_MODEL", &request.model)
            .env("SPACE_TEMPERATURE", request.temperature.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenerateError::NotConfigured(format!("{}: {}", self.program, e)))?;

        // stdin is fed from its own thread while this one drains stdout and stderr
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = request.prompt.clone();
            thread::spawn(move || {
                // A program that exits without reading its input is not an error by itself
                if let Err(e) = stdin.write_all(prompt.as_bytes()) {
                    debug!(error = %e, "generator closed stdin early");
                }
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| GenerateError::Service(e.to_string()))?;

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| GenerateError::Service("prompt writer panicked".to_string()))?;
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => output.status.to_string(),
                msg => msg.to_string(),
            };
            return Err(GenerateError::Service(detail));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| GenerateError::Service("generator output is not UTF-8".to_string()))
    }
}
