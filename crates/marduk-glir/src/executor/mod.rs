//! Replay interface.
//!
//! The crate only records intent. Whatever turns commands into native
//! graphics calls implements [`Executor`] and is handed drained batches by
//! [`Context::flush_commands`](crate::context::Context::flush_commands).

use anyhow::Result;

use crate::command::{Command, Opcode};

/// Consumer of drained command batches.
///
/// Batches arrive in drain order. An executor must interpret at least
/// `CREATE`, `DELETE` and `CURRENT`; everything else is backend-specific.
pub trait Executor {
    fn execute(&mut self, commands: Vec<Command>) -> Result<()>;
}

/// Executor that writes each command to the `log` facade and discards it.
///
/// Useful when running without a graphics backend, or to watch the stream
/// a real backend would receive.
#[derive(Debug, Default)]
pub struct TraceExecutor {
    executed: usize,
    switches: usize,
}

impl TraceExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total commands seen so far.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Number of `CURRENT` markers seen so far.
    pub fn context_switches(&self) -> usize {
        self.switches
    }
}

impl Executor for TraceExecutor {
    fn execute(&mut self, commands: Vec<Command>) -> Result<()> {
        for command in &commands {
            if *command.opcode() == Opcode::Current {
                self.switches += 1;
            }
            log::trace!(target: "marduk_glir::executor", "{command}");
        }
        self.executed += commands.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectId;

    #[test]
    fn trace_executor_counts() {
        let mut exec = TraceExecutor::new();
        exec.execute(vec![
            Command::new(Opcode::Current, ObjectId::CONTEXT, vec![]),
            Command::new(Opcode::Create, ObjectId::new(1), vec![]),
        ])
        .unwrap();
        exec.execute(Vec::new()).unwrap();

        assert_eq!(exec.executed(), 2);
        assert_eq!(exec.context_switches(), 1);
    }
}
