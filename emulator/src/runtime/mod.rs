use tracing::{debug, error, info, warn};

use crate::assembler::{assemble, Assembly, Labels, LoadError, Program};
use crate::constants::{Address, Word, HEAP_BASE, INSTRUCTION_SIZE, TEXT_BASE};

mod console;
mod instructions;
mod memory;
mod operands;
mod registers;
mod syscall;
mod warning;

pub use self::console::{Console, InMemoryConsole, NativeConsole, StreamConsole};
pub use self::memory::{Memory, MemoryRange};
pub use self::registers::{Reg, RegisterParseError, Registers, REGISTER_NAMES};
pub use self::syscall::Syscall;
pub use self::warning::Warning;

use self::instructions::Instruction;
use self::operands::Operands;

/// Why the computer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The program called the exit syscall
    Exit,

    /// The program counter left the loaded instructions
    NoInstruction { pc: Address },
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exit => write!(f, "program exited"),
            Self::NoInstruction { pc } => write!(f, "no instruction at {pc:#010x}"),
        }
    }
}

/// Outcome of the last step
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing executed since the last load or reset
    #[default]
    Ready,

    /// The last instruction executed without problem
    Running,

    /// The last instruction raised warnings, execution can go on
    Warned(Vec<Warning>),

    /// Execution is over, stepping does nothing
    Halted(HaltReason),
}

/// Counts reported after a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub instruction_count: usize,
    pub label_count: usize,
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "loaded {} instructions, found {} labels",
            self.instruction_count, self.label_count
        )
    }
}

/// Copy of the architectural state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: Address,
    pub hi: Word,
    pub lo: Word,
    pub registers: [Word; 32],
}

impl Snapshot {
    pub fn register(&self, reg: Reg) -> Word {
        self.registers[reg.index()]
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let special = [("pc", self.pc), ("hi", self.hi), ("lo", self.lo)];
        let entries: Vec<(&str, Word)> = REGISTER_NAMES
            .iter()
            .copied()
            .zip(self.registers)
            .chain(special)
            .collect();

        for row in entries.chunks(4) {
            let line: Vec<String> = row
                .iter()
                .map(|(name, value)| format!("{name:>4} = {value:#010x}"))
                .collect();
            writeln!(f, "{}", line.join("   "))?;
        }

        Ok(())
    }
}

pub struct Computer<C = NativeConsole> {
    pub registers: Registers,
    pub memory: Memory,
    pub pc: Address,
    heap: Address,
    program: Program,
    status: Status,
    console: C,
    diagnostics: Vec<Warning>,
    steps: u64,
}

impl<C> std::fmt::Debug for Computer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Computer {{ pc: {:#010x}, registers: {:?}, status: {:?}, memory: [...] }}",
            self.pc, self.registers, self.status
        )
    }
}

impl Default for Computer<NativeConsole> {
    fn default() -> Self {
        Self::new(NativeConsole::default())
    }
}

impl<C: Console> Computer<C> {
    pub fn new(console: C) -> Self {
        Self {
            registers: Registers::default(),
            memory: Memory::default(),
            pc: TEXT_BASE,
            heap: HEAP_BASE,
            program: Program::default(),
            status: Status::Ready,
            console,
            diagnostics: Vec::new(),
            steps: 0,
        }
    }

    /// Bring the computer back to its initial state. The console is kept.
    pub fn reset(&mut self) {
        self.registers = Registers::default();
        self.memory = Memory::default();
        self.pc = TEXT_BASE;
        self.heap = HEAP_BASE;
        self.program = Program::default();
        self.status = Status::Ready;
        self.diagnostics.clear();
        self.steps = 0;
    }

    /// Reset the computer and load a program
    ///
    /// # Errors
    ///
    /// Fails if the program could not be assembled, leaving the computer reset
    #[tracing::instrument(skip_all)]
    pub fn load(&mut self, source: &str) -> Result<LoadSummary, LoadError> {
        self.reset();

        let Assembly {
            program, memory, ..
        } = assemble(source)?;

        let summary = LoadSummary {
            instruction_count: program.len(),
            label_count: program.labels().len(),
        };
        self.program = program;
        self.memory = memory;

        info!(%summary, "Program loaded");
        Ok(summary)
    }

    /// Execute the instruction at the program counter
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn step(&mut self) -> &Status {
        if self.is_halted() {
            return &self.status;
        }

        let (decoded, warnings) = match self.program.fetch(self.pc) {
            Some(statement) => {
                debug!(line = statement.line, "Executing instruction \"{}\"", statement);
                match statement.opcode {
                    Some(opcode) => {
                        let mut operands =
                            Operands::new(opcode, &statement.operands, &self.program.labels, self.pc);
                        let decoded = Instruction::decode(&mut operands);
                        (decoded, operands.into_warnings())
                    }
                    None => (
                        Err(Warning::UnsupportedInstruction {
                            mnemonic: statement.mnemonic.clone(),
                        }),
                        Vec::new(),
                    ),
                }
            }

            None => {
                error!("No instruction at {:#010x}, halting", self.pc);
                self.status = Status::Halted(HaltReason::NoInstruction { pc: self.pc });
                return &self.status;
            }
        };

        for warning in warnings {
            self.report(warning);
        }

        match decoded {
            Ok(instruction) => instruction.execute(self),
            Err(warning) => {
                // The instruction is skipped
                self.report(warning);
                self.advance();
            }
        }

        self.steps += 1;

        let diagnostics = std::mem::take(&mut self.diagnostics);
        if !self.is_halted() {
            self.status = if diagnostics.is_empty() {
                Status::Running
            } else {
                Status::Warned(diagnostics)
            };
        }

        &self.status
    }

    /// Step until the computer halts
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> HaltReason {
        loop {
            if let Status::Halted(reason) = self.step() {
                let reason = *reason;
                info!(steps = self.steps, "Halted: {}", reason);
                return reason;
            }
        }
    }

    /// Step until the computer halts, at most `max_steps` times. Returns `None` if the computer
    /// is still running.
    #[tracing::instrument(skip(self))]
    pub fn run_for(&mut self, max_steps: u64) -> Option<HaltReason> {
        for _ in 0..max_steps {
            if let Status::Halted(reason) = self.step() {
                return Some(*reason);
            }
        }

        if let Status::Halted(reason) = self.status {
            return Some(reason);
        }

        warn!(max_steps, "Step limit reached, stopping");
        None
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.pc,
            hi: self.registers.hi,
            lo: self.registers.lo,
            registers: self.registers.general_purpose(),
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.status, Status::Halted(_))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn labels(&self) -> &Labels {
        self.program.labels()
    }

    /// Next address handed out by `sbrk`
    pub fn heap_pointer(&self) -> Address {
        self.heap
    }

    /// Number of instructions executed since the last load
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    pub(crate) fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
    }

    /// Log a warning and attach it to the current step
    pub(crate) fn report(&mut self, warning: Warning) {
        warn!("{:#010x}: {}", self.pc, warning);
        self.diagnostics.push(warning);
    }
}
