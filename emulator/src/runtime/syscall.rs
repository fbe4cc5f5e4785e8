use std::io;

use parse_display::Display;
use tracing::{debug, info};

use super::{Computer, Console, HaltReason, Reg, Status, Warning};
use crate::constants::{Address, Word};

/// System services, selected by the value of `$v0`
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(style = "snake_case")]
pub enum Syscall {
    /// Print `$a0` as a signed decimal integer
    PrintInt,

    /// Print the zero-terminated string at address `$a0`
    PrintString,

    /// Read an integer into `$v0`
    ReadInt,

    /// Read a line into the buffer at `$a0`, of size `$a1`
    ReadString,

    /// Allocate `$a0` bytes, returning their address in `$v0`
    Sbrk,

    /// Stop the program
    Exit,

    /// Print the low byte of `$a0`
    PrintChar,

    /// Read a character into `$v0`
    ReadChar,
}

impl Syscall {
    pub const fn from_code(code: Word) -> Option<Self> {
        match code {
            1 => Some(Self::PrintInt),
            4 => Some(Self::PrintString),
            5 => Some(Self::ReadInt),
            8 => Some(Self::ReadString),
            9 => Some(Self::Sbrk),
            10 => Some(Self::Exit),
            11 => Some(Self::PrintChar),
            12 => Some(Self::ReadChar),
            _ => None,
        }
    }

    pub const fn code(self) -> Word {
        match self {
            Self::PrintInt => 1,
            Self::PrintString => 4,
            Self::ReadInt => 5,
            Self::ReadString => 8,
            Self::Sbrk => 9,
            Self::Exit => 10,
            Self::PrintChar => 11,
            Self::ReadChar => 12,
        }
    }
}

impl<C: Console> Computer<C> {
    /// Run the system call selected by `$v0`. Does not move the program counter.
    #[tracing::instrument(skip(self), level = "debug")]
    pub(crate) fn syscall(&mut self) {
        let code = self.registers.get(Reg::V0);
        let Some(syscall) = Syscall::from_code(code) else {
            self.report(Warning::UnsupportedSyscall { code });
            return;
        };

        debug!(%syscall, "System call");
        let a0 = self.registers.get(Reg::A0);

        match syscall {
            Syscall::PrintInt => {
                let value = a0 as i32;
                self.write_console(value.to_string().as_bytes());
            }

            Syscall::PrintString => {
                let bytes = self.read_string(a0);
                self.write_console(&bytes);
            }

            Syscall::ReadInt => {
                let value = self.read_console(syscall, C::read_int).unwrap_or(0);
                self.registers.set(Reg::V0, value as Word);
            }

            Syscall::ReadString => {
                let size = self.registers.get(Reg::A1) as i32;
                let line = self
                    .read_console(syscall, C::read_line)
                    .unwrap_or_default();

                // Keep room for the terminator
                let capacity = usize::try_from(size.saturating_sub(1)).unwrap_or(0);
                let count = line.len().min(capacity);
                let mut address = a0;
                for &byte in &line[..count] {
                    self.memory.store_byte(address, byte);
                    address = address.wrapping_add(1);
                }
                self.memory.store_byte(address, 0);
            }

            Syscall::Sbrk => {
                debug!(bytes = a0, "Allocating from {:#010x}", self.heap);
                self.registers.set(Reg::V0, self.heap);
                self.heap = self.heap.wrapping_add(a0);
            }

            Syscall::Exit => {
                info!("Program exited");
                self.status = Status::Halted(HaltReason::Exit);
            }

            Syscall::PrintChar => {
                self.write_console(&[a0 as u8]);
            }

            Syscall::ReadChar => {
                let value = self
                    .read_console(syscall, C::read_char)
                    .map_or(0, |byte| i32::from(byte as i8) as Word);
                self.registers.set(Reg::V0, value);
            }
        }
    }

    /// Collect the bytes of a zero-terminated string
    fn read_string(&self, mut address: Address) -> Vec<u8> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.memory.fetch_byte(address);
            if byte == 0 {
                break bytes;
            }
            bytes.push(byte);
            address = address.wrapping_add(1);
        }
    }

    fn write_console(&mut self, bytes: &[u8]) {
        if let Err(e) = self.console.write(bytes) {
            self.report(Warning::Console {
                message: e.to_string(),
            });
        }
    }

    fn read_console<T>(
        &mut self,
        syscall: Syscall,
        read: impl FnOnce(&mut C) -> io::Result<Option<T>>,
    ) -> Option<T> {
        match read(&mut self.console) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                self.report(Warning::MissingInput { syscall });
                None
            }
            Err(e) => {
                self.report(Warning::Console {
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
