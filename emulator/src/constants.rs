pub type Address = u32;
pub type Word = u32;

/// Base address of the text segment, where the first instruction is loaded
pub const TEXT_BASE: Address = 0x0040_0000;

/// Base address of the data segment
pub const DATA_BASE: Address = 0x1001_0000;

/// Initial value of the stack pointer
pub const STACK_BASE: Address = 0x7fff_fffc;

/// First address handed out by the `sbrk` syscall
pub const HEAP_BASE: Address = DATA_BASE + 0x1_0000;

/// Size of an instruction slot in the text segment
pub const INSTRUCTION_SIZE: Address = 4;
