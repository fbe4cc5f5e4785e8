use parse_display::Display;
use tracing::debug;

use super::operands::{MemoryOperand, Operands, Target};
use super::{Computer, Console, Memory, Reg, Warning};
use crate::constants::{Address, Word, INSTRUCTION_SIZE};
use crate::parser::Opcode;

/// Two-operand arithmetic and logic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum AluOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("&")]
    And,
    #[display("|")]
    Or,
    #[display("^")]
    Xor,
    #[display("nor")]
    Nor,
    #[display("<")]
    Slt,
    #[display("<u")]
    Sltu,
}

impl AluOp {
    pub(crate) fn apply(self, a: Word, b: Word) -> Word {
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Sub => a.wrapping_sub(b),
            Self::And => a & b,
            Self::Or => a | b,
            Self::Xor => a ^ b,
            Self::Nor => !(a | b),
            Self::Slt => Word::from((a as i32) < (b as i32)),
            Self::Sltu => Word::from(a < b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum ShiftOp {
    #[display("<<")]
    Sll,
    #[display(">>")]
    Srl,
    #[display(">>>")]
    Sra,
}

impl ShiftOp {
    /// Shift by the low five bits of `amount`
    pub(crate) fn apply(self, value: Word, amount: Word) -> Word {
        let amount = amount & 0x1f;
        match self {
            Self::Sll => value << amount,
            Self::Srl => value >> amount,
            Self::Sra => ((value as i32) >> amount) as Word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(style = "lowercase")]
pub(crate) enum MulDivOp {
    Mult,
    Multu,
    Div,
    Divu,
}

impl MulDivOp {
    /// Compute the `(hi, lo)` pair. Divisions by zero yield nothing.
    pub(crate) fn apply(self, a: Word, b: Word) -> Option<(Word, Word)> {
        match self {
            Self::Mult => {
                let product = i64::from(a as i32) * i64::from(b as i32);
                Some(((product >> 32) as Word, product as Word))
            }
            Self::Multu => {
                let product = u64::from(a) * u64::from(b);
                Some(((product >> 32) as Word, product as Word))
            }
            Self::Div => {
                let (a, b) = (a as i32, b as i32);
                if b == 0 {
                    None
                } else {
                    Some((a.wrapping_rem(b) as Word, a.wrapping_div(b) as Word))
                }
            }
            Self::Divu => a.checked_div(b).map(|quotient| (a % b, quotient)),
        }
    }
}

/// Branch conditions. Everything but equality compares signed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Condition {
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
}

impl Condition {
    pub(crate) fn holds(self, a: Word, b: Word) -> bool {
        let (sa, sb) = (a as i32, b as i32);
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => sa < sb,
            Self::Le => sa <= sb,
            Self::Gt => sa > sb,
            Self::Ge => sa >= sb,
        }
    }
}

/// Size of a memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    fn load(self, memory: &Memory, address: Address, signed: bool) -> Word {
        match (self, signed) {
            (Self::Byte, true) => i32::from(memory.fetch_byte(address) as i8) as Word,
            (Self::Byte, false) => Word::from(memory.fetch_byte(address)),
            (Self::Half, true) => i32::from(memory.fetch_half(address) as i16) as Word,
            (Self::Half, false) => Word::from(memory.fetch_half(address)),
            (Self::Word, _) => memory.fetch_word(address),
        }
    }

    fn store(self, memory: &mut Memory, address: Address, value: Word) {
        match self {
            Self::Byte => memory.store_byte(address, value as u8),
            Self::Half => memory.store_half(address, value as u16),
            Self::Word => memory.store_word(address, value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegisterInstruction {
    Alu {
        op: AluOp,
        rd: Reg,
        rs: Reg,
        rt: Reg,
    },
    Shift {
        op: ShiftOp,
        rd: Reg,
        rt: Reg,
        amount: Word,
    },
    ShiftVariable {
        op: ShiftOp,
        rd: Reg,
        rt: Reg,
        rs: Reg,
    },
    MulDiv {
        op: MulDivOp,
        rs: Reg,
        rt: Reg,
    },
    MoveFromHi(Reg),
    MoveFromLo(Reg),
    MoveToHi(Reg),
    MoveToLo(Reg),
    JumpRegister(Reg),
    JumpAndLinkRegister {
        rd: Reg,
        rs: Reg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImmediateInstruction {
    Alu {
        op: AluOp,
        rt: Reg,
        rs: Reg,
        imm: Word,
    },
    LoadUpper {
        rt: Reg,
        imm: Word,
    },
    Load {
        width: Width,
        signed: bool,
        rt: Reg,
        address: MemoryOperand,
    },
    Store {
        width: Width,
        rt: Reg,
        address: MemoryOperand,
    },
    Branch {
        condition: Condition,
        rs: Reg,
        rt: Reg,
        target: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PseudoInstruction {
    LoadImmediate { rt: Reg, imm: Word },
    LoadAddress { rt: Reg, address: Address },
    Move { rd: Reg, rs: Reg },
    Clear(Reg),
    Not { rd: Reg, rs: Reg },
}

/// A decoded instruction, ready to be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Instruction {
    Register(RegisterInstruction),
    Immediate(ImmediateInstruction),
    Jump { link: bool, target: Target },
    Syscall,
    Nop,
    Pseudo(PseudoInstruction),
}

fn alu(op: AluOp, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Register(RegisterInstruction::Alu {
        op,
        rd: operands.register(0)?,
        rs: operands.register(1)?,
        rt: operands.register(2)?,
    }))
}

fn shift(op: ShiftOp, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Register(RegisterInstruction::Shift {
        op,
        rd: operands.register(0)?,
        rt: operands.register(1)?,
        amount: operands.immediate(2)?,
    }))
}

fn shift_variable(op: ShiftOp, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Register(RegisterInstruction::ShiftVariable {
        op,
        rd: operands.register(0)?,
        rt: operands.register(1)?,
        rs: operands.register(2)?,
    }))
}

fn mul_div(op: MulDivOp, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Register(RegisterInstruction::MulDiv {
        op,
        rs: operands.register(0)?,
        rt: operands.register(1)?,
    }))
}

/// Arithmetic with an immediate, `mask` is applied to the immediate value
fn alu_immediate(
    op: AluOp,
    mask: Word,
    operands: &mut Operands<'_>,
) -> Result<Instruction, Warning> {
    Ok(Instruction::Immediate(ImmediateInstruction::Alu {
        op,
        rt: operands.register(0)?,
        rs: operands.register(1)?,
        imm: operands.immediate(2)? & mask,
    }))
}

fn load(width: Width, signed: bool, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Immediate(ImmediateInstruction::Load {
        width,
        signed,
        rt: operands.register(0)?,
        address: operands.memory(1)?,
    }))
}

fn store(width: Width, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Immediate(ImmediateInstruction::Store {
        width,
        rt: operands.register(0)?,
        address: operands.memory(1)?,
    }))
}

fn branch(condition: Condition, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Immediate(ImmediateInstruction::Branch {
        condition,
        rs: operands.register(0)?,
        rt: operands.register(1)?,
        target: operands.target(2)?,
    }))
}

/// Branch comparing a register with zero
fn branch_zero(condition: Condition, operands: &mut Operands<'_>) -> Result<Instruction, Warning> {
    Ok(Instruction::Immediate(ImmediateInstruction::Branch {
        condition,
        rs: operands.register(0)?,
        rt: Reg::ZERO,
        target: operands.target(1)?,
    }))
}

const IMMEDIATE_MASK: Word = 0xffff;

impl Instruction {
    /// Decode the operands of an instruction
    pub(crate) fn decode(operands: &mut Operands<'_>) -> Result<Self, Warning> {
        use Opcode as O;

        let instruction = match operands.opcode() {
            O::Add | O::Addu => alu(AluOp::Add, operands)?,
            O::Sub | O::Subu => alu(AluOp::Sub, operands)?,
            O::And => alu(AluOp::And, operands)?,
            O::Or => alu(AluOp::Or, operands)?,
            O::Xor => alu(AluOp::Xor, operands)?,
            O::Nor => alu(AluOp::Nor, operands)?,
            O::Slt => alu(AluOp::Slt, operands)?,
            O::Sltu => alu(AluOp::Sltu, operands)?,
            O::Sll => shift(ShiftOp::Sll, operands)?,
            O::Srl => shift(ShiftOp::Srl, operands)?,
            O::Sra => shift(ShiftOp::Sra, operands)?,
            O::Sllv => shift_variable(ShiftOp::Sll, operands)?,
            O::Srlv => shift_variable(ShiftOp::Srl, operands)?,
            O::Srav => shift_variable(ShiftOp::Sra, operands)?,
            O::Mult => mul_div(MulDivOp::Mult, operands)?,
            O::Multu => mul_div(MulDivOp::Multu, operands)?,
            O::Div => mul_div(MulDivOp::Div, operands)?,
            O::Divu => mul_div(MulDivOp::Divu, operands)?,
            O::Mfhi => Self::Register(RegisterInstruction::MoveFromHi(operands.register(0)?)),
            O::Mflo => Self::Register(RegisterInstruction::MoveFromLo(operands.register(0)?)),
            O::Mthi => Self::Register(RegisterInstruction::MoveToHi(operands.register(0)?)),
            O::Mtlo => Self::Register(RegisterInstruction::MoveToLo(operands.register(0)?)),
            O::Jr => Self::Register(RegisterInstruction::JumpRegister(operands.register(0)?)),
            O::Jalr => {
                // `jalr $rs` links into `$ra`
                let (rd, rs) = if operands.len() == 1 {
                    (Reg::RA, operands.register(0)?)
                } else {
                    (operands.register(0)?, operands.register(1)?)
                };
                Self::Register(RegisterInstruction::JumpAndLinkRegister { rd, rs })
            }

            O::Addi | O::Addiu => alu_immediate(AluOp::Add, Word::MAX, operands)?,
            O::Slti => alu_immediate(AluOp::Slt, Word::MAX, operands)?,
            O::Sltiu => alu_immediate(AluOp::Sltu, Word::MAX, operands)?,
            O::Andi => alu_immediate(AluOp::And, IMMEDIATE_MASK, operands)?,
            O::Ori => alu_immediate(AluOp::Or, IMMEDIATE_MASK, operands)?,
            O::Xori => alu_immediate(AluOp::Xor, IMMEDIATE_MASK, operands)?,
            O::Lui => Self::Immediate(ImmediateInstruction::LoadUpper {
                rt: operands.register(0)?,
                imm: operands.immediate(1)? & IMMEDIATE_MASK,
            }),
            O::Lw => load(Width::Word, true, operands)?,
            O::Lh => load(Width::Half, true, operands)?,
            O::Lhu => load(Width::Half, false, operands)?,
            O::Lb => load(Width::Byte, true, operands)?,
            O::Lbu => load(Width::Byte, false, operands)?,
            O::Sw => store(Width::Word, operands)?,
            O::Sh => store(Width::Half, operands)?,
            O::Sb => store(Width::Byte, operands)?,
            O::Beq => branch(Condition::Eq, operands)?,
            O::Bne => branch(Condition::Ne, operands)?,
            O::Blt => branch(Condition::Lt, operands)?,
            O::Ble => branch(Condition::Le, operands)?,
            O::Bgt => branch(Condition::Gt, operands)?,
            O::Bge => branch(Condition::Ge, operands)?,
            O::Bltz => branch_zero(Condition::Lt, operands)?,
            O::Blez => branch_zero(Condition::Le, operands)?,
            O::Bgtz => branch_zero(Condition::Gt, operands)?,
            O::Bgez => branch_zero(Condition::Ge, operands)?,

            O::J => Self::Jump {
                link: false,
                target: operands.target(0)?,
            },
            O::Jal => Self::Jump {
                link: true,
                target: operands.target(0)?,
            },

            O::Syscall => Self::Syscall,
            O::Nop => Self::Nop,

            O::Li => Self::Pseudo(PseudoInstruction::LoadImmediate {
                rt: operands.register(0)?,
                imm: operands.immediate(1)?,
            }),
            O::La => Self::Pseudo(PseudoInstruction::LoadAddress {
                rt: operands.register(0)?,
                address: operands.target(1)?.address(),
            }),
            O::Move => Self::Pseudo(PseudoInstruction::Move {
                rd: operands.register(0)?,
                rs: operands.register(1)?,
            }),
            O::Clear => Self::Pseudo(PseudoInstruction::Clear(operands.register(0)?)),
            O::Not => Self::Pseudo(PseudoInstruction::Not {
                rd: operands.register(0)?,
                rs: operands.register(1)?,
            }),
        };

        Ok(instruction)
    }

    pub(crate) fn execute<C: Console>(self, computer: &mut Computer<C>) {
        match self {
            Self::Register(instruction) => instruction.execute(computer),
            Self::Immediate(instruction) => instruction.execute(computer),
            Self::Jump { link, target } => {
                let pc = computer.pc;
                if link {
                    computer
                        .registers
                        .set(Reg::RA, pc.wrapping_add(INSTRUCTION_SIZE));
                }

                let address = target.jump_address(pc);
                debug!("Jumping to address {:#x}", address);
                computer.pc = address;
            }
            Self::Syscall => {
                computer.syscall();
                computer.advance();
            }
            Self::Nop => computer.advance(),
            Self::Pseudo(instruction) => instruction.execute(computer),
        }
    }
}

impl RegisterInstruction {
    fn execute<C: Console>(self, computer: &mut Computer<C>) {
        let registers = &mut computer.registers;

        match self {
            Self::Alu { op, rd, rs, rt } => {
                let (a, b) = (registers.get(rs), registers.get(rt));
                let res = op.apply(a, b);
                debug!("{:#x} {} {:#x} = {:#x}", a, op, b, res);
                registers.set(rd, res);
            }

            Self::Shift { op, rd, rt, amount } => {
                let value = registers.get(rt);
                let res = op.apply(value, amount);
                debug!("{:#x} {} {} = {:#x}", value, op, amount & 0x1f, res);
                registers.set(rd, res);
            }

            Self::ShiftVariable { op, rd, rt, rs } => {
                let (value, amount) = (registers.get(rt), registers.get(rs));
                let res = op.apply(value, amount);
                debug!("{:#x} {} {} = {:#x}", value, op, amount & 0x1f, res);
                registers.set(rd, res);
            }

            Self::MulDiv { op, rs, rt } => {
                let (a, b) = (registers.get(rs), registers.get(rt));
                if let Some((hi, lo)) = op.apply(a, b) {
                    debug!("{}({:#x}, {:#x}) => hi = {:#x}, lo = {:#x}", op, a, b, hi, lo);
                    registers.hi = hi;
                    registers.lo = lo;
                } else {
                    debug!("{}({:#x}, 0): division by zero, hi and lo unchanged", op, a);
                }
            }

            Self::MoveFromHi(rd) => {
                let hi = registers.hi;
                registers.set(rd, hi);
            }

            Self::MoveFromLo(rd) => {
                let lo = registers.lo;
                registers.set(rd, lo);
            }

            Self::MoveToHi(rs) => registers.hi = registers.get(rs),
            Self::MoveToLo(rs) => registers.lo = registers.get(rs),

            Self::JumpRegister(rs) => {
                let address = registers.get(rs);
                debug!("Jumping to address {:#x}", address);
                computer.pc = address;
                return;
            }

            Self::JumpAndLinkRegister { rd, rs } => {
                // Read the target first, `rd` and `rs` may be the same register
                let address = registers.get(rs);
                registers.set(rd, computer.pc.wrapping_add(INSTRUCTION_SIZE));
                debug!("Jumping to address {:#x}", address);
                computer.pc = address;
                return;
            }
        }

        computer.advance();
    }
}

impl ImmediateInstruction {
    fn execute<C: Console>(self, computer: &mut Computer<C>) {
        match self {
            Self::Alu { op, rt, rs, imm } => {
                let a = computer.registers.get(rs);
                let res = op.apply(a, imm);
                debug!("{:#x} {} {:#x} = {:#x}", a, op, imm, res);
                computer.registers.set(rt, res);
            }

            Self::LoadUpper { rt, imm } => computer.registers.set(rt, imm << 16),

            Self::Load {
                width,
                signed,
                rt,
                address,
            } => {
                let address = address.resolve(&computer.registers);
                let value = width.load(&computer.memory, address, signed);
                debug!("load {:?} [{:#010x}] => {:#x}", width, address, value);
                computer.registers.set(rt, value);
            }

            Self::Store { width, rt, address } => {
                let address = address.resolve(&computer.registers);
                let value = computer.registers.get(rt);
                debug!("store {:?} [{:#010x}] <= {:#x}", width, address, value);
                width.store(&mut computer.memory, address, value);
            }

            Self::Branch {
                condition,
                rs,
                rt,
                target,
            } => {
                let (a, b) = (computer.registers.get(rs), computer.registers.get(rt));
                if condition.holds(a, b) {
                    let address = target.branch_address(computer.pc);
                    debug!("{:#x} {} {:#x}, branching to {:#x}", a, condition, b, address);
                    computer.pc = address;
                } else {
                    computer.advance();
                }
                return;
            }
        }

        computer.advance();
    }
}

/// Value materialized by `li`: a single `addiu` when it fits a signed 16-bit immediate, a `lui`
/// and `ori` pair otherwise
fn load_immediate(imm: Word) -> Word {
    if i16::try_from(imm as i32).is_ok() {
        AluOp::Add.apply(0, imm)
    } else {
        let upper = (imm >> 16) << 16;
        AluOp::Or.apply(upper, imm & IMMEDIATE_MASK)
    }
}

impl PseudoInstruction {
    fn execute<C: Console>(self, computer: &mut Computer<C>) {
        let registers = &mut computer.registers;

        match self {
            Self::LoadImmediate { rt, imm } => registers.set(rt, load_immediate(imm)),
            Self::LoadAddress { rt, address } => registers.set(rt, address),
            Self::Move { rd, rs } => {
                let value = registers.get(rs);
                registers.set(rd, value);
            }
            Self::Clear(rd) => registers.set(rd, 0),
            Self::Not { rd, rs } => {
                let value = registers.get(rs);
                registers.set(rd, !value);
            }
        }

        computer.advance();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::assembler::Labels;
    use crate::constants::TEXT_BASE;

    fn decode(opcode: Opcode, operands: &[&str]) -> Result<Instruction, Warning> {
        let labels = Labels::default();
        let tokens: Vec<String> = operands.iter().map(|&t| t.to_owned()).collect();
        let mut operands = Operands::new(opcode, &tokens, &labels, TEXT_BASE);
        Instruction::decode(&mut operands)
    }

    fn reg(name: &str) -> Reg {
        name.parse().unwrap()
    }

    #[test]
    fn alu_test() {
        assert_eq!(AluOp::Add.apply(0x7fff_ffff, 1), 0x8000_0000);
        assert_eq!(AluOp::Sub.apply(0, 1), 0xffff_ffff);
        assert_eq!(AluOp::Nor.apply(0, 0), 0xffff_ffff);
        assert_eq!(AluOp::Slt.apply(0xffff_ffff, 0), 1);
        assert_eq!(AluOp::Sltu.apply(0xffff_ffff, 0), 0);
        assert_eq!(AluOp::Xor.apply(0b1100, 0b1010), 0b0110);
    }

    #[test]
    fn shift_test() {
        assert_eq!(ShiftOp::Sll.apply(1, 4), 16);
        assert_eq!(ShiftOp::Sll.apply(1, 33), 2);
        assert_eq!(ShiftOp::Srl.apply(0x8000_0000, 31), 1);
        assert_eq!(ShiftOp::Sra.apply(0x8000_0000, 31), 0xffff_ffff);
        assert_eq!(ShiftOp::Sra.apply(0x4000_0000, 30), 1);
    }

    #[test]
    fn mul_div_test() {
        assert_eq!(MulDivOp::Mult.apply(0xffff_ffff, 2), Some((0xffff_ffff, 0xffff_fffe)));
        assert_eq!(MulDivOp::Multu.apply(0xffff_ffff, 2), Some((1, 0xffff_fffe)));
        assert_eq!(MulDivOp::Div.apply(7, 2), Some((1, 3)));
        assert_eq!(
            MulDivOp::Div.apply(-7i32 as Word, 2),
            Some((-1i32 as Word, -3i32 as Word))
        );
        assert_eq!(MulDivOp::Div.apply(0x8000_0000, 0xffff_ffff), Some((0, 0x8000_0000)));
        assert_eq!(MulDivOp::Div.apply(5, 0), None);
        assert_eq!(MulDivOp::Divu.apply(0xffff_ffff, 2), Some((1, 0x7fff_ffff)));
        assert_eq!(MulDivOp::Divu.apply(5, 0), None);
    }

    #[test]
    fn condition_test() {
        let minus_one = -1i32 as Word;
        assert!(Condition::Lt.holds(minus_one, 0));
        assert!(Condition::Le.holds(3, 3));
        assert!(!Condition::Gt.holds(minus_one, 0));
        assert!(Condition::Ge.holds(0, minus_one));
        assert!(Condition::Ne.holds(1, 2));
        assert!(Condition::Eq.holds(minus_one, 0xffff_ffff));
    }

    #[test]
    fn decode_immediate_mask_test() {
        assert_eq!(
            decode(Opcode::Ori, &["$t0", "$zero", "-1"]),
            Ok(Instruction::Immediate(ImmediateInstruction::Alu {
                op: AluOp::Or,
                rt: reg("$t0"),
                rs: Reg::ZERO,
                imm: 0xffff,
            }))
        );
        assert_eq!(
            decode(Opcode::Addi, &["$t0", "$t0", "-1"]),
            Ok(Instruction::Immediate(ImmediateInstruction::Alu {
                op: AluOp::Add,
                rt: reg("$t0"),
                rs: reg("$t0"),
                imm: 0xffff_ffff,
            }))
        );
    }

    #[test]
    fn decode_jalr_test() {
        assert_eq!(
            decode(Opcode::Jalr, &["$t9"]),
            Ok(Instruction::Register(
                RegisterInstruction::JumpAndLinkRegister {
                    rd: Reg::RA,
                    rs: reg("$t9")
                }
            ))
        );
        assert_eq!(
            decode(Opcode::Jalr, &["$s0", "$t9"]),
            Ok(Instruction::Register(
                RegisterInstruction::JumpAndLinkRegister {
                    rd: reg("$s0"),
                    rs: reg("$t9")
                }
            ))
        );
    }

    #[test]
    fn decode_branch_zero_test() {
        assert_eq!(
            decode(Opcode::Bgez, &["$a0", "2"]),
            Ok(Instruction::Immediate(ImmediateInstruction::Branch {
                condition: Condition::Ge,
                rs: Reg::A0,
                rt: Reg::ZERO,
                target: Target::Literal(2),
            }))
        );
    }

    #[test]
    fn decode_errors_test() {
        assert_eq!(
            decode(Opcode::Add, &["$t0", "$t1"]),
            Err(Warning::MissingOperand {
                opcode: Opcode::Add,
                expected: 3,
                got: 2
            })
        );
        assert!(matches!(
            decode(Opcode::Addi, &["$t0", "$t1", "ten"]),
            Err(Warning::InvalidImmediate { .. })
        ));
        // Extra operands are ignored
        assert_eq!(decode(Opcode::Nop, &["$t0"]), Ok(Instruction::Nop));
    }

    #[test]
    fn load_immediate_boundaries_test() {
        for value in [
            0,
            1,
            0x7fff,
            0x8000,
            0xffff,
            0x1_0000,
            0x7fff_ffff,
            0x8000_0000,
            0xffff_8000,
            0xffff_7fff,
            0xffff_ffff,
        ] {
            assert_eq!(load_immediate(value), value);
        }
    }

    proptest! {
        #[test]
        fn load_immediate_materializes_the_value(value: Word) {
            prop_assert_eq!(load_immediate(value), value);
        }
    }
}
