use parse_display::{Display, FromStr};

/// Instruction mnemonics understood by the interpreter
#[derive(Display, FromStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[display(style = "lowercase")]
pub enum Opcode {
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Mult,
    Multu,
    Div,
    Divu,
    Mfhi,
    Mflo,
    Mthi,
    Mtlo,
    Jr,
    Jalr,
    Addi,
    Addiu,
    Andi,
    Ori,
    Xori,
    Slti,
    Sltiu,
    Lui,
    Lw,
    Lh,
    Lhu,
    Lb,
    Lbu,
    Sw,
    Sh,
    Sb,
    Beq,
    Bne,
    Blt,
    Ble,
    Bgt,
    Bge,
    Bltz,
    Blez,
    Bgtz,
    Bgez,
    J,
    Jal,
    Syscall,
    Nop,
    Li,
    La,
    Move,
    Clear,
    Not,
}

/// Execution family of an opcode
#[derive(Display, Clone, Copy, Debug, PartialEq, Eq)]
#[display(style = "lowercase")]
pub enum InstructionClass {
    Register,
    Immediate,
    Jump,
    Syscall,
    Nop,
    Pseudo,
}

impl Opcode {
    pub const fn class(self) -> InstructionClass {
        use Opcode as O;
        match self {
            O::Add
            | O::Addu
            | O::Sub
            | O::Subu
            | O::And
            | O::Or
            | O::Xor
            | O::Nor
            | O::Slt
            | O::Sltu
            | O::Sll
            | O::Srl
            | O::Sra
            | O::Sllv
            | O::Srlv
            | O::Srav
            | O::Mult
            | O::Multu
            | O::Div
            | O::Divu
            | O::Mfhi
            | O::Mflo
            | O::Mthi
            | O::Mtlo
            | O::Jr
            | O::Jalr => InstructionClass::Register,

            O::Addi
            | O::Addiu
            | O::Andi
            | O::Ori
            | O::Xori
            | O::Slti
            | O::Sltiu
            | O::Lui
            | O::Lw
            | O::Lh
            | O::Lhu
            | O::Lb
            | O::Lbu
            | O::Sw
            | O::Sh
            | O::Sb
            | O::Beq
            | O::Bne
            | O::Blt
            | O::Ble
            | O::Bgt
            | O::Bge
            | O::Bltz
            | O::Blez
            | O::Bgtz
            | O::Bgez => InstructionClass::Immediate,

            O::J | O::Jal => InstructionClass::Jump,
            O::Syscall => InstructionClass::Syscall,
            O::Nop => InstructionClass::Nop,
            O::Li | O::La | O::Move | O::Clear | O::Not => InstructionClass::Pseudo,
        }
    }
}
