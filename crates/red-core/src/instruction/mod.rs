pub mod line;
pub mod opcode;

pub use line::Instruction;
pub use opcode::OpCode;
