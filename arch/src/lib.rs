pub mod cond;
pub mod imm;
pub mod inst;
pub mod op;
pub mod reg;
