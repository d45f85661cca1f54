//! Lowers an expression tree into instructions for a stack machine.
//!
//! Instructions are handed to an [`InstructionSink`] in the order the tree is
//! walked. Operands are always pushed before the `add` that consumes them, so
//! the left operand sits deeper on the stack than the right one.

use super::CompilationStage;
use crate::ast::{AdditionExpr, Expr, NumberLiteral};
use tracing::trace;

/// Instruction represents a single stack machine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Push(i64),
    Add,
}

impl core::fmt::Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Push(value) => write!(f, "push {}", value),
            Self::Add => write!(f, "add"),
        }
    }
}

/// InstructionSink receives instructions as they are generated.
pub trait InstructionSink {
    type Error;

    fn emit(&mut self, instruction: Instruction) -> Result<(), Self::Error>;
}

impl InstructionSink for Vec<Instruction> {
    type Error = core::convert::Infallible;

    fn emit(&mut self, instruction: Instruction) -> Result<(), Self::Error> {
        self.push(instruction);
        Ok(())
    }
}

/// TextSink writes one instruction per line to the wrapped writer.
pub struct TextSink<W> {
    writer: W,
}

impl<W: std::io::Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> InstructionSink for TextSink<W> {
    type Error = std::io::Error;

    fn emit(&mut self, instruction: Instruction) -> Result<(), Self::Error> {
        writeln!(self.writer, "{}", instruction)
    }
}

/// CodeGenerator walks an expression, emitting into its sink.
pub struct CodeGenerator<S> {
    sink: S,
}

impl<S: InstructionSink> CodeGenerator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<'a, S: InstructionSink> CompilationStage<&'a Expr, (), S::Error> for CodeGenerator<S> {
    fn apply(&mut self, input: &'a Expr) -> Result<(), S::Error> {
        codegen_expr(&mut self.sink, input)
    }
}

fn codegen_expr<S: InstructionSink>(sink: &mut S, expr: &Expr) -> Result<(), S::Error> {
    match expr {
        Expr::NumberLiteral(NumberLiteral(value)) => emit(sink, Instruction::Push(*value)),
        Expr::Addition(AdditionExpr(lhs, rhs)) => {
            codegen_expr(sink, lhs)?;
            codegen_expr(sink, rhs)?;
            emit(sink, Instruction::Add)
        }
    }
}

fn emit<S: InstructionSink>(sink: &mut S, instruction: Instruction) -> Result<(), S::Error> {
    trace!(%instruction, "emitting instruction");
    sink.emit(instruction)
}

/// generate collects the instructions for an expression into a vector.
pub fn generate(expr: &Expr) -> Vec<Instruction> {
    let mut insts = Vec::new();
    match codegen_expr(&mut insts, expr) {
        Ok(()) => insts,
        Err(never) => match never {},
    }
}
