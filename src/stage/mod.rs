pub mod codegen;
pub mod interpret;

/// CompilationStage represents a single consumer of the AST. Each stage takes
/// an input and yields an output or the stage's own error type.
pub trait CompilationStage<I, O, E> {
    fn apply(&mut self, input: I) -> Result<O, E>;
}
