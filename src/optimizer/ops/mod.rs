pub mod binary;
pub mod unary;

// Both modules only add methods to `ConstantFolder`.
