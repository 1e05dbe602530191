pub mod ast;
pub mod check;
pub mod infer;
pub mod loader;
pub mod run_common;
