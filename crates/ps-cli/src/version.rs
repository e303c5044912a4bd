use ps_compiler::COMPILER_VERSION;

pub(crate) fn run_version() -> i32 {
    log::info!("PaperScript CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("PaperScript Compiler v{}", COMPILER_VERSION);
    0
}
