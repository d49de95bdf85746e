/// 编译错误
///
/// 只有拿不到语法树才是致命错误；单个声明的问题降级为 Diagnostic。
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to parse {filename}: {message}")]
    Parse { filename: String, message: String },
}
