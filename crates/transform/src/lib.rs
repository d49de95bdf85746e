pub mod error;
pub mod extractor;
pub mod rule_parser;

use crosswind_core::{Declaration, Diagnostic, Stylesheet, ThemeContract, DEFAULT_INDENT};
use serde::{Deserialize, Serialize};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::*;
use swc_core::ecma::parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};

// Re-exports
pub use crosswind_core::{DeclarationKind, DiagnosticLevel, RuleSet};
pub use error::CompileError;
pub use extractor::{extract_declarations, StyleCall};
pub use rule_parser::RuleParser;

/// 编译选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// 一级缩进（默认两个空格）
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

/// 编译结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    /// 生成的 CSS
    pub css: String,
    /// 按源码顺序的声明
    pub declarations: Vec<Declaration>,
    /// 被降级处理的问题（未解析的引用、不支持的参数形态等）
    pub diagnostics: Vec<Diagnostic>,
}

/// 编译源码为 CSS
///
/// 解析失败是唯一的致命错误；单个声明的问题只会记录到 `diagnostics`。
///
/// # 参数
///
/// - `source`: 样式源码（如 `button.css.ts` 的内容）
/// - `filename`: 文件名（用于判断语法类型：.ts/.tsx/.js/.jsx）
/// - `options`: 编译选项
///
/// # 示例
///
/// ```no_run
/// use crosswind_transform::{compile_source, CompileOptions};
///
/// let source = r#"
///     export const one = style({ color: "red", fontSize: "12px" });
/// "#;
///
/// let result = compile_source(source, "one.css.ts", &CompileOptions::default()).unwrap();
/// println!("CSS:\n{}", result.css);
/// ```
pub fn compile_source(
    source: &str,
    filename: &str,
    options: &CompileOptions,
) -> Result<CompileResult, CompileError> {
    let module = parse_module(source, filename)?;
    Ok(compile_module(&module, options))
}

/// 编译已解析的模块
///
/// 单遍处理：按源码顺序提取声明，合约注册表随合约声明增量填充，
/// 后续声明中的引用只能解析到已出现的合约变量。
pub fn compile_module(module: &Module, options: &CompileOptions) -> CompileResult {
    let calls = extract_declarations(module);

    let mut contract = ThemeContract::new();
    let mut diagnostics = Vec::new();
    let mut stylesheet = Stylesheet::new();

    for call in &calls {
        let mut parser = RuleParser::new(&mut contract, &mut diagnostics);
        stylesheet.push(parser.parse(call));
    }

    let css = stylesheet.to_css(&options.indent);

    tracing::debug!(
        declarations = stylesheet.len(),
        contract_vars = contract.len(),
        diagnostics = diagnostics.len(),
        "compiled stylesheet"
    );

    CompileResult {
        css,
        declarations: stylesheet.into_declarations(),
        diagnostics,
    }
}

/// 解析源码为 SWC Module
pub fn parse_module(source: &str, filename: &str) -> Result<Module, CompileError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom(filename.to_string()).into(),
        source.to_string(),
    );

    let parse_error = |message: String| CompileError::Parse {
        filename: filename.to_string(),
        message,
    };

    let mut errors = vec![];
    let module = parse_file_as_module(
        &fm,
        syntax_for(filename),
        EsVersion::latest(),
        None,
        &mut errors,
    )
    .map_err(|e| parse_error(format!("{:?}", e.kind())))?;

    // 可恢复的语法错误同样视为失败，不做部分编译
    if let Some(e) = errors.first() {
        return Err(parse_error(format!("{:?}", e.kind())));
    }

    Ok(module)
}

/// 根据文件名选择语法
fn syntax_for(filename: &str) -> Syntax {
    if filename.ends_with(".tsx") {
        Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        })
    } else if filename.ends_with(".ts") || filename.ends_with(".mts") || filename.ends_with(".cts")
    {
        Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        })
    } else {
        // .jsx / .js 默认支持 JSX
        Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        })
    }
}

/// 推导同目录下的 CSS 输出路径
///
/// - `button.css.ts` → `button.module.css`
/// - `src/theme.ts` → `src/theme.module.css`
pub fn derive_css_output_path(filename: &str) -> String {
    let (dir, base) = match filename.rsplit_once('/') {
        Some((dir, base)) => (Some(dir), base),
        None => (None, filename),
    };
    let stem = base.rsplit_once('.').map(|(name, _)| name).unwrap_or(base);
    let stem = stem.strip_suffix(".css").unwrap_or(stem);

    match dir {
        Some(dir) => format!("{}/{}.module.css", dir, stem),
        None => format!("{}.module.css", stem),
    }
}
