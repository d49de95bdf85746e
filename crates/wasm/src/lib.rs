use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crosswind_core::{Declaration, Diagnostic, DiagnosticLevel, RuleSet};
use crosswind_transform::{
    compile_source as rs_compile_source,
    derive_css_output_path as rs_derive_css_output_path,
    CompileOptions, CompileResult,
};

// ── JS 侧 serde 镜像类型 ──────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsCompileOptions {
    #[serde(default)]
    indent: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsCompileResult {
    css: String,
    declarations: Vec<JsDeclaration>,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDeclaration {
    name: String,
    /// 构造器名：style / createTheme / createThemeContract
    kind: &'static str,
    class_name: String,
    rules: IndexMap<String, String>,
    selectors: IndexMap<String, IndexMap<String, String>>,
    media: IndexMap<String, IndexMap<String, String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    level: &'static str,
    message: String,
}

// ── 类型转换 ──────────────────────────────────────────────────

impl From<JsCompileOptions> for CompileOptions {
    fn from(opts: JsCompileOptions) -> Self {
        let defaults = CompileOptions::default();
        CompileOptions {
            indent: opts.indent.unwrap_or(defaults.indent),
        }
    }
}

fn rules_map(rules: &RuleSet) -> IndexMap<String, String> {
    rules
        .iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

fn groups_map(groups: &IndexMap<String, RuleSet>) -> IndexMap<String, IndexMap<String, String>> {
    groups
        .iter()
        .map(|(key, rules)| (key.clone(), rules_map(rules)))
        .collect()
}

impl From<&Declaration> for JsDeclaration {
    fn from(decl: &Declaration) -> Self {
        JsDeclaration {
            name: decl.name.clone(),
            kind: decl.kind.callee(),
            class_name: decl.name.clone(),
            rules: rules_map(&decl.rules),
            selectors: groups_map(&decl.selectors),
            media: groups_map(&decl.media),
        }
    }
}

impl From<Diagnostic> for JsDiagnostic {
    fn from(d: Diagnostic) -> Self {
        JsDiagnostic {
            level: match d.level {
                DiagnosticLevel::Warning => "warning",
                DiagnosticLevel::Error => "error",
            },
            message: d.message,
        }
    }
}

impl From<CompileResult> for JsCompileResult {
    fn from(result: CompileResult) -> Self {
        JsCompileResult {
            declarations: result.declarations.iter().map(JsDeclaration::from).collect(),
            diagnostics: result.diagnostics.into_iter().map(JsDiagnostic::from).collect(),
            css: result.css,
        }
    }
}

fn parse_options(options: JsValue) -> Result<JsCompileOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(JsCompileOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

fn serialize_result(result: CompileResult) -> Result<JsValue, JsError> {
    let js_result = JsCompileResult::from(result);
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    js_result.serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── WASM 导出函数 ─────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 编译样式源码
///
/// @param source   - 样式源码字符串（如 `button.css.ts` 的内容）
/// @param filename - 文件名，用于判断语法
/// @param options  - 编译选项 `{ indent? }`，可选
/// @returns `{ css, declarations, diagnostics }`
#[wasm_bindgen(js_name = "compileStylesheet")]
pub fn compile_stylesheet(
    source: &str,
    filename: &str,
    options: JsValue,
) -> Result<JsValue, JsError> {
    let opts = parse_options(options)?;
    let result = rs_compile_source(source, filename, &opts.into())
        .map_err(|e| JsError::new(&e.to_string()))?;
    serialize_result(result)
}

/// 推导 CSS 输出路径，如 `button.css.ts` → `button.module.css`
#[wasm_bindgen(js_name = "deriveCssOutputPath")]
pub fn derive_css_output_path(filename: &str) -> String {
    rs_derive_css_output_path(filename)
}
