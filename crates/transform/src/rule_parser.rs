use crate::extractor::{unwrap_expr, StyleCall};
use crosswind_core::normalize::{custom_property_name, format_number, format_numeric_value, kebab_case};
use crosswind_core::{Declaration, DeclarationKind, Diagnostic, RuleSet, ThemeContract};
use indexmap::IndexMap;
use std::fmt;
use swc_core::ecma::ast::*;

/// 保留键：选择器分组
const SELECTORS_KEY: &str = "selectors";
/// 保留键：媒体查询分组
const MEDIA_KEY: &str = "@media";

/// 字面量值
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Num(f64),
    Null,
}

/// 模板字符串片段
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Reference(Vec<String>),
}

/// 属性值的形态，每个属性只分类一次
#[derive(Debug)]
pub enum ValueShape<'a> {
    Literal(LiteralValue),
    Object(&'a ObjectLit),
    /// 成员访问链，如 `vars.back.color` → ["vars", "back", "color"]
    Reference(Vec<String>),
    Template(Vec<TemplatePart>),
    Unsupported,
}

impl<'a> ValueShape<'a> {
    pub fn classify(expr: &'a Expr) -> Self {
        match unwrap_expr(expr) {
            Expr::Lit(Lit::Str(s)) => ValueShape::Literal(LiteralValue::Str(str_value(s))),
            Expr::Lit(Lit::Num(n)) => ValueShape::Literal(LiteralValue::Num(n.value)),
            Expr::Lit(Lit::Null(_)) => ValueShape::Literal(LiteralValue::Null),
            // `-4` 在 AST 中是一元表达式
            Expr::Unary(UnaryExpr {
                op: UnaryOp::Minus,
                arg,
                ..
            }) => match unwrap_expr(arg) {
                Expr::Lit(Lit::Num(n)) => ValueShape::Literal(LiteralValue::Num(-n.value)),
                _ => ValueShape::Unsupported,
            },
            Expr::Object(obj) => ValueShape::Object(obj),
            Expr::Member(member) => match member_path(member) {
                Some(path) => ValueShape::Reference(path),
                None => ValueShape::Unsupported,
            },
            Expr::Tpl(tpl) => classify_template(tpl),
            _ => ValueShape::Unsupported,
        }
    }
}

fn classify_template(tpl: &Tpl) -> ValueShape<'_> {
    // 无插值模板等同字符串字面量
    if tpl.exprs.is_empty() {
        let text = tpl.quasis.iter().map(quasi_text).collect::<String>();
        return ValueShape::Literal(LiteralValue::Str(text));
    }

    let mut parts = Vec::new();
    for (i, quasi) in tpl.quasis.iter().enumerate() {
        let text = quasi_text(quasi);
        if !text.is_empty() {
            parts.push(TemplatePart::Text(text));
        }
        let Some(expr) = tpl.exprs.get(i) else {
            continue;
        };
        match unwrap_expr(expr) {
            Expr::Member(member) => match member_path(member) {
                Some(path) => parts.push(TemplatePart::Reference(path)),
                None => return ValueShape::Unsupported,
            },
            Expr::Lit(Lit::Str(s)) => parts.push(TemplatePart::Text(str_value(s))),
            Expr::Lit(Lit::Num(n)) => parts.push(TemplatePart::Text(format_number(n.value))),
            _ => return ValueShape::Unsupported,
        }
    }
    ValueShape::Template(parts)
}

/// 模板片段文本：取转义处理后的值，与字符串字面量一致
///
/// 含非法转义时 cooked 为空，退回原始文本
fn quasi_text(quasi: &TplElement) -> String {
    quasi
        .cooked
        .as_ref()
        .and_then(|cooked| cooked.as_str())
        .unwrap_or(&*quasi.raw)
        .to_string()
}

/// 提取成员访问链
///
/// 支持 `a.b.c` 以及字面量下标 `a.space['2x']`，其他形式返回 None
fn member_path(member: &MemberExpr) -> Option<Vec<String>> {
    let mut path = match unwrap_expr(&member.obj) {
        Expr::Ident(ident) => vec![ident.sym.to_string()],
        Expr::Member(inner) => member_path(inner)?,
        _ => return None,
    };

    let segment = match &member.prop {
        MemberProp::Ident(name) => name.sym.to_string(),
        MemberProp::Computed(computed) => match unwrap_expr(&computed.expr) {
            Expr::Lit(Lit::Str(s)) => str_value(s),
            Expr::Lit(Lit::Num(n)) => format_number(n.value),
            _ => return None,
        },
        _ => return None,
    };
    path.push(segment);
    Some(path)
}

/// 从 Str 节点提取字符串值
fn str_value(s: &Str) -> String {
    s.value.as_str().unwrap_or_default().to_string()
}

/// 对象键名，计算属性键不支持
fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(str_value(s)),
        PropName::Num(n) => Some(format_number(n.value)),
        _ => None,
    }
}

/// 值无法输出的原因
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// 合约中不存在该路径
    Unresolved(String),
    NestedObject,
    Unsupported,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unresolved(path) if path.is_empty() => {
                write!(f, "reference does not name a contract variable")
            }
            SkipReason::Unresolved(path) => {
                write!(f, "unresolved theme contract reference `{}`", path)
            }
            SkipReason::NestedObject => write!(f, "nested object is not allowed here"),
            SkipReason::Unsupported => write!(f, "unsupported value expression"),
        }
    }
}

/// 规则解析器
///
/// 将一个构造器调用的对象字面量解析为 Declaration，
/// 合约声明写入注册表，主题实例覆盖注册表中的值，样式声明从注册表解析引用。
pub struct RuleParser<'a> {
    contract: &'a mut ThemeContract,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> RuleParser<'a> {
    pub fn new(contract: &'a mut ThemeContract, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            contract,
            diagnostics,
        }
    }

    /// 解析一个调用；参数形态不正确时返回空声明并记录诊断
    pub fn parse(&mut self, call: &StyleCall) -> Declaration {
        let mut declaration = Declaration::new(call.name.clone(), call.kind);

        match call.kind {
            DeclarationKind::Style => match call.first_arg() {
                Some(Expr::Object(obj)) => self.parse_style(&mut declaration, obj),
                Some(Expr::Array(_)) => {
                    self.reject(&declaration, "style composition from an array is not supported");
                }
                Some(_) => self.reject(&declaration, "argument is not an object literal"),
                None => self.reject(&declaration, "missing style object"),
            },
            DeclarationKind::ThemeContract => {
                self.contract.register_binding(call.name.clone());
                match call.object_arg() {
                    Some(obj) => self.parse_theme(&mut declaration, obj),
                    None => self.reject(&declaration, "missing contract object"),
                }
            }
            DeclarationKind::ThemeInstance => match call.object_arg() {
                Some(obj) => self.parse_theme(&mut declaration, obj),
                None => self.reject(&declaration, "missing theme values object"),
            },
        }

        tracing::debug!(
            name = %declaration.name,
            kind = declaration.kind.callee(),
            rules = declaration.rules.len(),
            selectors = declaration.selectors.len(),
            media = declaration.media.len(),
            "parsed declaration"
        );
        declaration
    }

    fn parse_style(&mut self, declaration: &mut Declaration, obj: &ObjectLit) {
        for (key, value) in self.properties(&declaration.name, obj) {
            match key.as_str() {
                SELECTORS_KEY => {
                    declaration.selectors = self.parse_groups(&declaration.name, &key, value);
                }
                MEDIA_KEY => {
                    declaration.media = self.parse_groups(&declaration.name, &key, value);
                }
                _ => {
                    let shape = ValueShape::classify(value);
                    match self.resolve_value(&key, &shape) {
                        Ok(text) => declaration.rules.set(kebab_case(&key), text),
                        Err(reason) => self.skip(&declaration.name, &key, reason),
                    }
                }
            }
        }
    }

    /// 解析 `selectors` / `@media` 的值：键为选择器模板或媒体条件，值为一层规则
    fn parse_groups(&mut self, name: &str, key: &str, value: &Expr) -> IndexMap<String, RuleSet> {
        let mut groups = IndexMap::new();

        let ValueShape::Object(obj) = ValueShape::classify(value) else {
            self.push_warning(format!("`{}` in `{}` must be an object literal", key, name));
            return groups;
        };

        for (group_key, group_value) in self.properties(name, obj) {
            let ValueShape::Object(group_obj) = ValueShape::classify(group_value) else {
                self.push_warning(format!(
                    "`{}` in `{}` must map to an object literal",
                    group_key, name
                ));
                continue;
            };

            let mut rules = RuleSet::new();
            for (property, rule_value) in self.properties(name, group_obj) {
                let shape = ValueShape::classify(rule_value);
                match self.resolve_value(&property, &shape) {
                    Ok(text) => rules.set(kebab_case(&property), text),
                    Err(reason) => self.skip(name, &property, reason),
                }
            }
            groups.insert(group_key, rules);
        }

        groups
    }

    /// 合约 / 主题实例：规则键为 `--` 自定义属性，同时写入注册表
    fn parse_theme(&mut self, declaration: &mut Declaration, obj: &ObjectLit) {
        for (key, value) in self.properties(&declaration.name, obj) {
            match ValueShape::classify(value) {
                ValueShape::Object(nested) => {
                    for (inner_key, inner_value) in self.properties(&declaration.name, nested) {
                        let path = format!("{}.{}", key, inner_key);
                        let shape = ValueShape::classify(inner_value);
                        self.theme_var(declaration, &path, &inner_key, &shape);
                    }
                }
                shape => self.theme_var(declaration, &key, &key, &shape),
            }
        }
    }

    fn theme_var(
        &mut self,
        declaration: &mut Declaration,
        path: &str,
        property: &str,
        shape: &ValueShape<'_>,
    ) {
        let text = match self.resolve_value(property, shape) {
            Ok(text) => text,
            Err(reason) => {
                self.skip(&declaration.name, path, reason);
                return;
            }
        };

        match declaration.kind {
            DeclarationKind::ThemeContract => self.contract.declare(path, text.clone()),
            _ => {
                if !self.contract.instantiate(path, text.clone()) {
                    tracing::debug!(
                        theme = %declaration.name,
                        path,
                        "theme value has no matching contract variable in this file"
                    );
                }
            }
        }
        declaration.rules.set(custom_property_name(path), text);
    }

    /// 将值形态渲染为 CSS 值文本
    fn resolve_value(&self, property: &str, shape: &ValueShape<'_>) -> Result<String, SkipReason> {
        match shape {
            ValueShape::Literal(LiteralValue::Str(s)) => Ok(s.clone()),
            ValueShape::Literal(LiteralValue::Num(n)) => Ok(format_numeric_value(property, *n)),
            ValueShape::Literal(LiteralValue::Null) => Ok(String::new()),
            ValueShape::Reference(segments) => self.resolve_reference(segments),
            ValueShape::Template(parts) => {
                let mut text = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Text(t) => text.push_str(t),
                        TemplatePart::Reference(segments) => {
                            text.push_str(&self.resolve_reference(segments)?)
                        }
                    }
                }
                Ok(text)
            }
            ValueShape::Object(_) => Err(SkipReason::NestedObject),
            ValueShape::Unsupported => Err(SkipReason::Unsupported),
        }
    }

    fn resolve_reference(&self, segments: &[String]) -> Result<String, SkipReason> {
        let path = contract_path(self.contract, segments);
        self.contract
            .resolve(&path)
            .ok_or(SkipReason::Unresolved(path))
    }

    /// 遍历对象的 key-value 属性；展开、简写、方法和计算键记录诊断后跳过
    fn properties<'o>(&mut self, name: &str, obj: &'o ObjectLit) -> Vec<(String, &'o Expr)> {
        let mut props = Vec::with_capacity(obj.props.len());
        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                self.push_warning(format!("spread in `{}` is not supported", name));
                continue;
            };
            let Prop::KeyValue(kv) = prop.as_ref() else {
                self.push_warning(format!(
                    "only `key: value` properties are supported in `{}`",
                    name
                ));
                continue;
            };
            match prop_key(&kv.key) {
                Some(key) => props.push((key, kv.value.as_ref())),
                None => {
                    self.push_warning(format!("computed key in `{}` is not supported", name))
                }
            }
        }
        props
    }

    fn skip(&mut self, name: &str, property: &str, reason: SkipReason) {
        tracing::warn!(declaration = name, property, "{}, property omitted", reason);
        self.diagnostics.push(Diagnostic::warning(format!(
            "`{}.{}`: {}, property omitted",
            name, property, reason
        )));
    }

    /// 参数形态不正确：整个声明输出为空块
    fn reject(&mut self, declaration: &Declaration, message: &str) {
        let message = format!(
            "`{}` ({}): {}",
            declaration.name,
            declaration.kind.callee(),
            message
        );
        tracing::warn!("{}", message);
        self.diagnostics.push(Diagnostic::error(message));
    }

    fn push_warning(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.diagnostics.push(Diagnostic::warning(message));
    }
}

/// 成员访问链 → 合约路径
///
/// 丢弃包含 "theme" / "contract"（忽略大小写）的片段，
/// 以及作为根标识符的合约绑定名。
///
/// 合约键名本身含 "theme" / "contract" 时（如 `themeColor`），引用一侧该片段
/// 同样会被丢弃，因此这类键永远无法解析。
fn contract_path(contract: &ThemeContract, segments: &[String]) -> String {
    segments
        .iter()
        .enumerate()
        .filter(|(i, segment)| !(*i == 0 && contract.is_binding(segment)))
        .map(|(_, segment)| segment)
        .filter(|segment| {
            let lower = segment.to_lowercase();
            !lower.contains("theme") && !lower.contains("contract")
        })
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(".")
}
