use crate::rule_set::RuleSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 声明构造器类型
///
/// 在提取阶段由调用名一次性确定，下游只匹配枚举，不再比较字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// `style({...})`
    Style,
    /// `createThemeContract({...})`
    ThemeContract,
    /// `createTheme(contract, {...})`
    ThemeInstance,
}

impl DeclarationKind {
    /// 根据调用名识别构造器，未识别返回 None
    pub fn from_callee(name: &str) -> Option<Self> {
        match name {
            "style" => Some(DeclarationKind::Style),
            "createThemeContract" => Some(DeclarationKind::ThemeContract),
            "createTheme" => Some(DeclarationKind::ThemeInstance),
            _ => None,
        }
    }

    /// 对应的源码调用名
    pub fn callee(&self) -> &'static str {
        match self {
            DeclarationKind::Style => "style",
            DeclarationKind::ThemeContract => "createThemeContract",
            DeclarationKind::ThemeInstance => "createTheme",
        }
    }
}

/// 一个声明：对应源码中的一个顶层绑定，输出为一组 CSS 块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// 绑定名，同时作为类名
    pub name: String,
    pub kind: DeclarationKind,
    /// 基础规则
    pub rules: RuleSet,
    /// 选择器模板（含 `&`）-> 规则
    pub selectors: IndexMap<String, RuleSet>,
    /// 媒体查询条件 -> 规则
    pub media: IndexMap<String, RuleSet>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: RuleSet::new(),
            selectors: IndexMap::new(),
            media: IndexMap::new(),
        }
    }

    /// 渲染用的类选择器 `.name`
    pub fn class_selector(&self) -> String {
        format!(".{}", self.name)
    }

    /// 所有规则组都为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.selectors.is_empty() && self.media.is_empty()
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }
}

/// Warning：单个属性被省略；Error：整个声明的参数无法使用（仍不中断编译）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_callee() {
        assert_eq!(DeclarationKind::from_callee("style"), Some(DeclarationKind::Style));
        assert_eq!(
            DeclarationKind::from_callee("createThemeContract"),
            Some(DeclarationKind::ThemeContract)
        );
        assert_eq!(
            DeclarationKind::from_callee("createTheme"),
            Some(DeclarationKind::ThemeInstance)
        );
        assert_eq!(DeclarationKind::from_callee("globalStyle"), None);
        assert_eq!(DeclarationKind::from_callee("Style"), None);
    }

    #[test]
    fn test_kind_callee_roundtrip() {
        for kind in [
            DeclarationKind::Style,
            DeclarationKind::ThemeContract,
            DeclarationKind::ThemeInstance,
        ] {
            assert_eq!(DeclarationKind::from_callee(kind.callee()), Some(kind));
        }
    }

    #[test]
    fn test_new_declaration_is_empty() {
        let decl = Declaration::new("button", DeclarationKind::Style);
        assert!(decl.is_empty());
        assert_eq!(decl.class_selector(), ".button");
    }
}
