use crate::normalize::var_reference;
use indexmap::{IndexMap, IndexSet};

/// 合约中的一个变量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractVar {
    /// `createThemeContract` 中声明的占位值（通常为空）
    pub placeholder: String,
    /// 最近一次 `createTheme` 覆盖的具体值
    pub value: Option<String>,
}

/// 主题合约注册表
///
/// 单次编译内按源码顺序增量填充，供后续声明解析 `vars.xxx` 引用。
/// 不支持前向引用：引用出现在合约声明之前时解析失败。
#[derive(Debug, Clone, Default)]
pub struct ThemeContract {
    /// 点号路径 -> 变量
    vars: IndexMap<String, ContractVar>,
    /// 绑定到合约声明的标识符（如 `vars`）
    bindings: IndexSet<String>,
}

impl ThemeContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册变量路径，重复注册时以最后一次的占位值为准
    pub fn declare(&mut self, path: impl Into<String>, placeholder: impl Into<String>) {
        self.vars.insert(
            path.into(),
            ContractVar {
                placeholder: placeholder.into(),
                value: None,
            },
        );
    }

    /// 为已声明的路径覆盖具体值
    ///
    /// 不会新增变量名；路径未声明时返回 false
    pub fn instantiate(&mut self, path: &str, value: impl Into<String>) -> bool {
        match self.vars.get_mut(path) {
            Some(var) => {
                var.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// 解析为 `var(--kebab-path)`，未声明返回 None
    pub fn resolve(&self, path: &str) -> Option<String> {
        self.vars.get(path).map(|_| var_reference(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.vars.contains_key(path)
    }

    /// 当前渲染值：优先具体值，否则为占位值
    pub fn value(&self, path: &str) -> Option<&str> {
        self.vars
            .get(path)
            .map(|var| var.value.as_deref().unwrap_or(var.placeholder.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// 记录合约声明的绑定名，引用路径解析时会跳过该根标识符
    pub fn register_binding(&mut self, name: impl Into<String>) {
        self.bindings.insert(name.into());
    }

    pub fn is_binding(&self, name: &str) -> bool {
        self.bindings.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut contract = ThemeContract::new();
        contract.declare("color", "");
        contract.declare("back.backgroundColor", "");

        assert_eq!(contract.resolve("color").as_deref(), Some("var(--color)"));
        assert_eq!(
            contract.resolve("back.backgroundColor").as_deref(),
            Some("var(--back-background-color)")
        );
        assert_eq!(contract.len(), 2);
    }

    #[test]
    fn test_resolve_undeclared() {
        let contract = ThemeContract::new();
        assert!(contract.is_empty());
        assert_eq!(contract.resolve("color"), None);
    }

    #[test]
    fn test_instantiate_overlays_value() {
        let mut contract = ThemeContract::new();
        contract.declare("color", "");
        assert_eq!(contract.value("color"), Some(""));

        assert!(contract.instantiate("color", "red"));
        assert_eq!(contract.value("color"), Some("red"));
        // 路径集合不变
        assert_eq!(contract.paths().collect::<Vec<_>>(), vec!["color"]);
    }

    #[test]
    fn test_instantiate_does_not_add_names() {
        let mut contract = ThemeContract::new();
        contract.declare("color", "");

        assert!(!contract.instantiate("spacing", "4px"));
        assert!(!contract.contains("spacing"));
        assert_eq!(contract.resolve("spacing"), None);
    }

    #[test]
    fn test_bindings() {
        let mut contract = ThemeContract::new();
        contract.register_binding("vars");
        assert!(contract.is_binding("vars"));
        assert!(!contract.is_binding("theme"));
    }
}
