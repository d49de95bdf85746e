use crate::rule_set::RuleSet;
use crate::types::Declaration;
use indexmap::IndexMap;

/// 默认缩进
pub const DEFAULT_INDENT: &str = "  ";

/// 按源码顺序收集的声明
///
/// 同名声明后者覆盖前者，位置保持首次出现的位置。
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    declarations: IndexMap<String, Declaration>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations
            .insert(declaration.name.clone(), declaration);
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// 生成 CSS 文本
    pub fn to_css(&self, indent: &str) -> String {
        render_stylesheet(self.iter(), indent)
    }

    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations.into_values().collect()
    }
}

/// 将声明序列渲染为 CSS
///
/// 每个块以 `}\n` 结尾，块之间空一行。
/// 单个声明内的顺序：基础块 → 选择器块 → 媒体查询块。
pub fn render_stylesheet<'a, I>(declarations: I, indent: &str) -> String
where
    I: IntoIterator<Item = &'a Declaration>,
{
    let mut blocks = Vec::new();
    for declaration in declarations {
        render_declaration(declaration, indent, &mut blocks);
    }
    blocks.join("\n")
}

/// 渲染单个声明的所有块
pub fn render_declaration(declaration: &Declaration, indent: &str, blocks: &mut Vec<String>) {
    let class_selector = declaration.class_selector();

    // 基础规则块，空规则也输出
    blocks.push(render_block(&class_selector, &declaration.rules, indent, ""));

    // 选择器块：`&` 替换为类选择器
    for (template, rules) in &declaration.selectors {
        let selector = template.replace('&', &class_selector);
        blocks.push(render_block(&selector, rules, indent, ""));
    }

    // 媒体查询块
    for (condition, rules) in &declaration.media {
        let mut css = format!("@media {} {{\n", condition);
        css.push_str(&render_block(&class_selector, rules, indent, indent));
        css.push_str("}\n");
        blocks.push(css);
    }
}

fn render_block(selector: &str, rules: &RuleSet, indent: &str, base_indent: &str) -> String {
    let mut css = format!("{}{} {{\n", base_indent, selector);
    for (property, value) in rules.iter() {
        css.push_str(&format!(
            "{}{}{}: {};\n",
            base_indent, indent, property, value
        ));
    }
    css.push_str(&format!("{}}}\n", base_indent));
    css
}
