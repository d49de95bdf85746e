use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 有序的 CSS 规则集合
///
/// - 属性名唯一，后写覆盖前写
/// - 保持首次插入的顺序（使用 IndexMap）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: IndexMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置规则，属性已存在时覆盖值但保留原位置
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.rules.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.rules.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.rules.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RuleSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (property, value) in iter {
            set.set(property, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_override() {
        let mut rules = RuleSet::new();
        rules.set("padding", "1px");
        rules.set("padding", "2px");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get("padding"), Some("2px"));
    }

    #[test]
    fn test_set_no_conflict() {
        let mut rules = RuleSet::new();
        rules.set("padding", "1px");
        rules.set("margin", "0");
        let props: Vec<&str> = rules.iter().map(|(p, _)| p).collect();
        assert_eq!(props, vec!["padding", "margin"]);
    }

    #[test]
    fn test_override_keeps_first_position() {
        let rules: RuleSet = vec![
            ("padding", "1px"),
            ("margin", "0"),
            ("padding", "2px"),
            ("margin", "auto"),
        ]
        .into_iter()
        .collect();

        let pairs: Vec<(&str, &str)> = rules.iter().collect();
        // IndexMap 保持首次插入的顺序
        assert_eq!(pairs, vec![("padding", "2px"), ("margin", "auto")]);
    }
}
