/// 不追加 `px` 单位的属性（kebab 形式）
const UNITLESS_PROPERTIES: &[&str] = &["line-height"];

/// 驼峰属性名转 kebab-case
///
/// 每个大写字母（含 Latin-1 大写区间）替换为 `-` + 小写：
/// - "fontSize" → "font-size"
/// - "WebkitTransition" → "-webkit-transition"
/// - 已是 kebab-case 的输入原样返回
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if is_upper(c) {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase() || ('\u{C0}'..='\u{D6}').contains(&c) || ('\u{D8}'..='\u{DE}').contains(&c)
}

/// 数字格式化为 JS 风格文本（`10`、`1.5`、`-4`）
///
/// 绝对值不在 `[1e-6, 1e21)` 内时使用指数形式：`1e+21`、`1.5e-7`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // -0 同样输出 "0"
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// 数值规则值：默认追加 `px`，无单位属性保留裸数字
///
/// `property` 为原始属性名（驼峰或 kebab 均可）
pub fn format_numeric_value(property: &str, value: f64) -> String {
    let number = format_number(value);
    if is_unitless(property) {
        number
    } else {
        format!("{}px", number)
    }
}

pub fn is_unitless(property: &str) -> bool {
    let normalized = kebab_case(property);
    UNITLESS_PROPERTIES.contains(&normalized.as_str())
}

/// 合约路径转自定义属性名
///
/// - "color" → "--color"
/// - "back.backgroundColor" → "--back-background-color"
pub fn custom_property_name(path: &str) -> String {
    let segments: Vec<String> = path.split('.').map(kebab_case).collect();
    format!("--{}", segments.join("-"))
}

/// 合约路径转 `var(...)` 引用
pub fn var_reference(path: &str) -> String {
    format!("var({})", custom_property_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_camel() {
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("color"), "color");
    }

    #[test]
    fn test_kebab_case_vendor_prefix() {
        assert_eq!(kebab_case("WebkitTransition"), "-webkit-transition");
    }

    #[test]
    fn test_kebab_case_latin1_upper() {
        assert_eq!(kebab_case("fooÉtat"), "foo-état");
    }

    #[test]
    fn test_kebab_case_idempotent() {
        for name in ["font-size", "line-height", "--back-background-color", "color"] {
            assert_eq!(kebab_case(name), name);
            assert_eq!(kebab_case(&kebab_case(name)), kebab_case(name));
        }
        let once = kebab_case("borderTopLeftRadius");
        assert_eq!(kebab_case(&once), once);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn test_format_number_exponent_range() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        // 区间内保持十进制
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_numeric_value("width", 1e21), "1e+21px");
    }

    #[test]
    fn test_numeric_value_px() {
        assert_eq!(format_numeric_value("padding", 10.0), "10px");
        assert_eq!(format_numeric_value("fontSize", 12.5), "12.5px");
        assert_eq!(format_numeric_value("margin", 0.0), "0px");
    }

    #[test]
    fn test_numeric_value_line_height() {
        assert_eq!(format_numeric_value("lineHeight", 1.5), "1.5");
        assert_eq!(format_numeric_value("line-height", 2.0), "2");
    }

    #[test]
    fn test_only_line_height_is_unitless() {
        assert!(is_unitless("lineHeight"));
        assert!(!is_unitless("zIndex"));
        assert!(!is_unitless("opacity"));
    }

    #[test]
    fn test_custom_property_name() {
        assert_eq!(custom_property_name("color"), "--color");
        assert_eq!(
            custom_property_name("back.backgroundColor"),
            "--back-background-color"
        );
        assert_eq!(custom_property_name("space.2x"), "--space-2x");
    }

    #[test]
    fn test_var_reference() {
        assert_eq!(var_reference("color"), "var(--color)");
        assert_eq!(var_reference("fontSizes.bodyLarge"), "var(--font-sizes-body-large)");
    }
}
