#![cfg(target_arch = "wasm32")]

use crosswind_wasm::{compile_stylesheet, derive_css_output_path};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize)]
struct Output {
    css: String,
}

#[wasm_bindgen_test]
fn compiles_with_default_options() {
    let Ok(value) = compile_stylesheet(
        r#"export const one = style({ color: "red", fontSize: "12px" });"#,
        "one.css.ts",
        JsValue::UNDEFINED,
    ) else {
        panic!("compileStylesheet failed");
    };

    let output: Output = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(output.css, ".one {\n  color: red;\n  font-size: 12px;\n}\n");
}

#[wasm_bindgen_test]
fn rejects_unparsable_source() {
    assert!(compile_stylesheet("const = style({", "broken.css.ts", JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn derives_output_path() {
    assert_eq!(derive_css_output_path("button.css.ts"), "button.module.css");
}
