use crosswind_core::DeclarationKind;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{Visit, VisitWith};

/// 一个被识别的构造器调用：`const <name> = <callee>(<args>)`
#[derive(Debug, Clone)]
pub struct StyleCall {
    /// 绑定名
    pub name: String,
    pub kind: DeclarationKind,
    pub args: Vec<ExprOrSpread>,
}

impl StyleCall {
    /// 第一个对象字面量参数
    ///
    /// `createTheme(vars, {...})` 的第一个参数是合约引用，会被跳过
    pub fn object_arg(&self) -> Option<&ObjectLit> {
        self.args
            .iter()
            .filter(|arg| arg.spread.is_none())
            .find_map(|arg| match unwrap_expr(&arg.expr) {
                Expr::Object(obj) => Some(obj),
                _ => None,
            })
    }

    /// 第一个参数（去掉括号和 TS 类型断言）
    pub fn first_arg(&self) -> Option<&Expr> {
        self.args.first().map(|arg| unwrap_expr(&arg.expr))
    }
}

/// 按源码顺序提取顶层（含 export）绑定中的 `style` / `createTheme` / `createThemeContract` 调用
pub fn extract_declarations(module: &Module) -> Vec<StyleCall> {
    let mut visitor = DeclarationVisitor { calls: Vec::new() };
    module.visit_with(&mut visitor);
    visitor.calls
}

struct DeclarationVisitor {
    calls: Vec<StyleCall>,
}

impl Visit for DeclarationVisitor {
    /// 只处理模块顶层的 `const` / `let` / `var` 以及 `export` 变量声明，
    /// 不进入块、函数体和类体
    fn visit_module_item(&mut self, item: &ModuleItem) {
        let var = match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Var(var),
                ..
            })) => var,
            _ => return,
        };
        for declarator in &var.decls {
            self.visit_var_declarator(declarator);
        }
    }

    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        let Pat::Ident(binding) = &n.name else {
            return;
        };
        let Some(init) = &n.init else {
            return;
        };
        let name = binding.id.sym.to_string();

        let Expr::Call(call) = unwrap_expr(init) else {
            tracing::trace!(binding = %name, "initializer is not a call, skipped");
            return;
        };

        match callee_name(&call.callee).and_then(DeclarationKind::from_callee) {
            Some(kind) => self.calls.push(StyleCall {
                name,
                kind,
                args: call.args.clone(),
            }),
            None => {
                tracing::trace!(binding = %name, "unrecognized callee, skipped");
            }
        }
    }
}

/// 调用名，仅支持标识符形式的 callee
fn callee_name(callee: &Callee) -> Option<&str> {
    match callee {
        Callee::Expr(expr) => match unwrap_expr(expr) {
            Expr::Ident(ident) => Some(&*ident.sym),
            _ => None,
        },
        _ => None,
    }
}

/// 去掉括号、`as` / `satisfies` / `as const` / 非空断言包装
pub(crate) fn unwrap_expr(mut expr: &Expr) -> &Expr {
    loop {
        expr = match expr {
            Expr::Paren(paren) => &*paren.expr,
            Expr::TsAs(ts_as) => &*ts_as.expr,
            Expr::TsSatisfies(ts_satisfies) => &*ts_satisfies.expr,
            Expr::TsConstAssertion(assertion) => &*assertion.expr,
            Expr::TsNonNull(non_null) => &*non_null.expr,
            _ => return expr,
        };
    }
}
