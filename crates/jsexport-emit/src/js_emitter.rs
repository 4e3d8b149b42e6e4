use crate::config::EmitterConfig;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
use anyhow::Result;
use jsexport_core::js::{is_identifier, is_identifier_name};
use jsexport_core::{Expr, FunctionExpr, Stmt};
use std::io::Write;

/// Prints statement lists as JavaScript.
///
/// Multi-line constructs (descriptor objects, function bodies) are indented
/// relative to the line they start on, so nesting a forwarder inside a
/// descriptor inside a getter body stays readable.
pub struct JsEmitter {
    config: EmitterConfig,
}

impl JsEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Renders `statements` honouring `trailing_newline`.
    pub fn render(&self, statements: &[Stmt]) -> Result<String> {
        let mut buffer = Vec::new();
        let context = self.context();
        for statement in statements {
            self.emit_statement(statement, &mut buffer, &context)?;
        }
        let mut output = String::from_utf8(buffer)?;
        if !self.config.trailing_newline && output.ends_with('\n') {
            output.pop();
        }
        Ok(output)
    }

    pub fn expression_to_string(&self, expr: &Expr) -> String {
        self.expr_text(expr, &self.context(), 0)
    }

    pub fn emit_statement<W: Write>(
        &self,
        statement: &Stmt,
        writer: &mut W,
        context: &EmitContext,
    ) -> EmitResult {
        match statement {
            Stmt::Comment(text) => EmitHelper::write_comment(writer, context, text),
            Stmt::Export { .. } => EmitHelper::write_colored_line(
                writer,
                context,
                &self.statement_text(statement, context, 0),
                "magenta",
            ),
            _ => EmitHelper::write_line(writer, context, &self.statement_text(statement, context, 0)),
        }
    }

    fn statement_text(&self, statement: &Stmt, context: &EmitContext, depth: usize) -> String {
        match statement {
            Stmt::Expr(expr) => format!("{};", self.expr_text(expr, context, depth)),
            Stmt::VarDecl { kind, name, init } => match init {
                Some(init) => format!(
                    "{} {} = {};",
                    kind.keyword(),
                    name,
                    self.expr_text(init, context, depth)
                ),
                None => format!("{} {};", kind.keyword(), name),
            },
            Stmt::Return(Some(value)) => {
                format!("return {};", self.expr_text(value, context, depth))
            }
            Stmt::Return(None) => "return;".to_string(),
            Stmt::Export { local, alias } => {
                let alias = if is_identifier_name(alias) {
                    alias.clone()
                } else {
                    self.config.quote_style.literal(alias)
                };
                format!("export {{ {} as {} }};", local, alias)
            }
            Stmt::Comment(text) => format!("// {}", text),
        }
    }

    fn expr_text(&self, expr: &Expr, context: &EmitContext, depth: usize) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::This => "this".to_string(),
            Expr::Null => "null".to_string(),
            Expr::StringLit(value) => self.config.quote_style.literal(value),
            Expr::Member { object, property } => {
                format!("{}.{}", self.operand_text(object, context, depth), property)
            }
            Expr::Index { object, key } => format!(
                "{}[{}]",
                self.operand_text(object, context, depth),
                self.config.quote_style.literal(key)
            ),
            Expr::Assign { target, value } => format!(
                "{} = {}",
                self.expr_text(target, context, depth),
                self.expr_text(value, context, depth)
            ),
            Expr::Or { left, right } => format!(
                "{} || {}",
                self.operand_text(left, context, depth),
                self.operand_text(right, context, depth)
            ),
            Expr::Call { callee, arguments } => {
                let arguments: Vec<String> = arguments
                    .iter()
                    .map(|argument| self.expr_text(argument, context, depth))
                    .collect();
                format!(
                    "{}({})",
                    self.operand_text(callee, context, depth),
                    arguments.join(", ")
                )
            }
            Expr::Object(entries) => {
                let entries: Vec<(String, String)> = entries
                    .iter()
                    .map(|(key, value)| {
                        let key = if is_identifier(key) {
                            key.clone()
                        } else {
                            self.config.quote_style.literal(key)
                        };
                        (key, self.expr_text(value, context, depth + 1))
                    })
                    .collect();
                self.object_text(&entries, context, depth)
            }
            Expr::Function(function) => self.function_text(function, context, depth),
            Expr::DefineProperty {
                target,
                name,
                getter,
                setter,
            } => {
                let mut entries = vec![("configurable".to_string(), "true".to_string())];
                if let Some(getter) = getter {
                    entries.push(("get".to_string(), self.expr_text(getter, context, depth + 1)));
                }
                if let Some(setter) = setter {
                    entries.push(("set".to_string(), self.expr_text(setter, context, depth + 1)));
                }
                format!(
                    "Object.defineProperty({}, {}, {})",
                    self.expr_text(target, context, depth),
                    self.config.quote_style.literal(name),
                    self.object_text(&entries, context, depth)
                )
            }
        }
    }

    /// Operands of `.`, `[]`, `()` and `||` need parentheses around anything
    /// that binds looser than member access.
    fn operand_text(&self, expr: &Expr, context: &EmitContext, depth: usize) -> String {
        let text = self.expr_text(expr, context, depth);
        match expr {
            Expr::Assign { .. } | Expr::Or { .. } | Expr::Function(_) | Expr::Object(_) => {
                format!("({})", text)
            }
            _ => text,
        }
    }

    fn object_text(&self, entries: &[(String, String)], context: &EmitContext, depth: usize) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }
        let inner = context.indent_at(depth + 1);
        let lines: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}{}: {}", inner, key, value))
            .collect();
        format!("{{\n{}\n{}}}", lines.join(",\n"), context.indent_at(depth))
    }

    fn function_text(&self, function: &FunctionExpr, context: &EmitContext, depth: usize) -> String {
        let header = format!("function ({})", function.parameters.join(", "));
        if function.body.is_empty() {
            return format!("{} {{}}", header);
        }
        let inner = context.indent_at(depth + 1);
        let mut text = format!("{} {{", header);
        for statement in &function.body {
            text.push('\n');
            text.push_str(&inner);
            text.push_str(&self.statement_text(statement, context, depth + 1));
        }
        text.push('\n');
        text.push_str(&context.indent_at(depth));
        text.push('}');
        text
    }
}

impl Default for JsEmitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl Emitter for JsEmitter {
    type Item = Vec<Stmt>;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        for statement in item {
            self.emit_statement(statement, writer, context)?;
        }
        Ok(())
    }

    fn context(&self) -> EmitContext {
        EmitContext::from_config(&self.config)
    }
}
