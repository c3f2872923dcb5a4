//! Prefix-notation dumps of expression trees
//!
//! `a - b - c` dumps as `(- (- a b) c)`, which makes nesting visible at a
//! glance. Type-ids are shown in angle brackets using their source form.

use super::expressions::*;
use super::ops::BinaryOp;

impl Expression {
    /// Render the tree as an s-expression
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        write_sexpr(self, &mut out);
        out
    }
}

fn write_all(items: &[Expression], out: &mut String) {
    for item in items {
        out.push(' ');
        write_sexpr(item, out);
    }
}

fn write_initializer(initializer: &Initializer, out: &mut String) {
    match initializer {
        Initializer::Parens(_) => out.push_str("(args"),
        Initializer::Braced(_) => out.push_str("(braced"),
    }
    write_all(initializer.arguments(), out);
    out.push(')');
}

fn write_sexpr(expr: &Expression, out: &mut String) {
    match &expr.kind {
        ExpressionKind::Literal(literal) => out.push_str(&literal.text),
        ExpressionKind::Id(id) => out.push_str(&id.to_string()),
        ExpressionKind::This => out.push_str("this"),
        ExpressionKind::Paren(inner) => {
            out.push_str("(paren ");
            write_sexpr(inner, out);
            out.push(')');
        }
        ExpressionKind::Unary { op, operand } => {
            out.push('(');
            if op.is_postfix() {
                out.push_str("post");
            }
            out.push_str(&op.to_string());
            out.push(' ');
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::Binary { op, left, right } => {
            let name = if *op == BinaryOp::Comma { "comma".to_string() } else { op.to_string() };
            out.push('(');
            out.push_str(&name);
            out.push(' ');
            write_sexpr(left, out);
            out.push(' ');
            write_sexpr(right, out);
            out.push(')');
        }
        ExpressionKind::Conditional { condition, then_expr, else_expr } => {
            out.push_str("(? ");
            write_sexpr(condition, out);
            out.push(' ');
            write_sexpr(then_expr, out);
            out.push(' ');
            write_sexpr(else_expr, out);
            out.push(')');
        }
        ExpressionKind::Cast { target_type, operand } => {
            out.push_str(&format!("(cast <{}> ", target_type));
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::CppCast { kind, target_type, operand } => {
            out.push_str(&format!("({} <{}> ", kind, target_type));
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::Sizeof(TypeOrExpression::Type(type_id)) => {
            out.push_str(&format!("(sizeof <{}>)", type_id));
        }
        ExpressionKind::Sizeof(TypeOrExpression::Expression(operand)) => {
            out.push_str("(sizeof ");
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::Alignof(type_id) => out.push_str(&format!("(alignof <{}>)", type_id)),
        ExpressionKind::Typeid(TypeOrExpression::Type(type_id)) => {
            out.push_str(&format!("(typeid <{}>)", type_id));
        }
        ExpressionKind::Typeid(TypeOrExpression::Expression(operand)) => {
            out.push_str("(typeid ");
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::New(new) => {
            out.push_str(if new.global { "(::new" } else { "(new" });
            if let Some(placement) = &new.placement {
                out.push_str(" (placement");
                write_all(placement, out);
                out.push(')');
            }
            match &new.target {
                NewTarget::Bare(type_id) => out.push_str(&format!(" <{}>", type_id)),
                NewTarget::Parenthesized(type_id) => out.push_str(&format!(" <({})>", type_id)),
            }
            if let Some(initializer) = &new.initializer {
                out.push(' ');
                write_initializer(initializer, out);
            }
            out.push(')');
        }
        ExpressionKind::Delete { global, array, operand } => {
            out.push('(');
            if *global {
                out.push_str("::");
            }
            out.push_str(if *array { "delete[] " } else { "delete " });
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::Index { base, index } => {
            out.push_str("([] ");
            write_sexpr(base, out);
            out.push(' ');
            write_sexpr(index, out);
            out.push(')');
        }
        ExpressionKind::Call { function, arguments } => {
            out.push_str("(call ");
            write_sexpr(function, out);
            write_all(arguments, out);
            out.push(')');
        }
        ExpressionKind::Member { object, member, is_pointer } => {
            out.push_str(if *is_pointer { "(-> " } else { "(. " });
            write_sexpr(object, out);
            out.push_str(&format!(" {})", member));
        }
        ExpressionKind::Throw(None) => out.push_str("(throw)"),
        ExpressionKind::Throw(Some(operand)) => {
            out.push_str("(throw ");
            write_sexpr(operand, out);
            out.push(')');
        }
        ExpressionKind::Construct { target, initializer } => {
            out.push_str(&format!("(construct <{}> ", target));
            write_initializer(initializer, out);
            out.push(')');
        }
        ExpressionKind::InitializerList(items) => {
            out.push_str("(braced");
            write_all(items, out);
            out.push(')');
        }
    }
}
