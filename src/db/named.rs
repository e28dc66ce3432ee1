use sea_orm::DbBackend;

use super::error::{GatewayError, GatewayResult};
use crate::pipeline::params::{NAMED_PREFIX, Param, Params};

/// SQL text with its `$name` placeholders replaced by positional binds.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub values: Vec<Param>,
}

/// Resolves every `$name` placeholder in `sql` against `params`, in order of
/// appearance. Placeholders inside single-quoted literals are left alone.
/// Parameters the query never mentions are ignored.
pub fn compile(backend: DbBackend, sql: &str, params: &Params) -> GatewayResult<CompiledQuery> {
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut chars = sql.char_indices().peekable();
    let mut in_literal = false;

    while let Some((start, ch)) = chars.next() {
        if ch == '\'' {
            in_literal = !in_literal;
            out.push(ch);
            continue;
        }
        if in_literal || ch != NAMED_PREFIX {
            out.push(ch);
            continue;
        }

        let mut end = start + ch.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }

        let name = &sql[start..end];
        if name.len() == 1 {
            out.push(ch);
            continue;
        }

        let value = params
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::MissingParam(name.to_string()))?;
        values.push(value);
        match backend {
            DbBackend::Postgres => out.push_str(&format!("${}", values.len())),
            _ => out.push('?'),
        }
    }

    Ok(CompiledQuery { sql: out, values })
}
