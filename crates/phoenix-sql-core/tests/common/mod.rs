#![allow(dead_code)]

use phoenix_sql_core::{
    FinalizedStatement, Statement, StatementDescriptor, StatementKind, StatementRewriter,
    TargetDialect,
};

pub fn phoenix() -> StatementRewriter {
    StatementRewriter::new(TargetDialect::Phoenix)
}

pub fn rewrite(statement: &Statement) -> String {
    phoenix().rewrite(statement)
}

/// Splits the first parenthesised, comma-separated list after `marker`.
pub fn list_after<'a>(sql: &'a str, marker: &str) -> Vec<&'a str> {
    let start = sql
        .find(marker)
        .unwrap_or_else(|| panic!("'{marker}' not found in: {sql}"))
        + marker.len();
    let rest = &sql[start..];
    let end = rest
        .find(')')
        .unwrap_or_else(|| panic!("unclosed list in: {sql}"));
    rest[..end].split(',').filter(|s| !s.is_empty()).collect()
}

pub fn normalized(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A statement whose ORM could not describe it.
pub struct Opaque {
    pub kind: StatementKind,
    pub sql: String,
    pub revision: u32,
    pub descriptor: Option<StatementDescriptor>,
}

impl FinalizedStatement for Opaque {
    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn sql(&self) -> &str {
        &self.sql
    }

    fn descriptor(&self) -> Option<&StatementDescriptor> {
        self.descriptor.as_ref()
    }

    fn descriptor_revision(&self) -> u32 {
        self.revision
    }
}
