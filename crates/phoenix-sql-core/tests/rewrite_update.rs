//! Tests for UPDATE → UPSERT rewriting.

mod common;
use common::*;

use proptest::prelude::*;

use phoenix_sql_core::statement::emitted_value;
use phoenix_sql_core::{
    RewriteError, Statement, StatementDescriptor, StatementKind, DESCRIPTOR_REVISION,
};

// ===================================================================
// Unversioned updates
// ===================================================================

#[test]
fn update_single_set() {
    let stmt = Statement::update(StatementDescriptor::new("T").set("name", "?").key("id", "?"));
    assert_eq!(rewrite(&stmt), "upsert into T (name,id) values (?,?)");
}

#[test]
fn update_columns_follow_binding_order() {
    let descriptor = StatementDescriptor::new("employee")
        .set("first_name", "?")
        .set("last_name", "?")
        .set("hire_date", "?")
        .key("emp_no", "?")
        .key("dept_no", "?")
        .where_column("gender", "=?");
    let sql = rewrite(&Statement::update(descriptor.clone()));

    let names = list_after(&sql, "employee (");
    let values = list_after(&sql, "values (");
    let expected: Vec<&str> = descriptor
        .set_columns
        .columns()
        .chain(descriptor.key_columns.columns())
        .chain(descriptor.where_columns.columns())
        .collect();
    assert_eq!(names, expected);
    assert_eq!(values.len(), descriptor.column_count());
    assert!(values.iter().all(|v| *v == "?"));
}

#[test]
fn update_placeholder_count_matches_generic_update() {
    let descriptor = StatementDescriptor::new("salary")
        .set("amount", "?")
        .set("to_date", "?")
        .key("emp_no", "?")
        .key("from_date", "?");
    let stmt = Statement::update(descriptor);
    let placeholders = |sql: &str| sql.matches('?').count();
    assert_eq!(placeholders(&rewrite(&stmt)), placeholders(&stmt.sql));
}

#[test]
fn update_computed_value_binds_nothing() {
    let stmt = Statement::update(
        StatementDescriptor::new("T")
            .set("modified", "=current_date()")
            .key("id", "?"),
    );
    assert_eq!(
        rewrite(&stmt),
        "upsert into T (modified,id) values (current_date(),?)"
    );
}

#[test]
fn update_schema_qualified_table() {
    let stmt = Statement::update(StatementDescriptor::new("HR.DEPT").set("name", "?").key("id", "?"));
    assert_eq!(rewrite(&stmt), "upsert into HR.DEPT (name,id) values (?,?)");
}

#[test]
fn update_comment_prefix() {
    let stmt = Statement::update(
        StatementDescriptor::new("T")
            .set("name", "?")
            .key("id", "?")
            .comment("update com.acme.Employee"),
    );
    assert_eq!(
        rewrite(&stmt),
        "/* update com.acme.Employee */ upsert into T (name,id) values (?,?)"
    );
}

// ===================================================================
// Versioned updates
// ===================================================================

#[test]
fn versioned_update() {
    let stmt = Statement::update(
        StatementDescriptor::new("T")
            .set("name", "?")
            .key("id", "?")
            .version("ver"),
    );
    assert_eq!(
        rewrite(&stmt),
        "upsert into T (name,id) select ?,id from T where id=? and ver=?"
    );
}

#[test]
fn versioned_update_composite_key() {
    let stmt = Statement::update(
        StatementDescriptor::new("dept_emp")
            .set("to_date", "?")
            .set("ver", "?")
            .key("emp_no", "?")
            .key("dept_no", "?")
            .version("ver"),
    );
    assert_eq!(
        rewrite(&stmt),
        "upsert into dept_emp (to_date,ver,emp_no,dept_no) \
         select ?,?,emp_no,dept_no from dept_emp \
         where emp_no=? and dept_no=? and ver=?"
    );
}

#[test]
fn versioned_update_where_fragments_follow_keys() {
    let stmt = Statement::update(
        StatementDescriptor::new("T")
            .set("name", "?")
            .key("id", "?")
            .where_column("salary", ">10")
            .version("ver")
            .comment("update Employee"),
    );
    assert_eq!(
        rewrite(&stmt),
        "/* update Employee */ upsert into T (name,salary,id) \
         select ?,>10,id from T where id=? and salary>10 and ver=?"
    );
}

#[test]
fn versioned_update_never_has_stray_and() {
    let stmt = Statement::update(StatementDescriptor::new("T").set("name", "?").version("ver"));
    let sql = rewrite(&stmt);
    assert!(sql.ends_with(" where ver=?"), "{sql}");
    assert!(!sql.contains("where and"));
    assert!(!sql.contains("and and"));
}

// ===================================================================
// Degradation
// ===================================================================

#[test]
fn update_without_descriptor_passes_through() {
    let stmt = Opaque {
        kind: StatementKind::Update,
        sql: String::from("update T set name=? where id=?"),
        revision: DESCRIPTOR_REVISION,
        descriptor: None,
    };
    assert!(matches!(
        phoenix().try_rewrite(&stmt),
        Err(RewriteError::IntrospectionFailure(_))
    ));
    assert_eq!(phoenix().rewrite(&stmt), "update T set name=? where id=?");
}

#[test]
fn update_with_unknown_revision_passes_through() {
    let stmt = Opaque {
        kind: StatementKind::Update,
        sql: String::from("update T set name=? where id=?"),
        revision: DESCRIPTOR_REVISION + 1,
        descriptor: Some(StatementDescriptor::new("T").set("name", "?").key("id", "?")),
    };
    assert_eq!(phoenix().rewrite(&stmt), "update T set name=? where id=?");
}

#[test]
fn update_binding_nothing_passes_through() {
    let stmt = Statement::update(StatementDescriptor::new("T").version("ver"));
    assert_eq!(rewrite(&stmt), stmt.sql);
    assert!(matches!(
        phoenix().try_rewrite(&stmt),
        Err(RewriteError::EmptyStatement { .. })
    ));
}

#[test]
fn rewriter_is_shareable_across_threads() {
    let rewriter = phoenix();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let column = format!("c{i}");
                let stmt = Statement::update(StatementDescriptor::new("T").set(&column, "?").key("id", "?"));
                rewriter.rewrite(&stmt)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("upsert into T (c{i},id) values (?,?)")
        );
    }
}

#[test]
fn update_from_json_with_repeated_column() {
    let stmt: Statement = serde_json::from_str(
        r#"{
            "kind": "update",
            "descriptor": {
                "table": "T",
                "set_columns": [["a", "?"], ["a", "=1"]],
                "key_columns": [["id", "?"]]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(
        rewrite(&stmt.with_rendered_sql()),
        "upsert into T (a,id) values (1,?)"
    );
}

// ===================================================================
// Properties
// ===================================================================

fn bindings(prefix: &'static str) -> impl Strategy<Value = Vec<(String, &'static str)>> {
    prop::collection::vec(
        (
            "[a-z]{1,6}",
            prop_oneof![Just("?"), Just("=0"), Just("=ver+1")],
        ),
        0..4,
    )
    .prop_map(move |entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, expr))| (format!("{prefix}{i}_{name}"), expr))
            .collect()
    })
}

proptest! {
    #[test]
    fn unversioned_update_lists_follow_binding_order(
        set in bindings("s"),
        keys in bindings("k"),
        wheres in bindings("w"),
    ) {
        prop_assume!(!(set.is_empty() && keys.is_empty() && wheres.is_empty()));

        let mut descriptor = StatementDescriptor::new("T");
        for (column, expr) in &set {
            descriptor = descriptor.set(column, expr);
        }
        for (column, expr) in &keys {
            descriptor = descriptor.key(column, expr);
        }
        for (column, expr) in &wheres {
            descriptor = descriptor.where_column(column, expr);
        }
        let sql = rewrite(&Statement::update(descriptor.clone()));

        let all: Vec<&(String, &str)> = set.iter().chain(&keys).chain(&wheres).collect();
        let names: Vec<&str> = all.iter().map(|(column, _)| column.as_str()).collect();
        let values: Vec<&str> = all.iter().map(|(_, expr)| emitted_value(expr)).collect();

        prop_assert_eq!(list_after(&sql, "T ("), names);
        prop_assert_eq!(list_after(&sql, "values ("), values);
        prop_assert_eq!(all.len(), descriptor.column_count());
    }
}
