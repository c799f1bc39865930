//! Integration tests for the Phoenix dialect descriptor.

use phoenix_sql_core::{RewriteConfig, Statement, StatementDescriptor};
use phoenix_sql_dialect::{
    PhoenixDialect, RowSelection, SecondaryIndexHint, SortOrder, SqlType, UniqueKey,
};

#[test]
fn dialect_drives_the_rewriter() {
    let rewriter = PhoenixDialect::new().rewriter();

    let insert = Statement::insert("insert into DEPARTMENT (DEPT_NO, DEPT_NAME) values (?, ?)");
    assert_eq!(
        rewriter.rewrite(&insert),
        "upsert into DEPARTMENT (DEPT_NO, DEPT_NAME) values (?, ?)"
    );

    let update = Statement::update(
        StatementDescriptor::new("DEPARTMENT")
            .set("DEPT_NAME", "?")
            .key("DEPT_NO", "?"),
    );
    assert_eq!(
        rewriter.rewrite(&update),
        "upsert into DEPARTMENT (DEPT_NAME,DEPT_NO) values (?,?)"
    );
}

#[test]
fn paginated_hinted_query() {
    let dialect = PhoenixDialect::new();
    let query = "select e from employee e where e.last_name = ? order by e.emp_no";

    let hinted = dialect.apply_index_hints(
        query,
        &[SecondaryIndexHint::new("EMPLOYEE", "EMP_LAST_NAME_IDX")],
    );
    let selection = RowSelection::limit(10).offset(20);
    let handler = dialect.limit_handler();

    assert_eq!(
        handler.process_sql(&hinted, &selection),
        "select /*+ INDEX(EMPLOYEE EMP_LAST_NAME_IDX) */ e from employee e \
         where e.last_name = ? order by e.emp_no limit ? offset ?"
    );
    assert_eq!(handler.bind_values(&selection), vec![10, 20]);
}

#[test]
fn hints_from_config() {
    let config = RewriteConfig::from_json_str(
        r#"{
            "dialect": "phoenix",
            "hints": [
                { "table": "HR.EMPLOYEE", "index": "EMP_IDX" },
                { "table": "HR.SALARY", "index": "SAL_IDX" }
            ]
        }"#,
    )
    .unwrap();
    let hints: Vec<SecondaryIndexHint> = config.hints.iter().map(SecondaryIndexHint::from).collect();

    let sql = PhoenixDialect::new().apply_index_hints("select count(*) from HR.EMPLOYEE", &hints);
    assert_eq!(
        sql,
        "select /*+ INDEX(HR.EMPLOYEE EMP_IDX) */ /*+ INDEX(HR.SALARY SAL_IDX) */ count(*) from HR.EMPLOYEE"
    );
}

#[test]
fn hinting_twice_does_not_duplicate() {
    let dialect = PhoenixDialect::new();
    let hints = [SecondaryIndexHint::new("D", "D_I0")];
    let once = dialect.apply_index_hints("select d from department d", &hints);
    let twice = dialect.apply_index_hints(&once, &hints);
    assert_eq!(once, twice);
}

#[test]
fn unique_key_round_trips_through_json() {
    let key = UniqueKey::new("UK_DEPT_NAME", "HR.DEPARTMENT")
        .column("DEPT_NAME")
        .column_ordered("DEPT_NO", SortOrder::Desc);
    let json = serde_json::to_string(&key).unwrap();
    assert!(json.contains("\"desc\""));

    let parsed: UniqueKey = serde_json::from_str(&json).unwrap();
    let dialect = PhoenixDialect::new();
    assert_eq!(
        dialect.add_unique_key(&parsed),
        "create index \"UK_DEPT_NAME\" on HR.DEPARTMENT (DEPT_NAME, DEPT_NO desc)"
    );
    assert_eq!(
        dialect.drop_unique_key(&parsed),
        "drop index if exists \"UK_DEPT_NAME\" on HR.DEPARTMENT"
    );
}

#[test]
fn create_table_uses_mapped_types() {
    let dialect = PhoenixDialect::new();
    let columns = [
        ("EMP_NO", SqlType::BigInt),
        ("BIRTH_DATE", SqlType::Date),
        ("FIRST_NAME", SqlType::Varchar(Some(14))),
        ("ACTIVE", SqlType::Bit),
        (
            "SALARY",
            SqlType::Decimal {
                precision: None,
                scale: None,
            },
        ),
    ];
    let body: Vec<String> = columns
        .iter()
        .map(|(name, ty)| format!("{name} {}", dialect.column_type(*ty)))
        .collect();
    assert_eq!(
        body.join(", "),
        "EMP_NO bigint, BIRTH_DATE date, FIRST_NAME varchar(14), ACTIVE boolean, SALARY decimal(19,2)"
    );
}

#[test]
fn function_registry_renders_ordered_set_aggregates() {
    let functions = PhoenixDialect::new().functions();
    let sql = format!(
        "select {} from salary s",
        functions
            .render("percentile_disc_desc", &["0.9", "s.amount"])
            .unwrap()
    );
    assert_eq!(
        sql,
        "select PERCENTILE_DISC (0.9) WITHIN GROUP (ORDER BY s.amount DESC) from salary s"
    );
}
