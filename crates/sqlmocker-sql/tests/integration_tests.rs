//! Integration tests for SQL synthesis

mod fixtures;

use fixtures::{hotels, Hotel, Listing};
use pretty_assertions::assert_eq;
use sqlmocker_core::{FieldDescriptor, NamingConvention, Record, SemanticType, TypeDescriptor};
use sqlmocker_sql::{
    synthesize_create_table, synthesize_insert, synthesize_select, BulkWriter, SchemaSynthesizer,
    ProjectionSynthesizer,
};
use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

fn parse_one(sql: &str) -> Statement {
    let mut statements = Parser::parse_sql(&GenericDialect {}, sql)
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", sql, e));
    assert_eq!(statements.len(), 1, "expected one statement in {}", sql);
    statements.remove(0)
}

#[test]
fn listing_create_table_in_snake_case() {
    let sql = SchemaSynthesizer::for_record::<Listing>("t", NamingConvention::Snake).unwrap();

    assert_eq!(
        sql,
        "CREATE TABLE IF NOT EXISTS t (id INT, name VARCHAR(255), rating DECIMAL(10, 2), created_at TIMESTAMP);"
    );
}

#[test]
fn hotel_round_of_statements() {
    let create = synthesize_create_table("hotel", &Hotel::descriptor(), NamingConvention::Snake).unwrap();
    assert_eq!(
        create,
        "CREATE TABLE IF NOT EXISTS hotel (id INT, name VARCHAR(255), city VARCHAR(255), \
         rating DECIMAL(10, 2), price_per_night DECIMAL(10, 2), description VARCHAR(255), \
         facilities VARCHAR(255), contact_email VARCHAR(255), phone VARCHAR(255), \
         website VARCHAR(255), created_at TIMESTAMP);"
    );
    assert!(matches!(parse_one(&create), Statement::CreateTable(_)));

    let select = synthesize_select("hotel", &Hotel::descriptor(), NamingConvention::Snake);
    assert_eq!(
        select,
        "SELECT id, name, city, rating, price_per_night, description, facilities, \
         contact_email, phone, website, created_at FROM hotel;"
    );
    assert!(matches!(parse_one(&select), Statement::Query(_)));

    let insert = synthesize_insert("hotel", &hotels(), NamingConvention::Snake);
    assert!(insert.starts_with(
        "INSERT INTO hotel (id, name, city, rating, price_per_night, description, facilities, \
         contact_email, phone, website, created_at) VALUES (1, 'Luxury Resort', 'Miami', 4.500, 250.000, "
    ));
    assert!(insert.contains("'info@cozyinn.com', '+1-987-654-3210', 'https://www.cozyinn.com', '1984-07-09 09:12:32')"));
    assert!(insert.ends_with("'1993-10-15 10:42:19');"));
    assert_eq!(insert.matches("), (").count(), hotels().len() - 1);

    match parse_one(&insert) {
        Statement::Insert(insert) => {
            assert_eq!(insert.columns.len(), 11);
        }
        other => panic!("expected INSERT, got {:?}", other),
    }
}

#[test]
fn select_and_create_share_column_order() {
    let descriptor = TypeDescriptor::from_fields(vec![
        FieldDescriptor::new("ID", SemanticType::Integer).skip_on_insert(),
        FieldDescriptor::new("Cuisine", SemanticType::Text),
        FieldDescriptor::new("Rating", SemanticType::Decimal),
        FieldDescriptor::new("CreatedAt", SemanticType::Timestamp).with_column("CREATEAT"),
    ]);

    for convention in [
        NamingConvention::Upper,
        NamingConvention::Lower,
        NamingConvention::Snake,
        NamingConvention::Unchanged,
    ] {
        let create = SchemaSynthesizer::synthesize("restaurant", &descriptor, convention).unwrap();
        let select = ProjectionSynthesizer::synthesize("restaurant", &descriptor, convention);

        let created: Vec<String> = match parse_one(&create) {
            Statement::CreateTable(table) => {
                table.columns.iter().map(|column| column.name.value.clone()).collect()
            }
            other => panic!("expected CREATE TABLE, got {:?}", other),
        };
        let selected: Vec<String> = select
            .trim_start_matches("SELECT ")
            .trim_end_matches(" FROM restaurant;")
            .split(", ")
            .map(str::to_string)
            .collect();

        assert_eq!(created, selected, "{}", convention);
        assert_eq!(selected, descriptor.column_names(convention));
    }
}

#[test]
fn insert_columns_follow_type_not_first_record() {
    let descriptor = TypeDescriptor::from_fields(vec![
        FieldDescriptor::new("Id", SemanticType::Integer),
        FieldDescriptor::new("Nickname", SemanticType::Text),
    ]);
    let rows = vec![
        vec![Some(1.into()), None],
        vec![Some(2.into()), Some("Ace".into())],
    ];

    let sql = BulkWriter::synthesize_rows("players", &descriptor, &rows, NamingConvention::Lower);
    assert_eq!(sql, "INSERT INTO players (id, nickname) VALUES (1, NULL), (2, 'Ace');");
    assert!(matches!(parse_one(&sql), Statement::Insert(_)));
}
