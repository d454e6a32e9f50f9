//! Table cleanup statements for real stores
//!
//! These statements destroy data. The mocker only runs them against a real
//! store, never against the stand-in.

/// How to clear test tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EraseAction {
    /// `DROP TABLE IF EXISTS`
    DropTable,

    /// `TRUNCATE TABLE`
    TruncateTable,
}

impl EraseAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::DropTable => "DROP TABLE IF EXISTS",
            Self::TruncateTable => "TRUNCATE TABLE",
        }
    }
}

/// `DROP TABLE IF EXISTS db.t1, db.t2;`
///
/// Every table is qualified with `database`.
pub fn synthesize_erase(action: EraseAction, database: &str, tables: &[&str]) -> String {
    let qualified: Vec<String> = tables
        .iter()
        .map(|table| format!("{}.{}", database, table))
        .collect();
    format!("{} {};", action.keyword(), qualified.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_and_truncate() {
        assert_eq!(
            synthesize_erase(EraseAction::DropTable, "mock", &["hotel"]),
            "DROP TABLE IF EXISTS mock.hotel;"
        );
        assert_eq!(
            synthesize_erase(EraseAction::TruncateTable, "mock", &["hotel"]),
            "TRUNCATE TABLE mock.hotel;"
        );
    }

    #[test]
    fn several_tables() {
        assert_eq!(
            synthesize_erase(EraseAction::DropTable, "mock", &["hotel", "zoo"]),
            "DROP TABLE IF EXISTS mock.hotel, mock.zoo;"
        );
    }
}
