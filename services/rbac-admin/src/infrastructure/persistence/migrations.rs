//! 内置数据库迁移

use panel_adapter_postgres::Migration;

pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_role_tables",
        include_str!("../../../migrations/0001_create_role_tables.sql"),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique_and_ordered() {
        let versions: Vec<i64> = migrations().iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn test_schema_creates_role_tables() {
        let sql = migrations()[0].sql;
        for table in ["role", "role_authority", "role_api_resource", "role_query_permissions"] {
            assert!(sql.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table)));
        }
    }

    #[test]
    fn test_quota_codes_are_numeric() {
        let sql = migrations()[0].sql;
        assert!(sql.contains("county_code BIGINT,"));
        assert!(sql.contains("industry_code BIGINT,"));
    }
}
