//! Tests for compose module

#[cfg(test)]
mod tests {
    use crate::compose::*;
    use apiquery_core::config::QuerySection;
    use apiquery_core::{Embodied, QueryOptions};
    use serde_json::json;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_build_query_from_filters() {
        // Arrange
        let args = QueryArgs {
            filter: strs(&["name:foo", "age:>:12"]),
            ..QueryArgs::default()
        };

        // Act
        let query = build_query(&args, &QuerySection::default()).expect("build");

        // Assert
        assert_eq!(
            query.to_string(),
            r#"{"filter":[{"name":{"operator":"=","value":"foo"}},{"age":{"operator":">","value":12}}]}"#
        );
    }

    #[test]
    fn test_build_query_search_and_type() {
        // Arrange
        let args = QueryArgs {
            search: Some("bio:rust".to_string()),
            query_type: Some(TypeArg::Count),
            highlight: strs(&["bio"]),
            ..QueryArgs::default()
        };

        // Act
        let query = build_query(&args, &QuerySection::default()).expect("build");

        // Assert
        assert_eq!(query.section("type"), Some(&json!("count")));
        assert_eq!(
            query.section("filter"),
            Some(&json!([{"bio": {"operator": "match", "value": {"query": "rust"}}}]))
        );
        assert_eq!(query.section("highlight"), Some(&json!(["bio"])));
    }

    #[test]
    fn test_build_query_applies_default_limit_and_direction() {
        // Arrange
        let defaults = QuerySection {
            default_limit: Some(25),
            default_sort_direction: "desc".to_string(),
            ..QuerySection::default()
        };
        let args = QueryArgs {
            common: CommonArgs {
                sort: strs(&["age", "name:asc"]),
                ..CommonArgs::default()
            },
            ..QueryArgs::default()
        };

        // Act
        let query = build_query(&args, &defaults).expect("build");

        // Assert
        assert_eq!(
            query.to_string(),
            r#"{"sort":[{"age":"desc"},{"name":"asc"}],"limit":25}"#
        );
    }

    #[test]
    fn test_build_rejects_limit_above_max() {
        // Arrange
        let defaults = QuerySection {
            max_limit: 100,
            ..QuerySection::default()
        };
        let args = QueryArgs {
            common: CommonArgs {
                limit: Some(101),
                ..CommonArgs::default()
            },
            ..QueryArgs::default()
        };

        // Act
        let err = build_query(&args, &defaults).expect_err("must fail");

        // Assert
        assert!(err.to_string().contains("max_limit"));
    }

    #[test]
    fn test_build_query_reports_bad_expression() {
        let args = QueryArgs {
            filter: strs(&["age"]),
            ..QueryArgs::default()
        };

        let err = build_query(&args, &QuerySection::default()).expect_err("must fail");
        assert!(err.to_string().contains("--filter 'age'"));
    }

    #[test]
    fn test_build_search_stages_and_highlight() {
        // Arrange
        let args = SearchArgs {
            query: strs(&["foo"]),
            post_filter: strs(&["age:<:12"]),
            highlight: strs(&["name:10", "lastName:10:5"]),
            cursor: Some("c1".to_string()),
            common: CommonArgs {
                fields: strs(&["name"]),
                aggregate: strs(&["mean:age:avg"]),
                ..CommonArgs::default()
            },
            ..SearchArgs::default()
        };

        // Act
        let search = build_search(&args, &QuerySection::default()).expect("build");

        // Assert
        assert_eq!(
            search.body(),
            json!({
                "query": [{"*": {"operator": "match", "value": {"query": "foo"}}}],
                "post_filter": [{"age": {"operator": "<", "value": 12}}],
                "highlight": {"name": {"size": 10}, "lastName": {"size": 10, "count": 5}},
                "cursor": "c1",
                "fields": ["name"],
                "aggregation": [{"age": {"name": "mean", "operator": "avg"}}]
            })
        );
    }
}
