//! Tests for filter module

#[cfg(test)]
mod tests {
    use crate::embodied::Embodied;
    use crate::filter::*;
    use crate::geo::{bounding_box, circle, point, Point};
    use crate::range::Range;
    use serde_json::json;

    // =========================================================================
    // Basic conditions
    // =========================================================================

    #[test]
    fn test_field_defaults_to_equality() {
        // Arrange & Act
        let filter = Filter::field("name", "foo");

        // Assert
        assert_eq!(
            filter.to_string(),
            r#"{"name":{"operator":"=","value":"foo"}}"#
        );
    }

    #[test]
    fn test_field_op_keeps_operator_verbatim() {
        let filter = Filter::field_op("age", "<", 12);
        assert_eq!(filter.to_string(), r#"{"age":{"operator":"<","value":12}}"#);

        let unknown = Filter::field_op("age", "between-ish", json!([1, 2]));
        assert_eq!(
            unknown.to_string(),
            r#"{"age":{"operator":"between-ish","value":[1,2]}}"#
        );
    }

    #[test]
    fn test_comparison_factories() {
        let cases = [
            (Filter::equal("f", 1), "="),
            (Filter::not_equal("f", 1), "!="),
            (Filter::gt("f", 1), ">"),
            (Filter::gte("f", 1), ">="),
            (Filter::lt("f", 1), "<"),
            (Filter::lte("f", 1), "<="),
            (Filter::regex("f", 1), "~"),
            (Filter::wildcard("f", 1), "wildcard"),
        ];
        for (filter, operator) in cases {
            assert_eq!(filter.body(), json!({"f": {"operator": operator, "value": 1}}));
        }
    }

    #[test]
    fn test_exists_and_missing_carry_null_value() {
        assert_eq!(
            Filter::exists("email").to_string(),
            r#"{"email":{"operator":"exists","value":null}}"#
        );
        assert_eq!(
            Filter::missing("email").to_string(),
            r#"{"email":{"operator":"missing","value":null}}"#
        );
    }

    #[test]
    fn test_any_and_none_collect_values() {
        // Arrange & Act
        let any = Filter::any("tag", ["a", "b"]);
        let none = Filter::none("age", vec![1, 2, 3]);

        // Assert
        assert_eq!(any.to_string(), r#"{"tag":{"operator":"any","value":["a","b"]}}"#);
        assert_eq!(none.to_string(), r#"{"age":{"operator":"none","value":[1,2,3]}}"#);
    }

    #[test]
    fn test_operator_round_trips_through_str() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
        assert!("nope".parse::<Operator>().is_err());
        assert_eq!(String::from(Operator::GeoShape), "gs");
    }

    // =========================================================================
    // Text operators and the all-fields default
    // =========================================================================

    #[test]
    fn test_match_without_field_targets_all_fields() {
        assert_eq!(
            Filter::text_match("foo").to_string(),
            r#"{"*":{"operator":"match","value":{"query":"foo"}}}"#
        );
    }

    #[test]
    fn test_match_with_field() {
        assert_eq!(
            Filter::text_match(("name", "foo")).to_string(),
            r#"{"name":{"operator":"match","value":{"query":"foo"}}}"#
        );
    }

    #[test]
    fn test_text_operators_share_field_rule() {
        let ops = [
            (Filter::phrase("foo"), Filter::phrase(("name", "foo")), "phrase"),
            (Filter::prefix("foo"), Filter::prefix(("name", "foo")), "prefix"),
            (Filter::similar("foo"), Filter::similar(("name", "foo")), "similar"),
            (Filter::fuzzy("foo"), Filter::fuzzy(("name", "foo")), "fuzzy"),
        ];
        for (all, named, operator) in ops {
            assert_eq!(all.field_name(), Filter::ALL);
            assert_eq!(named.field_name(), "name");
            assert_eq!(
                named.body(),
                json!({"name": {"operator": operator, "value": {"query": "foo"}}})
            );
        }
    }

    #[test]
    fn test_fuzzy_with_fuzziness() {
        // Arrange & Act
        let all = Filter::fuzzy(("foo", 2));
        let named = Filter::fuzzy(("name", "foo", 0.5));

        // Assert
        assert_eq!(
            all.to_string(),
            r#"{"*":{"operator":"fuzzy","value":{"query":"foo","fuzziness":2}}}"#
        );
        assert_eq!(
            named.to_string(),
            r#"{"name":{"operator":"fuzzy","value":{"query":"foo","fuzziness":0.5}}}"#
        );
    }

    #[test]
    fn test_fuzziness_is_ignored_by_other_text_operators() {
        let filter = Filter::text_match(TextArgs::field("name", "foo").with_fuzziness(2));
        assert_eq!(filter.body(), json!({"name": {"operator": "match", "value": {"query": "foo"}}}));
    }

    // =========================================================================
    // Ranges and geo
    // =========================================================================

    #[test]
    fn test_range_from_range_value() {
        let filter = Filter::range("age", Range::between(12, 15));
        assert_eq!(
            filter.to_string(),
            r#"{"age":{"operator":"range","value":{"from":12,"to":15}}}"#
        );
    }

    #[test]
    fn test_range_from_min_max_pair_drops_null() {
        let filter = Filter::range("age", (json!(null), 15));
        assert_eq!(
            filter.to_string(),
            r#"{"age":{"operator":"range","value":{"to":15}}}"#
        );
    }

    #[test]
    fn test_distance_from_circle() {
        // Arrange
        let c = circle(point(0.0, 0.0), "2km");

        // Act
        let filter = Filter::distance("location", c);

        // Assert
        assert_eq!(
            filter.to_string(),
            r#"{"location":{"operator":"gd","value":{"location":[0,0],"max":"2km"}}}"#
        );
    }

    #[test]
    fn test_distance_from_circle_with_numeric_radius() {
        let filter = Filter::distance("loc", circle(Point::new(0.0, 0.0), 2));
        assert_eq!(
            filter.to_string(),
            r#"{"loc":{"operator":"gd","value":{"location":[0,0],"max":2}}}"#
        );
    }

    #[test]
    fn test_distance_from_location_and_range() {
        let filter = Filter::distance("location", (point(1.0, 2.0), Range::between("1km", "2km")));
        assert_eq!(
            filter.body(),
            json!({"location": {"operator": "gd", "value": {
                "location": [2, 1], "min": "1km", "max": "2km"
            }}})
        );
    }

    #[test]
    fn test_distance_within_plain_location() {
        let filter = Filter::distance("location", DistanceArg::within("0,0", "5km"));
        assert_eq!(
            filter.to_string(),
            r#"{"location":{"operator":"gd","value":{"location":"0,0","max":"5km"}}}"#
        );
    }

    #[test]
    fn test_bounding_box_delegates_to_polygon() {
        // Arrange
        let bbox = bounding_box(point(20.0, 0.0), point(0.0, 20.0));

        // Act
        let from_box = Filter::bounding_box("shape", bbox);
        let from_corners = Filter::bounding_box("shape", (point(20.0, 0.0), point(0.0, 20.0)));

        // Assert
        let expected = r#"{"shape":{"operator":"gp","value":[[0,20],[20,0]]}}"#;
        assert_eq!(from_box.to_string(), expected);
        assert_eq!(from_corners.to_string(), expected);
    }

    #[test]
    fn test_polygon_accepts_plain_points() {
        let filter = Filter::polygon("shape", ["0,0", "0,1", "1,1"]);
        assert_eq!(
            filter.to_string(),
            r#"{"shape":{"operator":"gp","value":["0,0","0,1","1,1"]}}"#
        );
    }

    #[test]
    fn test_shape_wraps_geometry_collection() {
        // Arrange
        let c = circle(point(0.0, 0.0), 2);

        // Act
        let filter = Filter::shape("area", [crate::Shape::from(c), point(1.0, 1.0).into()]);

        // Assert
        assert_eq!(
            filter.to_string(),
            concat!(
                r#"{"area":{"operator":"gs","value":{"type":"geometrycollection","geometries":["#,
                r#"{"type":"circle","coordinates":[0,0],"radius":2},[1,1]]}}}"#
            )
        );
    }

    // =========================================================================
    // Composition chain
    // =========================================================================

    #[test]
    fn test_first_and_builds_two_element_chain() {
        // Arrange & Act
        let filter = Filter::gt("age", 12).and(("name", "a"));

        // Assert
        assert_eq!(
            filter.to_string(),
            concat!(
                r#"{"age":["#,
                r#"{"and":{"age":{"operator":">","value":12}}},"#,
                r#"{"and":{"name":{"operator":"=","value":"a"}}}"#,
                r#"]}"#
            )
        );
    }

    #[test]
    fn test_second_and_appends_to_same_chain() {
        // Arrange & Act
        let filter = Filter::gt("age", 12).and(("name", "a")).and(("name", "b"));

        // Assert
        let body = filter.body();
        let chain = body["age"].as_array().expect("chain");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[2], json!({"and": {"name": {"operator": "=", "value": "b"}}}));
        assert_eq!(body.as_object().map(serde_json::Map::len), Some(1));
    }

    #[test]
    fn test_mixed_operators_stay_flat() {
        let filter = Filter::gt("age", 12)
            .and(Filter::lt("age", 20))
            .or(("name", "<", "m"));

        let body = filter.body();
        let chain = body["age"].as_array().expect("chain");
        assert_eq!(chain.len(), 3);
        assert!(chain[0].get("and").is_some());
        assert!(chain[1].get("and").is_some());
        assert_eq!(chain[2], json!({"or": {"name": {"operator": "<", "value": "m"}}}));
    }

    #[test]
    fn test_not_appends_bare_operator() {
        // Arrange & Act
        let filter = Filter::not(("age", 12));

        // Assert
        assert_eq!(
            filter.to_string(),
            r#"{"age":[{"not":{"age":{"operator":"=","value":12}}}]}"#
        );
    }

    #[test]
    fn test_not_on_existing_chain_appends_null_entry() {
        let filter = Filter::not(Filter::gt("age", 12).and(("name", "a")));
        let body = filter.body();
        let chain = body["age"].as_array().expect("chain");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[2], json!({"not": null}));
    }

    #[test]
    fn test_add_many_folds_in_order() {
        // Arrange
        let filters = [Filter::equal("a", 1), Filter::equal("b", 2)];

        // Act
        let filter = Filter::equal("x", 0).add_many("or", filters);

        // Assert
        assert_eq!(
            filter.to_string(),
            concat!(
                r#"{"x":["#,
                r#"{"or":{"x":{"operator":"=","value":0}}},"#,
                r#"{"or":{"a":{"operator":"=","value":1}}},"#,
                r#"{"or":{"b":{"operator":"=","value":2}}}"#,
                r#"]}"#
            )
        );
    }

    #[test]
    fn test_add_optional_none_is_noop() {
        let filter = Filter::gt("age", 12).add_optional("and", None);
        assert!(!filter.is_composed());
        assert_eq!(filter.to_string(), r#"{"age":{"operator":">","value":12}}"#);
    }

    #[test]
    fn test_composed_filter_body_is_copied() {
        // Arrange
        let inner = Filter::equal("a", 1).and(("b", 2));

        // Act
        let outer = Filter::equal("x", 0).or(&inner);

        // Assert
        let body = outer.body();
        assert_eq!(body["x"][1]["or"], inner.body());
    }

    #[test]
    fn test_to_filter_passes_filters_through() {
        let filter = Filter::gt("age", 12);
        assert_eq!(Filter::to_filter(filter.clone()), filter);
        assert_eq!(Filter::to_filter(("age", ">", 12)), filter);
        assert_eq!(Filter::to_filter(("age", 12)), Filter::equal("age", 12));
    }

    // =========================================================================
    // Search argument resolution
    // =========================================================================

    #[test]
    fn test_search_arg_resolution_order() {
        assert_eq!(
            SearchArg::from(("age", "<", 12)).into_filter(),
            Some(Filter::lt("age", 12))
        );
        assert_eq!(
            SearchArg::from(("name", "foo")).into_filter(),
            Some(Filter::text_match(("name", "foo")))
        );
        assert_eq!(
            SearchArg::from("foo").into_filter(),
            Some(Filter::text_match("foo"))
        );
        assert_eq!(
            SearchArg::from(Filter::gt("age", 1)).into_filter(),
            Some(Filter::gt("age", 1))
        );
        assert_eq!(SearchArg::from(None::<Filter>).into_filter(), None);
        assert_eq!(SearchArg::from("").into_filter(), None);
    }
}
