//! Environment configuration tests.
//!
//! Kept in a binary of their own since they mutate process environment.

use helios_solr::{IndexSchema, SolrConfig};

#[test]
fn test_from_env() {
    // SAFETY: This is the only test in this binary, so no other thread reads
    // or writes the environment while it runs.
    unsafe {
        std::env::remove_var("SOLR_PRIMARY_KEY_FIELD");
        std::env::remove_var("SOLR_TYPE_FIELD");
        std::env::remove_var("SOLR_GEO_QUERY_TYPE");
        std::env::set_var("SOLR_DEFAULT_CORE", "");
    }
    assert_eq!(SolrConfig::from_env(), SolrConfig::default());

    // SAFETY: See above.
    unsafe {
        std::env::set_var("SOLR_PRIMARY_KEY_FIELD", "pk_id");
        std::env::set_var("SOLR_TYPE_FIELD", "model");
        std::env::set_var("SOLR_DEFAULT_CORE", "posts");
        std::env::set_var("SOLR_GEO_QUERY_TYPE", "spatial");
    }
    let config = SolrConfig::from_env();
    assert_eq!(config.primary_key_field, "pk_id");
    assert_eq!(config.type_field, "model");
    assert_eq!(config.default_core.as_deref(), Some("posts"));
    assert_eq!(config.geo_query_type, "spatial");

    let schema = IndexSchema::from_config("Post", &config);
    assert_eq!(schema.primary_key_field, "pk_id");
    assert_eq!(schema.type_condition(), "(model:Post)");
}
