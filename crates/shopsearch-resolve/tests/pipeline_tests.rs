mod common;

use common::{item, ScriptedIndex, SkuStore};
use shopsearch_core::config::SearchSettings;
use shopsearch_core::error::Error;
use shopsearch_core::types::CatalogueGroup;
use shopsearch_resolve::SearchService;

fn service(index: ScriptedIndex, store: SkuStore) -> SearchService<ScriptedIndex, SkuStore> {
    SearchService::new(index, store, SearchSettings::default())
}

#[test]
fn sku_hit_returns_exactly_that_item() {
    let galaxy = item(7, "Galaxy S21", "смартфон", "Samsung", 2, "Smartphones");
    let svc = service(ScriptedIndex::new().on("item_id(7)", vec![galaxy.clone()]), SkuStore::default().with("100200", "7"));

    let groups = svc.resolve_with_sku_fallback("100200").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("Smartphones", 2, Some(vec![galaxy]), Some("Samsung".to_string()))]);
    assert_eq!(svc.index().calls(), vec!["item_id(7)"]);
    assert_eq!(svc.index().limits(), vec![1]);
}

#[test]
fn numeric_text_without_sku_or_name_falls_through_to_heuristics() {
    let hit = item(1, "Cable 123456", "cable", "", 5, "Cables");
    let svc = service(ScriptedIndex::new().on("text_type(123456?|?)", vec![hit.clone()]), SkuStore::default());

    let groups = svc.resolve_with_sku_fallback("123456").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("Cables", 5, Some(vec![hit]), None)]);
    let calls = svc.index().calls();
    assert_eq!(calls[0], "name(123456)");
    assert!(calls.contains(&"type(123456)".to_string()));
}

#[test]
fn sku_miss_uses_name_prefix() {
    let hit = item(3, "4006381 pencil", "", "Stabilo", 9, "Office");
    let svc = service(ScriptedIndex::new().on("name(4006381)", vec![hit.clone()]), SkuStore::default());

    let groups = svc.resolve_by_sku("4006381").unwrap().expect("name prefix groups");
    assert_eq!(groups, vec![CatalogueGroup::new("Office", 9, Some(vec![hit]), None)]);
}

#[test]
fn broken_sku_targets_are_swallowed() {
    let svc = service(ScriptedIndex::new(), SkuStore::default().with("999", "A-11").with("555", "42"));

    assert_eq!(svc.resolve_by_sku("999").unwrap(), None);
    assert!(svc.index().calls().is_empty());

    assert_eq!(svc.resolve_by_sku("555").unwrap(), None);
    assert_eq!(svc.index().calls(), vec!["item_id(42)"]);

    svc.resolve_with_sku_fallback("999").unwrap();
    assert!(svc.index().calls().contains(&"type(999)".to_string()));
}

#[test]
fn unknown_item_id_is_not_found() {
    let svc = service(ScriptedIndex::new(), SkuStore::default());
    let err = svc.resolve_by_item_id(404).unwrap_err();
    assert!(Error::is_not_found(&err));
}

#[test]
fn non_numeric_text_skips_the_sku_path() {
    let svc = service(ScriptedIndex::new(), SkuStore::default().with("12a", "1"));
    assert_eq!(svc.resolve_by_sku("12a").unwrap(), None);
    assert!(svc.index().calls().is_empty());
}

#[test]
fn single_token_is_never_probed_as_brand() {
    let svc = service(ScriptedIndex::new(), SkuStore::default());
    svc.resolve("shoe").unwrap();
    let calls = svc.index().calls();
    assert!(!calls.is_empty());
    assert!(calls.iter().all(|c| !c.starts_with("brand(")), "{calls:?}");
}

#[test]
fn shortest_type_wins() {
    let boots = item(1, "Hiker", "boots", "", 1, "Shoes");
    let bo = item(2, "Mini", "bo", "", 1, "Shoes");
    let svc = service(
        ScriptedIndex::new().on("type(boots)", vec![boots, bo.clone()]).on("text_type(?|bo?)", vec![bo.clone()]),
        SkuStore::default(),
    );

    let groups = svc.resolve("boots").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("Shoes", 1, Some(vec![bo]), None)]);
    assert!(!svc.index().calls().iter().any(|c| c.starts_with("catalogue_name(")));
}

#[test]
fn brand_and_type_resolve_through_brand_stage() {
    let shoe1 = item(1, "shoe1", "shoe", "brandA", 1, "c1");
    let svc = service(
        ScriptedIndex::new()
            .on("brand(brandA)", vec![shoe1.clone()])
            .on("type(shoe)", vec![shoe1.clone()])
            .on("type_brand(?|brandA|shoe)", vec![shoe1.clone()]),
        SkuStore::default(),
    );

    let groups = svc.resolve("brandA shoe").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("c1", 1, Some(vec![shoe1]), Some("brandA".to_string()))]);
    assert_eq!(svc.index().calls(), vec!["brand(brandA)", "type(shoe)", "type_brand(?|brandA|shoe)"]);
}

#[test]
fn brand_alone_returns_group_reference() {
    let shoe1 = item(1, "shoe1", "shoe", "brandA", 1, "c1");
    let svc = service(ScriptedIndex::new().on("brand(brandA)", vec![shoe1]), SkuStore::default());

    let groups = svc.resolve("brandA ").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("c1", 1, None, Some("brandA".to_string()))]);
    assert_eq!(svc.index().calls(), vec!["brand(brandA)"]);
}

#[test]
fn catalogue_match_scopes_the_search() {
    let galaxy = item(4, "Galaxy", "смартфон", "Samsung", 2, "Smartphones");
    let svc = service(
        ScriptedIndex::new()
            .on("catalogue_name(smartphones galaxy)", vec![galaxy.clone()])
            .on("catalogue_id(smartphones galaxy?|2)", vec![galaxy.clone()]),
        SkuStore::default(),
    );

    let groups = svc.resolve("smartphones galaxy").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("Smartphones", 2, Some(vec![galaxy]), None)]);
}

#[test]
fn exact_name_collapses_to_one_item() {
    let name1 = item(1, "name1", "type", "Brand", 1, "Catalogue");
    let name33 = item(3, "name33", "type", "Brand", 1, "Catalogue");
    let other = item(2, "name1x", "type", "Brand", 2, "Other");
    let svc = service(
        ScriptedIndex::new()
            .on("type(type)", vec![name1.clone()])
            .on("text_type(name1?|type?)", vec![name33, other, name1.clone()]),
        SkuStore::default(),
    );

    let groups = svc.resolve("type name1").unwrap();
    assert_eq!(groups, vec![CatalogueGroup::new("Catalogue", 1, Some(vec![name1]), None)]);
}

#[test]
fn weak_stage_searches_the_collapsed_untouched_query() {
    let hit = item(9, "Thing", "", "brandX", 3, "Misc");
    let svc = service(ScriptedIndex::new().on("weak(red brandX thing?)", vec![hit.clone()]), SkuStore::default());

    let groups = svc.resolve("red  brandX thing").unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].items, Some(vec![hit]));
    assert_eq!(groups[0].brand, None);
}

#[test]
fn weak_stage_retries_transliterated() {
    let hit = item(5, "тест", "", "", 1, "c");
    let svc = service(ScriptedIndex::new().on("type_brand(тест?||)", vec![hit.clone()]), SkuStore::default());

    let groups = svc.resolve("ntcn").unwrap();
    assert_eq!(groups[0].items, Some(vec![hit]));
    let calls = svc.index().calls();
    let weak = calls.iter().position(|c| c == "weak(ntcn?)").expect("weak call");
    assert_eq!(calls[weak + 1], "type_brand(тест?||)");
}

#[test]
fn unsafe_text_is_converted_up_front_without_retries() {
    let svc = service(ScriptedIndex::new(), SkuStore::default());
    assert!(svc.resolve("a;b").unwrap().is_empty());
    assert_eq!(
        svc.index().calls(),
        vec!["type(фжи)", "type(фжи)", "catalogue_name(фжи)", "text_type(фжи?|?)", "weak(a;b?)"]
    );
}

#[test]
fn unsafe_transliteration_disables_retries() {
    let svc = service(ScriptedIndex::new(), SkuStore::default());
    svc.resolve("хлеб").unwrap();
    let calls = svc.index().calls();
    assert!(calls.iter().all(|c| !c.contains('[')), "{calls:?}");
    assert_eq!(calls.last().map(String::as_str), Some("weak(хлеб?)"));
}

#[test]
fn entry_points_differ_in_page_size() {
    let svc = service(ScriptedIndex::new(), SkuStore::default());
    svc.resolve_narrow("shoe").unwrap();
    assert!(svc.index().limits().iter().all(|l| *l == 10));

    let svc = service(ScriptedIndex::new(), SkuStore::default());
    svc.resolve("shoe").unwrap();
    assert!(svc.index().limits().iter().all(|l| *l == 150));
}
