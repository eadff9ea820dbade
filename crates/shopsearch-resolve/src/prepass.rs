//! Facet pre-pass: pull brand, type and catalogue out of the query.

use anyhow::Result;
use tracing::debug;

use shopsearch_core::traits::ItemIndex;
use shopsearch_core::types::{CatalogueGroup, IndexedItem};

use crate::context::{with_convert_retry, ResolutionContext};

pub fn run(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    detect_brand(index, ctx)?;
    detect_type(index, ctx)?;
    detect_catalogue(index, ctx)
}

/// A single-token query is never a brand.
pub fn detect_brand(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if !ctx.query.contains(char::is_whitespace) {
        return Ok(());
    }
    let limit = ctx.page_size;
    for token in ctx.tokens() {
        let items = with_convert_retry(&token, ctx.need_convert, |t| index.find_by_brand(t, limit))?;
        if let Some(first) = items.first() {
            ctx.brand = first.brand.clone();
            ctx.remove_token(&token);
            debug!(brand = %ctx.brand, token = %token, residual = %ctx.query, "brand detected");
            ctx.brand_items = items.clone();
            ctx.items = items;
            break;
        }
    }
    Ok(())
}

pub fn detect_type(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if ctx.query.is_empty() {
        return Ok(());
    }
    let limit = ctx.page_size;
    let items = with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_type(t, limit))?;
    if let Some(item_type) = shortest_type(&items) {
        debug!(item_type = %item_type, phrase = %ctx.query, "type detected");
        ctx.item_type = item_type;
        ctx.query.clear();
        ctx.items = items;
        return Ok(());
    }
    for token in ctx.tokens() {
        let items = with_convert_retry(&token, ctx.need_convert, |t| index.find_by_type(t, limit))?;
        if let Some(item_type) = shortest_type(&items) {
            ctx.item_type = item_type;
            ctx.remove_token(&token);
            debug!(item_type = %ctx.item_type, token = %token, residual = %ctx.query, "type detected");
            ctx.items = items;
            break;
        }
    }
    Ok(())
}

pub fn detect_catalogue(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if !ctx.brand.is_empty() || ctx.query.is_empty() {
        return Ok(());
    }
    let limit = ctx.page_size;
    let items = with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_catalogue_name(t, limit))?;
    if let Some(first) = items.first() {
        ctx.catalogue_id = Some(first.catalogue_id);
        debug!(catalogue_id = first.catalogue_id, catalogue = %first.catalogue, "catalogue detected");
        ctx.items = items;
    }
    Ok(())
}

/// Shortest indexed type among `items`; the first one wins a tie.
pub fn shortest_type(items: &[IndexedItem]) -> Option<String> {
    items.iter().map(|i| &i.item_type).min_by_key(|t| t.chars().count()).cloned()
}

/// The query named a brand and nothing else: answer with a reference to the
/// brand's catalogue instead of running the chain.
pub fn brand_only_group(ctx: &ResolutionContext) -> Option<CatalogueGroup> {
    if !ctx.query.trim().is_empty() || ctx.brand.is_empty() || !ctx.item_type.is_empty() {
        return None;
    }
    let first = ctx.brand_items.first()?;
    Some(CatalogueGroup::new(first.catalogue.clone(), first.catalogue_id, None, Some(ctx.brand.clone())))
}
