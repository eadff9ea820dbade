//! Disambiguation chain.
//!
//! Stages run in order over the same context; each one acts only when its
//! guard holds and sees whatever the previous stages left behind.

use anyhow::Result;
use tracing::debug;

use shopsearch_core::traits::ItemIndex;

use crate::context::{collapse_whitespace, convert_query, with_convert_retry, with_marker, ResolutionContext};

pub type Stage = fn(&dyn ItemIndex, &mut ResolutionContext) -> Result<()>;

pub const STAGES: [(&str, Stage); 3] =
    [("catalogue", catalogue_stage), ("brand_type", brand_type_stage), ("weak", weak_stage)];

pub fn run(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    for (name, stage) in STAGES {
        stage(index, ctx)?;
        debug!(stage = name, candidates = ctx.items.len(), "chain stage done");
    }
    Ok(())
}

/// No brand: search within the detected type, or the detected catalogue.
pub fn catalogue_stage(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if !ctx.brand.is_empty() {
        return Ok(());
    }
    let limit = ctx.page_size;
    ctx.items = match ctx.catalogue_id {
        None => {
            let item_type = with_marker(&ctx.item_type);
            with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_text_and_type(t, &item_type, limit))?
        }
        Some(catalogue_id) => {
            with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_catalogue_id(t, catalogue_id, limit))?
        }
    };
    Ok(())
}

pub fn brand_type_stage(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if ctx.brand.is_empty() {
        return Ok(());
    }
    let limit = ctx.page_size;
    let (brand, item_type) = (ctx.brand.as_str(), ctx.item_type.as_str());
    let items = if item_type.is_empty() {
        with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_text_and_brand(t, brand, limit))?
    } else {
        with_convert_retry(&ctx.query, ctx.need_convert, |t| index.find_by_type_and_brand(t, brand, item_type, limit))?
    };
    ctx.items = items;
    Ok(())
}

/// Last resort: any token of the untouched query, anywhere.
pub fn weak_stage(index: &dyn ItemIndex, ctx: &mut ResolutionContext) -> Result<()> {
    if !ctx.items.is_empty() {
        return Ok(());
    }
    if ctx.base_query.contains(' ') {
        ctx.query = collapse_whitespace(&ctx.query);
        ctx.base_query = collapse_whitespace(&ctx.base_query);
    }
    let limit = ctx.page_size;
    let base = with_marker(&ctx.base_query);
    let mut items = index.find_weak(&base, limit)?;
    if items.is_empty() && ctx.need_convert {
        items = index.find_by_type_and_brand(&convert_query(&base), &ctx.brand, &ctx.item_type, limit)?;
    }
    ctx.items = items;
    Ok(())
}
